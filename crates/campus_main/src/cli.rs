use campus_domain::Role;
use clap::{Parser, Subcommand};
use url::Url;

/// Terminal client for the campus gig marketplace.
#[derive(Parser, Debug)]
#[command(name = "campus", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Backend base URL. Overrides `api_base_url` from the config file.
    #[arg(long, global = true)]
    pub base_url: Option<Url>,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: TopLevelCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TopLevelCommand {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,

        /// Read from the terminal when omitted.
        #[arg(long)]
        password: Option<String>,

        /// Account kind to remember when the backend profile does not say.
        #[arg(long)]
        role: Option<Role>,
    },

    /// Forget the stored session.
    Logout,

    /// Show the signed-in profile.
    Whoami,

    /// Talk to the assistant.
    ///
    /// Without `--prompt` an interactive session starts; `/help` lists its
    /// commands.
    Chat {
        /// Send a single message and print the reply.
        #[arg(long, short)]
        prompt: Option<String>,
    },

    /// List your applications.
    Applications,

    /// List your company's bills.
    Bills,

    /// Show one bill.
    Bill { id: u64 },

    /// Show one posting.
    Posting { id: u64 },

    /// List the applicants of one of your postings.
    Applicants { posting_id: u64 },

    /// Publish a new posting for your company.
    Post {
        #[arg(long)]
        title: String,

        #[arg(long)]
        body: String,

        /// Pay in won.
        #[arg(long, default_value_t = 0)]
        compensation: u64,

        /// Comma-separated, e.g. `math,tutoring`.
        #[arg(long, default_value = "")]
        tags: String,

        /// Last day to apply, `YYYY-MM-DD`.
        #[arg(long)]
        apply_due_date: String,

        #[arg(long)]
        activity_start_date: Option<String>,

        #[arg(long)]
        activity_end_date: Option<String>,
    },

    /// Decide on an application to one of your postings.
    Applicant {
        #[command(subcommand)]
        command: ApplicantCommand,
    },

    /// Admin console.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// List student accounts.
    Students,

    /// Approve a student's verification request.
    Approve { user_id: u64 },

    /// Reject a student's verification request.
    Reject { user_id: u64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ApplicantCommand {
    /// Accept an applicant.
    Approve { posting_id: u64, application_id: u64 },

    /// Turn an applicant down.
    Reject { posting_id: u64, application_id: u64 },
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_login_with_role() {
        let fixture = ["campus", "login", "--email", "kim@snu.ac.kr", "--role", "company"];

        let actual = Cli::try_parse_from(fixture).unwrap();

        let expected = TopLevelCommand::Login {
            email: "kim@snu.ac.kr".to_string(),
            password: None,
            role: Some(Role::Company),
        };
        assert_eq!(actual.command, expected);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let fixture = ["campus", "bills", "--base-url", "http://api.test/v1", "-v"];

        let actual = Cli::try_parse_from(fixture).unwrap();

        assert_eq!(actual.command, TopLevelCommand::Bills);
        assert_eq!(actual.base_url.unwrap().as_str(), "http://api.test/v1");
        assert!(actual.verbose);
    }

    #[test]
    fn test_admin_approve() {
        let actual = Cli::try_parse_from(["campus", "admin", "approve", "12"]).unwrap();

        let expected = TopLevelCommand::Admin { command: AdminCommand::Approve { user_id: 12 } };
        assert_eq!(actual.command, expected);
    }

    #[test]
    fn test_chat_prompt() {
        let actual = Cli::try_parse_from(["campus", "chat", "-p", "hello"]).unwrap();

        let expected = TopLevelCommand::Chat { prompt: Some("hello".to_string()) };
        assert_eq!(actual.command, expected);
    }

    #[test]
    fn test_invalid_role_is_rejected() {
        let actual = Cli::try_parse_from(["campus", "login", "--email", "a@b", "--role", "guest"]);
        assert!(actual.is_err());
    }

    #[test]
    fn test_post_with_optional_dates_omitted() {
        let fixture = [
            "campus",
            "post",
            "--title",
            "Tutor",
            "--body",
            "Math tutoring",
            "--tags",
            "math, tutoring",
            "--apply-due-date",
            "2026-11-01",
        ];

        let actual = Cli::try_parse_from(fixture).unwrap();

        let expected = TopLevelCommand::Post {
            title: "Tutor".to_string(),
            body: "Math tutoring".to_string(),
            compensation: 0,
            tags: "math, tutoring".to_string(),
            apply_due_date: "2026-11-01".to_string(),
            activity_start_date: None,
            activity_end_date: None,
        };
        assert_eq!(actual.command, expected);
    }

    #[test]
    fn test_post_requires_apply_due_date() {
        let actual = Cli::try_parse_from(["campus", "post", "--title", "T", "--body", "B"]);
        assert!(actual.is_err());
    }

    #[test]
    fn test_applicant_reject() {
        let actual = Cli::try_parse_from(["campus", "applicant", "reject", "3", "42"]).unwrap();

        let expected = TopLevelCommand::Applicant {
            command: ApplicantCommand::Reject { posting_id: 3, application_id: 42 },
        };
        assert_eq!(actual.command, expected);
    }
}
