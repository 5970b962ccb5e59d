use std::sync::Arc;

use anyhow::Result;
use campus_app::{
    ConversationController, Navigation, NavigationGuard, RejectReason, SessionStore, Submission,
    authorize, render_all,
};
use campus_config::ClientConfig;
use campus_display::{CardFormat, TitleFormat, TurnFormat, format_students};
use campus_domain::{Card, MarketplaceApi, NewPosting, Role, Route};
use campus_infra::{CampusHttpService, SessionJsonRepository};
use tracing::{debug, warn};

use crate::cli::{AdminCommand, ApplicantCommand, Cli, TopLevelCommand};
use crate::editor::{CampusEditor, ConsoleConfirm, ReadResult, read_password};
use crate::model::Command;

const PROMPT: &str = "› ";

type Controller = ConversationController<CampusHttpService>;

pub struct UI {
    cli: Cli,
    config: ClientConfig,
    store: SessionStore<SessionJsonRepository>,
}

impl UI {
    pub fn init(cli: Cli, config: ClientConfig) -> Self {
        let repository = SessionJsonRepository::new(config.session_file());
        Self { cli, config, store: SessionStore::new(Arc::new(repository)) }
    }

    pub async fn run(&self) -> Result<()> {
        match self.cli.command.clone() {
            TopLevelCommand::Login { email, password, role } => {
                self.login(&email, password, role).await
            }
            TopLevelCommand::Logout => {
                self.store.clear_session().await?;
                println!("{}", TitleFormat::success("Logged out"));
                Ok(())
            }
            TopLevelCommand::Whoami => {
                let api = self.api_for(Route::MyPage).await?;
                let profile = api.me().await?;
                self.store.cache_profile(profile.clone()).await?;
                print_card(&Card::UserProfile(profile));
                Ok(())
            }
            TopLevelCommand::Chat { prompt } => self.chat(prompt).await,
            TopLevelCommand::Applications => {
                let api = self.api_for(Route::Applications).await?;
                print_card(&Card::ApplicationList(api.my_applications().await?));
                Ok(())
            }
            TopLevelCommand::Bills => {
                let api = self.api_for(Route::CompanyBill).await?;
                print_card(&Card::BillingList(api.my_billings().await?));
                Ok(())
            }
            TopLevelCommand::Bill { id } => {
                let api = self.api_for(Route::CompanyBill).await?;
                print_card(&Card::BillingDetail(api.billing(id).await?));
                Ok(())
            }
            TopLevelCommand::Posting { id } => {
                let api = self.api_for(Route::Activity(id)).await?;
                print_card(&Card::PostingDetail(api.posting(id).await?));
                Ok(())
            }
            TopLevelCommand::Applicants { posting_id } => {
                let api = self
                    .api_for(Route::CompanyActivityManagement(posting_id))
                    .await?;
                print_card(&Card::applicants(api.posting_applicants(posting_id).await?));
                Ok(())
            }
            TopLevelCommand::Post {
                title,
                body,
                compensation,
                tags,
                apply_due_date,
                activity_start_date,
                activity_end_date,
            } => {
                let api = self.api_for(Route::CompanyActivityNew).await?;
                let mut posting = NewPosting::new(title, body, apply_due_date)
                    .compensation(compensation)
                    .tags(NewPosting::parse_tags(&tags));
                posting.activity_start_date = activity_start_date;
                posting.activity_end_date = activity_end_date;
                api.create_posting(&posting).await?;
                println!(
                    "{}",
                    TitleFormat::success("Posting created").sub_title(posting.title)
                );
                Ok(())
            }
            TopLevelCommand::Applicant { command } => self.applicant(command).await,
            TopLevelCommand::Admin { command } => self.admin(command).await,
        }
    }

    /// Client carrying the stored token, if any.
    async fn api(&self) -> Result<CampusHttpService> {
        Ok(CampusHttpService::new(&self.config)?.token(self.store.token().await))
    }

    /// Client for a page, after the role gate for that page has passed.
    async fn api_for(&self, route: Route) -> Result<CampusHttpService> {
        let session = self.store.session().await;
        authorize(route, session.as_ref())?;
        debug!(%route, "Access granted");
        self.api().await
    }

    async fn login(&self, email: &str, password: Option<String>, role: Option<Role>) -> Result<()> {
        let password = match password {
            Some(password) => password,
            None => read_password()?,
        };

        let api = CampusHttpService::new(&self.config)?;
        let token = api.login(email, &password).await?;
        self.store.set_session(token.clone(), role).await?;

        // The profile only fills in the role and the cached profile; the
        // login itself already succeeded.
        match api.token(Some(token)).me().await {
            Ok(profile) => self.store.cache_profile(profile).await?,
            Err(error) => warn!(?error, "Failed to fetch profile after login"),
        }

        let role = self.store.role().await.unwrap_or(Role::Student);
        println!(
            "{}",
            TitleFormat::success("Logged in").sub_title(format!("as {email} ({role})"))
        );
        Ok(())
    }

    async fn applicant(&self, command: ApplicantCommand) -> Result<()> {
        let (posting_id, application_id, approve) = match command {
            ApplicantCommand::Approve { posting_id, application_id } => {
                (posting_id, application_id, true)
            }
            ApplicantCommand::Reject { posting_id, application_id } => {
                (posting_id, application_id, false)
            }
        };
        let api = self
            .api_for(Route::CompanyActivityManagement(posting_id))
            .await?;
        api.update_application_status(application_id, approve).await?;
        let decision = if approve { "approved" } else { "rejected" };
        println!(
            "{}",
            TitleFormat::success(format!("Application #{application_id} {decision}"))
        );
        Ok(())
    }

    async fn admin(&self, command: AdminCommand) -> Result<()> {
        let api = self.api_for(Route::Admin).await?;
        match command {
            AdminCommand::Students => {
                println!("{}", format_students(&api.students().await?));
            }
            AdminCommand::Approve { user_id } => {
                api.decide_student_authorization(user_id, true).await?;
                println!("{}", TitleFormat::success(format!("Student #{user_id} approved")));
            }
            AdminCommand::Reject { user_id } => {
                api.decide_student_authorization(user_id, false).await?;
                println!("{}", TitleFormat::success(format!("Student #{user_id} rejected")));
            }
        }
        Ok(())
    }

    async fn chat(&self, prompt: Option<String>) -> Result<()> {
        let route = match self.store.role().await {
            Some(Role::Company) => Route::CompanyChatbot,
            _ => Route::Chatbot,
        };
        let api = self.api_for(route).await?;
        let controller =
            ConversationController::new(Arc::new(api)).timeout(self.config.http.request_duration());

        if let Some(prompt) = prompt {
            send(&controller, &prompt).await;
            return Ok(());
        }

        let mut editor = CampusEditor::new()?;
        let guard = NavigationGuard::new();
        let confirm = ConsoleConfirm;
        println!(
            "{}",
            TitleFormat::info("Chat started").sub_title("type /help for commands")
        );

        loop {
            let leave = match editor.prompt(PROMPT)? {
                ReadResult::Empty | ReadResult::Continue => false,
                ReadResult::Exit => true,
                ReadResult::Success(line) => match Command::parse(&line) {
                    Command::Exit => true,
                    Command::New => {
                        if controller.reset_conversation(&confirm) {
                            println!("{}", TitleFormat::info("New conversation"));
                        }
                        false
                    }
                    Command::Help => {
                        print_help();
                        false
                    }
                    Command::Message(text) => {
                        send(&controller, &text).await;
                        false
                    }
                },
            };

            if leave && guard.allow_exit(controller.len(), &confirm) == Navigation::Proceed {
                return Ok(());
            }
        }
    }
}

async fn send(controller: &Controller, text: &str) {
    match controller.submit_message(text).await {
        Submission::Rejected(RejectReason::Empty) => {}
        Submission::Rejected(RejectReason::InFlight) => {
            println!("{}", TitleFormat::info("Still waiting for the previous reply"));
        }
        Submission::Answered | Submission::Failed => {
            if let Some(turn) = controller.transcript().last() {
                let cards = render_all(turn.function_results());
                println!("{}", TurnFormat::new(turn).cards(&cards).format());
            }
        }
    }
}

fn print_card(card: &Card) {
    println!("{}", CardFormat::new(card));
}

fn print_help() {
    for (command, description) in Command::available_commands() {
        println!("  {command:<8} {description}");
    }
}
