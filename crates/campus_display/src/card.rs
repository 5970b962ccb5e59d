use std::fmt::{self, Display, Formatter};

use campus_domain::{
    Applicant, Application, ApplicationStatus, AuthorizationStatus, Billing, BillingStatus, Card,
    Posting, PostingStatus, Role, UserProfile,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

use crate::color::palette;

const MISSING: &str = "-";

/// Amounts are whole won.
pub fn format_won(amount: u64) -> String {
    format!("{}원", amount.to_formatted_string(&Locale::en))
}

/// Shortens backend timestamps. Anything unparseable is shown as given.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return date_time.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return date_time.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Terminal rendering of a [`Card`], followed by its "see more" route when it
/// has one.
pub struct CardFormat<'a> {
    card: &'a Card,
}

impl<'a> CardFormat<'a> {
    pub fn new(card: &'a Card) -> Self {
        Self { card }
    }

    pub fn format(&self) -> String {
        let mut lines = match self.card {
            Card::PostingList(postings) => posting_list(postings),
            Card::PostingDetail(posting) => posting_detail(posting),
            Card::ApplicationList(applications) => application_list(applications),
            Card::UserProfile(profile) => user_profile(profile),
            Card::BillingList(billings) => billing_list(billings),
            Card::BillingDetail(billing) => billing_detail(billing),
            Card::ApplicantList { applicants, .. } => applicant_list(applicants),
            Card::Raw(value) => {
                let pretty =
                    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                pretty.lines().map(palette::muted).collect()
            }
        };

        if let Some(route) = self.card.link() {
            lines.push(palette::accent(&format!("→ {route}")));
        }
        lines.join("\n")
    }
}

impl Display for CardFormat<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

fn text(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(MISSING)
}

fn id(value: Option<u64>) -> String {
    palette::muted(&value.map_or_else(|| "#?".to_string(), |id| format!("#{id}")))
}

fn money(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_string(), format_won)
}

fn date(value: &Option<String>) -> String {
    value
        .as_deref()
        .map_or_else(|| MISSING.to_string(), format_date)
}

fn period(start: &Option<String>, end: &Option<String>) -> String {
    format!("{} ~ {}", date(start), date(end))
}

fn heading(title: &str, count: usize) -> String {
    format!(
        "{} {}",
        palette::strong(title),
        palette::muted(&format!("({count})"))
    )
}

fn field(label: &str, value: impl Display) -> String {
    format!("  {} {value}", palette::muted(&format!("{label}:")))
}

fn posting_status(status: Option<PostingStatus>) -> String {
    match status {
        Some(PostingStatus::Active) => palette::success("Open"),
        Some(PostingStatus::Closed) => palette::muted("Closed"),
        None => palette::muted("Unknown"),
    }
}

fn application_status(status: Option<ApplicationStatus>) -> String {
    match status {
        Some(ApplicationStatus::Pending) => palette::warning("Pending"),
        Some(ApplicationStatus::Approved) => palette::success("Approved"),
        Some(ApplicationStatus::Rejected) => palette::danger("Rejected"),
        Some(ApplicationStatus::Unknown) | None => palette::muted("Unknown"),
    }
}

fn billing_status(status: Option<BillingStatus>) -> String {
    match status {
        Some(BillingStatus::Pending) => palette::warning("Pending"),
        Some(BillingStatus::Paid) => palette::success("Paid"),
        Some(BillingStatus::Cancelled) => palette::muted("Cancelled"),
        Some(BillingStatus::Overdue) => palette::danger("Overdue"),
        Some(BillingStatus::Unknown) | None => palette::muted("Unknown"),
    }
}

fn authorization_status(status: Option<AuthorizationStatus>) -> String {
    match status {
        Some(AuthorizationStatus::Pending) => palette::warning("Verification pending"),
        Some(AuthorizationStatus::Approved) => palette::success("Verified"),
        Some(AuthorizationStatus::Rejected) => palette::danger("Verification rejected"),
        Some(AuthorizationStatus::None | AuthorizationStatus::Unknown) | None => {
            palette::muted("Not verified")
        }
    }
}

fn role(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Student) => "Student",
        Some(Role::Company) => "Company",
        Some(Role::Admin) => "Admin",
        None => MISSING,
    }
}

fn posting_list(postings: &[Posting]) -> Vec<String> {
    let mut lines = vec![heading("Postings", postings.len())];
    if postings.is_empty() {
        lines.push(palette::muted("  No postings"));
    }
    for posting in postings {
        let mut line = format!(
            "  {} {} · {} · {} · apply by {}",
            id(posting.id),
            palette::strong(text(&posting.title)),
            text(&posting.poster_name),
            money(posting.compensation),
            date(&posting.apply_due_date),
        );
        if !posting.tags.is_empty() {
            line.push_str(&palette::muted(&format!(" [{}]", posting.tags.join(", "))));
        }
        lines.push(line);
    }
    lines
}

fn posting_detail(posting: &Posting) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} · {}",
        id(posting.id),
        palette::strong(text(&posting.title)),
        posting_status(posting.status)
    )];

    let poster = match posting.poster_email.as_deref() {
        Some(email) => format!("{} <{email}>", text(&posting.poster_name)),
        None => text(&posting.poster_name).to_string(),
    };
    lines.push(field("Poster", poster));
    lines.push(field("Compensation", money(posting.compensation)));
    lines.push(field("Apply by", date(&posting.apply_due_date)));
    lines.push(field(
        "Activity",
        period(&posting.activity_start_date, &posting.activity_end_date),
    ));
    if !posting.tags.is_empty() {
        lines.push(field("Tags", posting.tags.join(", ")));
    }
    if let Some(body) = posting.body.as_deref().filter(|body| !body.trim().is_empty()) {
        lines.push(String::new());
        lines.extend(body.lines().map(|line| format!("  {line}")));
    }
    lines
}

fn application_list(applications: &[Application]) -> Vec<String> {
    let mut lines = vec![heading("Applications", applications.len())];
    if applications.is_empty() {
        lines.push(palette::muted("  No applications yet"));
    }
    for application in applications {
        lines.push(format!(
            "  {} {} · {} · {} · applied {}",
            id(application.id),
            palette::strong(text(&application.posting_title)),
            text(&application.poster_name),
            application_status(application.status),
            date(&application.created_at),
        ));
    }
    lines
}

fn user_profile(profile: &UserProfile) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        palette::strong(text(&profile.name)),
        palette::muted(&format!("({})", role(profile.role)))
    )];
    lines.push(field("Email", text(&profile.email)));

    match profile.role {
        Some(Role::Company) => {
            lines.push(field("Company code", text(&profile.company_code)));
            lines.push(field("Website", text(&profile.company_url)));
        }
        Some(Role::Admin) => {}
        Some(Role::Student) | None => {
            lines.push(field("University", text(&profile.university)));
            lines.push(field("Major", text(&profile.major)));
            let status = if profile.is_authorized {
                palette::success("Verified")
            } else {
                authorization_status(profile.student_authorization_status)
            };
            lines.push(field("Student status", status));
        }
    }

    if let Some(phone) = &profile.phone_number {
        lines.push(field("Phone", phone));
    }
    if let Some(description) = profile
        .description
        .as_deref()
        .filter(|description| !description.trim().is_empty())
    {
        lines.push(field("About", description));
    }
    lines
}

fn billing_list(billings: &[Billing]) -> Vec<String> {
    let mut lines = vec![heading("Bills", billings.len())];
    if billings.is_empty() {
        lines.push(palette::muted("  No bills"));
    }
    for billing in billings {
        lines.push(format!(
            "  {} {} · {} · {}",
            id(billing.id),
            period(&billing.started_at, &billing.ended_at),
            money(billing.total_amount),
            billing_status(billing.status),
        ));
    }
    lines
}

fn billing_detail(billing: &Billing) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} · {}",
        palette::strong("Bill"),
        id(billing.id),
        billing_status(billing.status)
    )];
    lines.push(field("Period", period(&billing.started_at, &billing.ended_at)));
    lines.push(field("Total", money(billing.total_amount)));
    lines.push(format!("  {}", heading("Items", billing.items.len())));
    for item in &billing.items {
        lines.push(format!(
            "    {} · {} · charged {}",
            text(&item.posting_title),
            text(&item.student_name),
            date(&item.charged_date),
        ));
    }
    lines
}

fn applicant_list(applicants: &[Applicant]) -> Vec<String> {
    let mut lines = vec![heading("Applicants", applicants.len())];
    if applicants.is_empty() {
        lines.push(palette::muted("  No applicants yet"));
    }
    for applicant in applicants {
        lines.push(format!(
            "  {} {} <{}> · {} {} · {} · {}",
            id(applicant.id),
            palette::strong(text(&applicant.applicant_name)),
            text(&applicant.applicant_email),
            text(&applicant.applicant_university),
            text(&applicant.applicant_major),
            application_status(applicant.status),
            authorization_status(applicant.applicant_authorization_status),
        ));
    }
    lines
}

/// Admin console listing of student accounts and their verification state.
pub fn format_students(students: &[UserProfile]) -> String {
    let mut lines = vec![heading("Students", students.len())];
    if students.is_empty() {
        lines.push(palette::muted("  No students"));
    }
    for student in students {
        let status = if student.is_authorized {
            palette::success("Verified")
        } else {
            authorization_status(student.student_authorization_status)
        };
        lines.push(format!(
            "  {} {} <{}> · {} {} · {status}",
            id(student.id),
            palette::strong(text(&student.name)),
            text(&student.email),
            text(&student.university),
            text(&student.major),
        ));
    }
    lines.join("\n")
}
