//! Marketplace payloads as the backend returns them.
//!
//! Decoding is lenient: the client only displays these values, so every
//! scalar is optional, `null` lists decode as empty, amounts accept any JSON
//! number and unknown status or role values degrade instead of failing.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::{Role, lenient};

/// Paginated envelope used by listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostingStatus {
    Active,
    #[serde(other)]
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase", default)]
#[setters(into, strip_option)]
pub struct Posting {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub poster_name: Option<String>,
    pub poster_email: Option<String>,
    pub logo_image: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub compensation: Option<u64>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub status: Option<PostingStatus>,
    pub body: Option<String>,
    pub apply_due_date: Option<String>,
    pub activity_start_date: Option<String>,
    pub activity_end_date: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase", default)]
#[setters(into, strip_option)]
pub struct Application {
    pub id: Option<u64>,
    pub posting_id: Option<u64>,
    pub posting_title: Option<String>,
    pub poster_name: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub posting_tags: Vec<String>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub status: Option<ApplicationStatus>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingStatus {
    Pending,
    Paid,
    Cancelled,
    Overdue,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase", default)]
#[setters(into, strip_option)]
pub struct BillingItem {
    pub posting_id: Option<u64>,
    pub posting_title: Option<String>,
    pub student_id: Option<u64>,
    pub student_name: Option<String>,
    pub charged_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase", default)]
#[setters(into, strip_option)]
pub struct Billing {
    pub id: Option<u64>,
    pub company_id: Option<u64>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub status: Option<BillingStatus>,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub total_amount: Option<u64>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub items: Vec<BillingItem>,
}

/// Progress of a student's identity verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationStatus {
    None,
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// An application seen from the posting company's side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase", default)]
#[setters(into, strip_option)]
pub struct Applicant {
    pub id: Option<u64>,
    pub posting_id: Option<u64>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub applicant_university: Option<String>,
    pub applicant_major: Option<String>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub applicant_authorization_status: Option<AuthorizationStatus>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub status: Option<ApplicationStatus>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase", default)]
#[setters(into, strip_option)]
pub struct UserProfile {
    pub id: Option<u64>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub role: Option<Role>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub is_authorized: bool,
    #[serde(deserialize_with = "lenient::or_none")]
    pub student_authorization_status: Option<AuthorizationStatus>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub company_code: Option<String>,
    pub company_url: Option<String>,
    pub phone_number: Option<String>,
    pub description: Option<String>,
    pub profile_image: Option<String>,
}

/// Body of a company's new posting. Dates are `YYYY-MM-DD`; missing activity
/// dates are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(into)]
pub struct NewPosting {
    pub title: String,
    pub body: String,
    pub compensation: u64,
    pub tags: Vec<String>,
    pub apply_due_date: String,
    #[setters(strip_option)]
    pub activity_start_date: Option<String>,
    #[setters(strip_option)]
    pub activity_end_date: Option<String>,
}

impl NewPosting {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        apply_due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            apply_due_date: apply_due_date.into(),
            ..Default::default()
        }
    }

    /// Splits comma-separated tags, trimming each and dropping blanks.
    pub fn parse_tags(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }
}
