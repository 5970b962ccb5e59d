use serde_json::Value;

use crate::{Applicant, Application, Billing, Posting, Route, UserProfile};

/// Visual variant produced for a structured assistant payload or a REST
/// listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    PostingList(Vec<Posting>),
    PostingDetail(Posting),
    ApplicationList(Vec<Application>),
    UserProfile(UserProfile),
    BillingList(Vec<Billing>),
    BillingDetail(Billing),
    ApplicantList {
        applicants: Vec<Applicant>,
        posting_id: Option<u64>,
    },
    /// Unstyled dump for payloads no card family knows about.
    Raw(Value),
}

impl Card {
    pub fn applicants(applicants: Vec<Applicant>) -> Self {
        let posting_id = applicants.first().and_then(|applicant| applicant.posting_id);
        Card::ApplicantList { applicants, posting_id }
    }

    /// Page holding the full version of what this card summarises.
    pub fn link(&self) -> Option<Route> {
        match self {
            Card::PostingDetail(posting) => posting.id.map(Route::Activity),
            Card::ApplicationList(_) => Some(Route::Applications),
            Card::UserProfile(_) => Some(Route::MyPage),
            Card::BillingList(_) => Some(Route::CompanyBill),
            Card::ApplicantList { posting_id, .. } => {
                posting_id.map(Route::CompanyActivityManagement)
            }
            Card::PostingList(_) | Card::BillingDetail(_) | Card::Raw(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_applicant_list_links_first_posting() {
        let fixture = vec![
            Applicant::default().id(1u64).posting_id(42u64),
            Applicant::default().id(2u64).posting_id(42u64),
        ];

        let actual = Card::applicants(fixture).link();

        assert_eq!(actual, Some(Route::CompanyActivityManagement(42)));
    }

    #[test]
    fn test_empty_applicant_list_has_no_link() {
        let actual = Card::applicants(vec![]).link();
        assert_eq!(actual, None);
    }
}
