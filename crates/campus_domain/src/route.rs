use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::{Error, Role};

/// Client-side pages of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
    Activity(u64),
    MyPage,
    Applications,
    Chatbot,
    Company,
    CompanyActivity,
    CompanyActivityNew,
    CompanyActivityManagement(u64),
    CompanyBill,
    CompanyChatbot,
    Admin,
}

impl Route {
    /// Pages reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Home | Route::SignIn | Route::SignUp | Route::Activity(_))
    }

    pub fn requires_auth(&self) -> bool {
        !self.is_public()
    }

    /// Role needed to open the page, if it is restricted to one.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Company
            | Route::CompanyActivity
            | Route::CompanyActivityNew
            | Route::CompanyActivityManagement(_)
            | Route::CompanyBill
            | Route::CompanyChatbot => Some(Role::Company),
            Route::Admin => Some(Role::Admin),
            _ => None,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::SignIn => write!(f, "/signin"),
            Route::SignUp => write!(f, "/signup"),
            Route::Activity(id) => write!(f, "/activity/{id}"),
            Route::MyPage => write!(f, "/mypage"),
            Route::Applications => write!(f, "/applications"),
            Route::Chatbot => write!(f, "/chatbot"),
            Route::Company => write!(f, "/company"),
            Route::CompanyActivity => write!(f, "/company/activity"),
            Route::CompanyActivityNew => write!(f, "/company/activity/new"),
            Route::CompanyActivityManagement(id) => {
                write!(f, "/company/activity/management/{id}")
            }
            Route::CompanyBill => write!(f, "/company/bill"),
            Route::CompanyChatbot => write!(f, "/company/chatbot"),
            Route::Admin => write!(f, "/admin"),
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let path = match trimmed.trim_end_matches('/') {
            "" => "/",
            path => path,
        };
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let id = |raw: &str| {
            raw.parse::<u64>()
                .map_err(|_| Error::UnknownRoute(trimmed.to_string()))
        };

        match segments.as_slice() {
            [""] => Ok(Route::Home),
            ["signin"] => Ok(Route::SignIn),
            ["signup"] => Ok(Route::SignUp),
            ["activity", raw] => Ok(Route::Activity(id(raw)?)),
            ["mypage"] => Ok(Route::MyPage),
            ["applications"] => Ok(Route::Applications),
            ["chatbot"] => Ok(Route::Chatbot),
            ["company"] => Ok(Route::Company),
            ["company", "activity"] => Ok(Route::CompanyActivity),
            ["company", "activity", "new"] => Ok(Route::CompanyActivityNew),
            ["company", "activity", "management", raw] => {
                Ok(Route::CompanyActivityManagement(id(raw)?))
            }
            ["company", "bill"] => Ok(Route::CompanyBill),
            ["company", "chatbot"] => Ok(Route::CompanyChatbot),
            ["admin"] => Ok(Route::Admin),
            _ => Err(Error::UnknownRoute(trimmed.to_string())),
        }
    }
}
