use crate::{Role, Route};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Login required")]
    NotAuthenticated,

    #[error("'{route}' is only available to {required} accounts")]
    Forbidden { route: Route, required: Role },

    #[error("Request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, Error>;
