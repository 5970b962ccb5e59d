mod client_config;
mod error;
mod http_config;
mod reader;

pub use client_config::*;
pub use error::*;
pub use http_config::*;
pub use reader::*;
