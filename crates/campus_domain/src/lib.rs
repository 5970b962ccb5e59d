mod card;
mod chat;
mod conversation;
mod entity;
mod error;
mod lenient;
mod role;
mod route;
mod services;
mod session;

pub use card::*;
pub use chat::*;
pub use conversation::*;
pub use entity::*;
pub use error::*;
pub use role::*;
pub use route::*;
pub use services::*;
pub use session::*;
