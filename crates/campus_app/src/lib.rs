mod controller;
mod navigation;
mod renderer;
mod session_store;

pub use controller::*;
pub use navigation::*;
pub use renderer::*;
pub use session_store::*;
