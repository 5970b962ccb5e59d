mod cli;
mod editor;
mod model;
mod ui;

pub use cli::{AdminCommand, Cli, TopLevelCommand};
pub use ui::UI;
