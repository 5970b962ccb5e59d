mod card;
pub mod color;
mod title;
mod turn;

pub use card::{CardFormat, format_date, format_students, format_won};
pub use title::{Category, TitleFormat};
pub use turn::TurnFormat;
