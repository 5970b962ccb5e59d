use std::fmt::{self, Display, Formatter};

use derive_setters::Setters;

use crate::color::palette;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Info,
    Action,
    Success,
    Error,
}

/// One-line status message printed by the CLI between results.
#[derive(Clone, Setters, Debug, PartialEq)]
#[setters(into, strip_option)]
pub struct TitleFormat {
    pub title: String,
    pub sub_title: Option<String>,
    pub category: Category,
}

impl TitleFormat {
    fn new(title: impl Into<String>, category: Category) -> Self {
        Self { title: title.into(), sub_title: None, category }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Category::Info)
    }

    /// Something is under way, e.g. waiting for the assistant.
    pub fn action(message: impl Into<String>) -> Self {
        Self::new(message, Category::Action)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Category::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Category::Error)
    }

    pub fn render(&self) -> String {
        let icon = match self.category {
            Category::Info => palette::muted("⏺"),
            Category::Action => palette::warning("⏺"),
            Category::Success => palette::success("⏺"),
            Category::Error => palette::danger("⏺"),
        };

        let title = match self.category {
            Category::Error => {
                palette::danger(&format!("{} {}", palette::strong("ERROR:"), self.title))
            }
            Category::Success => palette::strong(&self.title),
            Category::Info | Category::Action => self.title.clone(),
        };

        match &self.sub_title {
            Some(sub_title) => format!("{icon} {title} {}", palette::muted(sub_title)),
            None => format!("{icon} {title}"),
        }
    }
}

impl Display for TitleFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
