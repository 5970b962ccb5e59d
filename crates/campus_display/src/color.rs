use std::env;
use std::io::IsTerminal;
use std::str::FromStr;

/// When terminal output is colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" | "true" | "1" | "yes" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" | "false" | "0" | "no" => Ok(Self::Never),
            _ => Err(format!(
                "Invalid color mode: {s}. Expected: always, auto, never"
            )),
        }
    }
}

impl ColorMode {
    /// Reads `NO_COLOR` first, then `CAMPUS_COLOR`.
    pub fn from_env() -> Self {
        if env::var("NO_COLOR").is_ok_and(|value| !value.is_empty()) {
            return Self::Never;
        }

        env::var("CAMPUS_COLOR")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Applies the mode to every `colored` string in the process.
    pub fn apply(self) {
        let enabled = match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        };
        colored::control::set_override(enabled);
    }
}

/// Colors tuned to stay readable on light and dark backgrounds.
pub mod palette {
    use colored::Colorize;

    pub fn accent(text: &str) -> String {
        text.truecolor(6, 182, 212).to_string()
    }

    pub fn muted(text: &str) -> String {
        text.truecolor(107, 114, 128).to_string()
    }

    pub fn success(text: &str) -> String {
        text.truecolor(34, 197, 94).to_string()
    }

    pub fn warning(text: &str) -> String {
        text.truecolor(184, 134, 11).to_string()
    }

    pub fn danger(text: &str) -> String {
        text.truecolor(220, 38, 127).to_string()
    }

    pub fn strong(text: &str) -> String {
        text.bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_color_mode_from_str() {
        let fixtures = vec![
            ("always", ColorMode::Always),
            ("YES", ColorMode::Always),
            ("auto", ColorMode::Auto),
            ("never", ColorMode::Never),
            ("0", ColorMode::Never),
        ];

        for (input, expected) in fixtures {
            let actual = ColorMode::from_str(input).unwrap();
            assert_eq!(actual, expected, "Failed for input: {input}");
        }
    }

    #[test]
    fn test_color_mode_from_str_invalid() {
        assert!(ColorMode::from_str("sometimes").is_err());
    }

    #[test]
    fn test_palette_keeps_text() {
        let actual = strip_ansi_escapes::strip_str(palette::danger("Rejected"));
        assert_eq!(actual, "Rejected");
    }
}
