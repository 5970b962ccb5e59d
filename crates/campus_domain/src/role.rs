use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Account kind attached to a session and to user profiles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    #[serde(alias = "student")]
    Student,
    #[serde(alias = "company")]
    Company,
    #[serde(alias = "admin")]
    Admin,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_role_parses_case_insensitively() {
        assert_eq!(Role::from_str("company").unwrap(), Role::Company);
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert!(Role::from_str("guest").is_err());
    }

    #[test]
    fn test_role_accepts_lowercase_wire_alias() {
        let actual: Role = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(actual, Role::Student);
        assert_eq!(serde_json::to_string(&actual).unwrap(), r#""STUDENT""#);
    }
}
