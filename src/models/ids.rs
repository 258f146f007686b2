//! Strongly-typed identifiers
//!
//! Entity ids are UUID newtypes so a `LimitId` can never be passed where a
//! `CategoryId` is expected. Users are keyed by an opaque string supplied by
//! whoever owns authentication.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Shortest id prefix accepted when looking an entity up by reference
const MIN_REFERENCE_LEN: usize = 4;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Whether a user-typed reference names this id.
            ///
            /// Accepts the full UUID, the short display form, or a UUID
            /// prefix of at least four characters, with or without the
            /// display prefix.
            pub fn matches_reference(&self, reference: &str) -> bool {
                let reference = reference.trim();
                let reference = reference.strip_prefix($display_prefix).unwrap_or(reference);
                reference.len() >= MIN_REFERENCE_LEN
                    && self.0.to_string().starts_with(&reference.to_ascii_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(LimitId, "lim-");
define_id!(TargetId, "tgt-");

/// Identifier of the user owning a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new("local")
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serialization() {
        let id = LimitId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: LimitId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_matches_reference() {
        let id = CategoryId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches_reference("550e8400-e29b-41d4-a716-446655440000"));
        assert!(id.matches_reference("cat-550e8400"));
        assert!(id.matches_reference("550E"));
        assert!(!id.matches_reference("550"));
        assert!(!id.matches_reference("cat-660e"));
    }

    #[test]
    fn test_from_str_strips_prefix() {
        let id: TargetId = "tgt-550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            id.as_uuid().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_user_id_default() {
        assert_eq!(UserId::default().as_str(), "local");
        assert_eq!(UserId::from("alice").to_string(), "alice");
    }
}
