/// Identifier type for Taskdash entities
use crate::normalize::parse_numeric_id;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identifier of a user, project or task.
///
/// The backing store may return `7` for one record and `"7"` for another
/// that refers to the same entity. Both forms compare and hash equal here,
/// so ids can be used as map keys or in `contains` checks without first
/// agreeing on a representation. Ids that are not numeric are kept as
/// opaque text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Integer identifier
    Number(i64),
    /// Opaque (or not yet canonicalized) text identifier
    Text(String),
}

impl EntityId {
    /// Integer value of this id, if it is numeric in either representation.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => parse_numeric_id(text),
        }
    }

    /// Numeric ids become `Number`, everything else stays as is.
    #[must_use]
    pub fn canonical(&self) -> Self {
        match self.as_i64() {
            Some(n) => Self::Number(n),
            None => self.clone(),
        }
    }

    /// Text to put into a resource path or query string.
    pub fn to_path_segment(&self) -> String {
        match self.as_i64() {
            Some(n) => n.to_string(),
            None => self.to_string(),
        }
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => match (self, other) {
                (Self::Text(a), Self::Text(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.as_i64() {
            Some(n) => {
                0u8.hash(state);
                n.hash(state);
            }
            None => {
                1u8.hash(state);
                self.to_string().hash(state);
            }
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

impl FromStr for EntityId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match parse_numeric_id(s) {
            Some(n) => Self::Number(n),
            None => Self::Text(s.to_string()),
        })
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u32> for EntityId {
    fn from(n: u32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_numeric_text_equals_number() {
        assert_eq!(EntityId::from(7), EntityId::from("7"));
        assert_eq!(EntityId::from("007"), EntityId::from(7));
        assert_ne!(EntityId::from("7a"), EntityId::from(7));
        assert_ne!(EntityId::from("abc"), EntityId::from("abd"));
        assert_eq!(EntityId::from("abc"), EntityId::from("abc"));
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(EntityId::from(3));
        assert!(set.contains(&EntityId::from("3")));
        assert!(!set.contains(&EntityId::from("x3")));
    }

    #[test]
    fn test_serde_untagged() {
        let n: EntityId = serde_json::from_str("12").unwrap();
        let t: EntityId = serde_json::from_str("\"ab12\"").unwrap();
        assert!(matches!(n, EntityId::Number(12)));
        assert!(matches!(t, EntityId::Text(ref s) if s == "ab12"));
        assert_eq!(serde_json::to_string(&EntityId::from(5)).unwrap(), "5");
    }

    #[test]
    fn test_parse_and_path_segment() {
        let id: EntityId = "42".parse().unwrap();
        assert!(matches!(id, EntityId::Number(42)));
        assert_eq!(EntityId::from("+42").to_path_segment(), "42");
        assert_eq!(EntityId::from("a-b").to_path_segment(), "a-b");
    }
}
