//! Tag domain object.

use serde::{Deserialize, Serialize};

/// Label attached to atoms.
///
/// Names are always trimmed and lowercase, so two tags compare equal when
/// they differ only in case or surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag {
    name: String,
}

impl Tag {
    /// Builds a tag from raw input. Returns `None` for blank names.
    pub fn new(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            name: trimmed.to_lowercase(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for Tag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| "tag name cannot be blank".to_string())
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.name
    }
}
