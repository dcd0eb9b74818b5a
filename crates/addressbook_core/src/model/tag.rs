//! Tag value type.
//!
//! # Invariants
//! - Tag names are non-empty and alphanumeric.
//! - Ordering is plain lexicographic on the stored name.

use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid tag regex"));

/// Short label attached to contacts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Validates and wraps one tag name. Surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = name.as_ref().trim();
        if !TAG_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidTag(name.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

impl TryFrom<String> for Tag {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}
