//! Contact record and its field value types.
//!
//! # Responsibility
//! - Hold one person's name, phone, email, address and tag set.
//! - Provide identity comparison and tag helpers used by the store and the
//!   projection pipeline.
//!
//! # Invariants
//! - `Name` is the natural key; identity ignores ASCII case.
//! - Field values are trimmed and validated; a `Contact` can only be built
//!   from already-validated fields.

use crate::model::tag::Tag;
use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)*$").expect("valid email regex"));

macro_rules! string_field {
    ($ty:ident) => {
        impl $ty {
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

/// Contact display name and natural key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if !NAME_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidName(value.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns whether both names denote the same contact.
    pub fn is_same_as(&self, other: &Name) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Case-insensitive ordering used by the name sort.
    pub fn cmp_ignore_case(&self, other: &Name) -> Ordering {
        let left = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let right = other.0.bytes().map(|b| b.to_ascii_lowercase());
        left.cmp(right)
    }

    /// Returns the space-separated words of the name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

string_field!(Name);

/// Digits-only phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidPhone(value.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

string_field!(Phone);

/// Email address in `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidEmail(value.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

string_field!(Email);

/// Free-form postal address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidAddress(value.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

string_field!(Address);

/// One record in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    /// Kept ordered so the earliest tag is always `tags.first()`.
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl Contact {
    /// Creates an untagged contact from validated fields.
    pub fn new(name: Name, phone: Phone, email: Email, address: Address) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            tags: BTreeSet::new(),
        }
    }

    /// Returns this contact with its tag set replaced.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Identity-equivalence: same natural key, other fields ignored.
    pub fn is_same_contact(&self, other: &Contact) -> bool {
        self.name.is_same_as(&other.name)
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Lexicographically smallest tag, if any.
    pub fn earliest_tag(&self) -> Option<&Tag> {
        self.tags.first()
    }

    /// Returns a copy without `tag`, or `None` when the tag is not attached.
    pub fn without_tag(&self, tag: &Tag) -> Option<Contact> {
        if !self.has_tag(tag) {
            return None;
        }
        let mut updated = self.clone();
        updated.tags.remove(tag);
        Some(updated)
    }
}
