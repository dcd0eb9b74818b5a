//! Canonical in-memory record store.
//!
//! # Responsibility
//! - Own the ordered contact sequence that every projection derives from.
//! - Enforce the uniqueness invariant on every write.
//!
//! # Invariants
//! - No two identity-equivalent contacts are ever stored together.
//! - A failed write leaves the store exactly as it was.

pub mod address_book;

use crate::model::contact::Name;
use crate::model::tag::Tag;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Integrity violation reported by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An identity-equivalent contact is already stored.
    DuplicateContact(Name),
    /// No identity-equivalent contact is stored.
    ContactNotFound(Name),
    /// No stored contact carries the tag.
    TagNotFound(Tag),
}

impl StoreError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateContact(_) => "duplicate_contact",
            Self::ContactNotFound(_) => "contact_not_found",
            Self::TagNotFound(_) => "tag_not_found",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateContact(name) => {
                write!(f, "contact already exists in the address book: {name}")
            }
            Self::ContactNotFound(name) => {
                write!(f, "contact not found in the address book: {name}")
            }
            Self::TagNotFound(tag) => write!(f, "no contact carries tag {tag}"),
        }
    }
}

impl Error for StoreError {}
