//! Contact domain model.
//!
//! # Responsibility
//! - Define validated value types for every contact field.
//! - Define the identity rule used by the record store for uniqueness.
//!
//! # Invariants
//! - Every value type is validated on construction and on deserialize.
//! - Two contacts are identity-equivalent when their names match ignoring
//!   ASCII case; full-field equality is plain `PartialEq`.

pub mod contact;
pub mod tag;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for one contact field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidName(String),
    InvalidPhone(String),
    InvalidEmail(String),
    InvalidAddress(String),
    InvalidTag(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(
                f,
                "invalid name `{value}`: names contain only alphanumeric words separated by spaces"
            ),
            Self::InvalidPhone(value) => write!(
                f,
                "invalid phone `{value}`: phone numbers contain at least 3 digits and nothing else"
            ),
            Self::InvalidEmail(value) => {
                write!(f, "invalid email `{value}`: expected local-part@domain")
            }
            Self::InvalidAddress(value) => {
                write!(f, "invalid address `{value}`: address cannot be blank")
            }
            Self::InvalidTag(value) => {
                write!(f, "invalid tag `{value}`: tags are non-empty and alphanumeric")
            }
        }
    }
}

impl Error for ValidationError {}
