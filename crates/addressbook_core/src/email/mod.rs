//! Outbound email collaborator.
//!
//! # Responsibility
//! - Define the opaque mailer contract invoked by the email command.
//! - Validate login credentials before they reach a mailer.
//!
//! # Invariants
//! - Email actions are side effects with no inverse; they never enter the
//!   undo/redo history.
//! - Passwords never appear in `Debug` output or logs.

pub mod outbox;

use crate::model::contact::Email;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

pub use outbox::OutboxMailer;

/// Mailer failure surfaced to the email command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    InvalidLogin(String),
    NotLoggedIn,
    NoRecipients,
}

impl Display for EmailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogin(reason) => write!(f, "invalid email login: {reason}"),
            Self::NotLoggedIn => write!(f, "not logged in to an email account"),
            Self::NoRecipients => write!(f, "message has no recipients"),
        }
    }
}

impl Error for EmailError {}

/// Account login for the mailer.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    address: Email,
    password: String,
}

impl Credentials {
    /// Validates an account address and a non-blank password.
    pub fn new(address: impl AsRef<str>, password: impl Into<String>) -> Result<Self, EmailError> {
        let address = Email::new(address).map_err(|err| EmailError::InvalidLogin(err.to_string()))?;
        let password = password.into();
        if password.trim().is_empty() {
            return Err(EmailError::InvalidLogin("password cannot be blank".to_string()));
        }
        Ok(Self { address, password })
    }

    pub fn address(&self) -> &Email {
        &self.address
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Message being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub recipients: Vec<Email>,
}

impl MessageDraft {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            recipients: Vec::new(),
        }
    }
}

/// Message accepted by a mailer for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: Uuid,
    pub from: Email,
    pub draft: MessageDraft,
}

/// Opaque messaging service used by the email command.
pub trait Mailer {
    fn login(&mut self, credentials: Credentials) -> Result<(), EmailError>;
    /// Replaces the current draft.
    fn compose(&mut self, draft: MessageDraft);
    /// Sends the current draft.
    fn send(&mut self) -> Result<SentMessage, EmailError>;
    /// Human-readable account/draft status.
    fn status(&self) -> String;
}
