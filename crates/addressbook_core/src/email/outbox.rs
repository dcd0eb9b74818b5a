//! In-process mailer that records sent messages instead of delivering them.

use crate::email::{Credentials, EmailError, Mailer, MessageDraft, SentMessage};
use log::info;
use uuid::Uuid;

/// Mailer keeping an outbox of accepted messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboxMailer {
    account: Option<Credentials>,
    draft: Option<MessageDraft>,
    outbox: Vec<SentMessage>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.account.is_some()
    }

    pub fn draft(&self) -> Option<&MessageDraft> {
        self.draft.as_ref()
    }

    pub fn outbox(&self) -> &[SentMessage] {
        &self.outbox
    }
}

impl Mailer for OutboxMailer {
    fn login(&mut self, credentials: Credentials) -> Result<(), EmailError> {
        self.account = Some(credentials);
        info!("event=email_login module=email status=ok");
        Ok(())
    }

    fn compose(&mut self, draft: MessageDraft) {
        self.draft = Some(draft);
    }

    fn send(&mut self) -> Result<SentMessage, EmailError> {
        let account = self.account.as_ref().ok_or(EmailError::NotLoggedIn)?;
        let draft = match self.draft.as_ref() {
            Some(draft) if !draft.recipients.is_empty() => draft.clone(),
            _ => return Err(EmailError::NoRecipients),
        };

        let sent = SentMessage {
            id: Uuid::new_v4(),
            from: account.address().clone(),
            draft,
        };
        info!(
            "event=email_send module=email status=ok message_id={} recipients={}",
            sent.id,
            sent.draft.recipients.len()
        );
        self.outbox.push(sent.clone());
        self.draft = None;
        Ok(sent)
    }

    fn status(&self) -> String {
        let account = match self.account.as_ref() {
            Some(credentials) => format!("logged in as {}", credentials.address()),
            None => "not logged in".to_string(),
        };
        let draft = if self.draft.is_some() {
            "draft pending"
        } else {
            "no draft"
        };
        format!("{account}; {draft}; {} sent", self.outbox.len())
    }
}
