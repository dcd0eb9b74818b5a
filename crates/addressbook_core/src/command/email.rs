//! Email command: a side effect with no inverse.

use crate::command::{CommandOutcome, CommandResult};
use crate::email::{Credentials, MessageDraft};
use crate::service::model_manager::ModelManager;

/// Action forwarded to the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailCommand {
    Login(Credentials),
    /// Composes `draft` addressed to every visible contact; sends it when
    /// `send` is set.
    Send { draft: MessageDraft, send: bool },
    Status,
}

impl EmailCommand {
    pub(crate) fn execute(self, model: &mut ModelManager) -> CommandResult<CommandOutcome> {
        match self {
            Self::Login(credentials) => {
                let address = credentials.address().to_string();
                model.login_email(credentials)?;
                Ok(CommandOutcome::new(format!("Logged in as {address}")))
            }
            Self::Send { mut draft, send } => {
                for contact in model.projection().iter() {
                    if !draft.recipients.contains(&contact.email) {
                        draft.recipients.push(contact.email.clone());
                    }
                }
                let recipients = draft.recipients.len();
                match model.send_email(draft, send)? {
                    Some(sent) => Ok(CommandOutcome::new(format!(
                        "Email {} sent to {recipients} recipients",
                        sent.id
                    ))),
                    None => Ok(CommandOutcome::new(format!(
                        "Email drafted for {recipients} recipients"
                    ))),
                }
            }
            Self::Status => Ok(CommandOutcome::new(model.email_status())),
        }
    }
}
