//! Commands and their binding to the model manager and history.
//!
//! # Responsibility
//! - Define every command as one tagged variant.
//! - Route undoable variants through the history engine after they succeed.
//!
//! # Invariants
//! - `Command::execute` consumes the command, so one instance runs at most
//!   once.
//! - A failed command never touches either history stack.
//! - Only invertible variants produce a `Mutation`; read-only and email
//!   variants leave the history alone.

pub mod contact;
pub mod email;
pub mod history;
pub mod mutation;

use crate::email::EmailError;
use crate::model::tag::Tag;
use crate::service::model_manager::ModelManager;
use crate::service::projection::SortMode;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use contact::{
    AddCommand, ClearCommand, DeleteCommand, DeleteTagCommand, EditCommand, EditContactDescriptor,
    FindCommand,
};
pub use email::EmailCommand;
pub use history::{CommandId, EntryState, HistoryEntry, HistoryStep, UndoRedoStack};
pub use mutation::Mutation;

pub type CommandResult<T> = Result<T, CommandError>;

/// Failure reported by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Zero-based index outside the visible projection.
    InvalidIndex { index: usize, visible: usize },
    /// Edit requested without any changed field.
    NotEdited,
    /// No stored contact carries the tag.
    TagNotFound(Tag),
    Store(StoreError),
    Email(EmailError),
    NothingToUndo,
    NothingToRedo,
    /// Reverting a history entry was rejected by the store.
    UndoFailed {
        command: &'static str,
        source: StoreError,
    },
    /// Re-applying a history entry was rejected by the store.
    RedoFailed {
        command: &'static str,
        source: StoreError,
    },
}

impl CommandError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIndex { .. } => "invalid_index",
            Self::NotEdited => "not_edited",
            Self::TagNotFound(_) => "tag_not_found",
            Self::Store(err) => err.code(),
            Self::Email(_) => "email_failed",
            Self::NothingToUndo => "nothing_to_undo",
            Self::NothingToRedo => "nothing_to_redo",
            Self::UndoFailed { .. } => "undo_failed",
            Self::RedoFailed { .. } => "redo_failed",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndex { index, visible } => write!(
                f,
                "the contact index provided is invalid: {index} (visible contacts: {visible})"
            ),
            Self::NotEdited => write!(f, "at least one field to edit must be provided"),
            Self::TagNotFound(tag) => write!(f, "no contact carries tag {tag}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Email(err) => write!(f, "{err}"),
            Self::NothingToUndo => write!(f, "no more commands to undo"),
            Self::NothingToRedo => write!(f, "no more commands to redo"),
            Self::UndoFailed { command, source } => {
                write!(f, "undo of `{command}` failed: {source}")
            }
            Self::RedoFailed { command, source } => {
                write!(f, "redo of `{command}` failed: {source}")
            }
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Email(err) => Some(err),
            Self::UndoFailed { source, .. } | Self::RedoFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<EmailError> for CommandError {
    fn from(value: EmailError) -> Self {
        Self::Email(value)
    }
}

/// User-facing result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub feedback: String,
}

impl CommandOutcome {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
        }
    }
}

/// Model manager and history a command executes against.
pub struct CommandContext<'a> {
    pub model: &'a mut ModelManager,
    pub history: &'a mut UndoRedoStack,
}

impl<'a> CommandContext<'a> {
    pub fn new(model: &'a mut ModelManager, history: &'a mut UndoRedoStack) -> Self {
        Self { model, history }
    }
}

/// Every command the core understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    Edit(EditCommand),
    Clear(ClearCommand),
    DeleteTag(DeleteTagCommand),
    Find(FindCommand),
    List,
    Sort(SortMode),
    Email(EmailCommand),
    Undo,
    Redo,
}

impl Command {
    /// Command word, as typed by users of the text interface.
    pub fn word(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Edit(_) => "edit",
            Self::Clear(_) => "clear",
            Self::DeleteTag(_) => "deletetag",
            Self::Find(_) => "find",
            Self::List => "list",
            Self::Sort(_) => "sort",
            Self::Email(_) => "email",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Whether a successful run is recorded in the undo history.
    pub fn is_undoable(&self) -> bool {
        matches!(
            self,
            Self::Add(_) | Self::Delete(_) | Self::Edit(_) | Self::Clear(_) | Self::DeleteTag(_)
        )
    }

    /// Executes the command against `ctx`.
    pub fn execute(self, ctx: &mut CommandContext<'_>) -> CommandResult<CommandOutcome> {
        let (mutation, outcome) = match self {
            Self::Add(command) => command.execute(ctx.model)?,
            Self::Delete(command) => command.execute(ctx.model)?,
            Self::Edit(command) => command.execute(ctx.model)?,
            Self::Clear(command) => command.execute(ctx.model)?,
            Self::DeleteTag(command) => command.execute(ctx.model)?,
            Self::Find(command) => return Ok(command.execute(ctx.model)),
            Self::List => {
                ctx.model.show_all();
                return Ok(CommandOutcome::new("Listed all contacts"));
            }
            Self::Sort(mode) => {
                ctx.model.set_sort(mode);
                return Ok(CommandOutcome::new(format!(
                    "Contacts sorted by {}",
                    mode.as_str()
                )));
            }
            Self::Email(command) => return command.execute(ctx.model),
            Self::Undo => {
                let step = ctx.history.undo(ctx.model)?;
                return Ok(CommandOutcome::new(format!(
                    "Undo success: {}",
                    step.command
                )));
            }
            Self::Redo => {
                let step = ctx.history.redo(ctx.model)?;
                return Ok(CommandOutcome::new(format!(
                    "Redo success: {}",
                    step.command
                )));
            }
        };

        ctx.history.push(mutation);
        Ok(outcome)
    }
}
