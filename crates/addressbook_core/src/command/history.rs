//! Undo/redo history engine.
//!
//! # Responsibility
//! - Keep executed undoable commands on two LIFO stacks.
//! - Move entries between the stacks on undo/redo, reverting or re-applying
//!   their mutation against the model manager.
//!
//! # Invariants
//! - Entries on `undoable` are `Executed`; entries on `redoable` are
//!   `Inverted`.
//! - Pushing a new entry clears `redoable`; cleared entries are discarded,
//!   never inverted.
//! - An entry whose revert/re-apply fails is dropped from both stacks.
//! - No reordering or coalescing: undo order is the exact reverse of
//!   execution order.

use crate::command::mutation::Mutation;
use crate::command::{CommandError, CommandResult};
use crate::service::model_manager::ModelManager;
use log::{debug, warn};
use uuid::Uuid;

/// Stable id of one history entry, used for log correlation.
pub type CommandId = Uuid;

/// Lifecycle state of an entry held by the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Forward effect applied; eligible for undo.
    Executed,
    /// Forward effect reverted; eligible for redo.
    Inverted,
}

/// One executed undoable command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: CommandId,
    state: EntryState,
    mutation: Mutation,
}

impl HistoryEntry {
    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn word(&self) -> &'static str {
        self.mutation.word()
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }
}

/// Summary of an entry moved by undo or redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStep {
    pub id: CommandId,
    pub command: &'static str,
}

/// Two-stack command history.
#[derive(Debug, Default)]
pub struct UndoRedoStack {
    undoable: Vec<HistoryEntry>,
    redoable: Vec<HistoryEntry>,
}

impl UndoRedoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly executed mutation and discards redo history.
    pub fn push(&mut self, mutation: Mutation) -> CommandId {
        let discarded = self.redoable.len();
        self.redoable.clear();

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            state: EntryState::Executed,
            mutation,
        };
        let id = entry.id;
        debug!(
            "event=history_push module=history status=ok command={} command_id={} undo_depth={} discarded_redo={}",
            entry.word(),
            id,
            self.undoable.len() + 1,
            discarded
        );
        self.undoable.push(entry);
        id
    }

    /// Reverts the most recent executed entry and moves it to `redoable`.
    ///
    /// # Errors
    /// - `NothingToUndo` when `undoable` is empty; history is unchanged.
    /// - `UndoFailed` when the revert is rejected by the store; the entry is
    ///   dropped.
    pub fn undo(&mut self, model: &mut ModelManager) -> CommandResult<HistoryStep> {
        let Some(mut entry) = self.undoable.pop() else {
            debug!("event=history_undo module=history status=empty");
            return Err(CommandError::NothingToUndo);
        };

        if let Err(source) = entry.mutation.revert(model) {
            warn!(
                "event=history_undo module=history status=error command={} command_id={} error_code={}",
                entry.word(),
                entry.id,
                source.code()
            );
            return Err(CommandError::UndoFailed {
                command: entry.word(),
                source,
            });
        }

        entry.state = EntryState::Inverted;
        let step = HistoryStep {
            id: entry.id,
            command: entry.word(),
        };
        self.redoable.push(entry);
        debug!(
            "event=history_undo module=history status=ok command={} command_id={} undo_depth={} redo_depth={}",
            step.command,
            step.id,
            self.undoable.len(),
            self.redoable.len()
        );
        Ok(step)
    }

    /// Re-applies the most recently inverted entry and moves it back to
    /// `undoable`.
    ///
    /// # Errors
    /// - `NothingToRedo` when `redoable` is empty; history is unchanged.
    /// - `RedoFailed` when the store rejects the re-application; the entry
    ///   is dropped.
    pub fn redo(&mut self, model: &mut ModelManager) -> CommandResult<HistoryStep> {
        let Some(mut entry) = self.redoable.pop() else {
            debug!("event=history_redo module=history status=empty");
            return Err(CommandError::NothingToRedo);
        };

        if let Err(source) = entry.mutation.reapply(model) {
            warn!(
                "event=history_redo module=history status=error command={} command_id={} error_code={}",
                entry.word(),
                entry.id,
                source.code()
            );
            return Err(CommandError::RedoFailed {
                command: entry.word(),
                source,
            });
        }

        entry.state = EntryState::Executed;
        let step = HistoryStep {
            id: entry.id,
            command: entry.word(),
        };
        self.undoable.push(entry);
        debug!(
            "event=history_redo module=history status=ok command={} command_id={} undo_depth={} redo_depth={}",
            step.command,
            step.id,
            self.undoable.len(),
            self.redoable.len()
        );
        Ok(step)
    }

    pub fn can_undo(&self) -> bool {
        !self.undoable.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redoable.is_empty()
    }

    /// Undo-eligible entries, oldest first.
    pub fn undoable(&self) -> &[HistoryEntry] {
        &self.undoable
    }

    /// Redo-eligible entries, oldest first.
    pub fn redoable(&self) -> &[HistoryEntry] {
        &self.redoable
    }

    pub fn clear(&mut self) {
        self.undoable.clear();
        self.redoable.clear();
    }
}
