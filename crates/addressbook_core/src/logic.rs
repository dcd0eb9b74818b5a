//! Command execution entry point.
//!
//! # Responsibility
//! - Own the model manager and the undo/redo history as one unit.
//! - Bind each incoming command to both before running it.
//!
//! # Invariants
//! - Nothing else holds mutable access to the model or the history while a
//!   command runs.

use crate::command::{Command, CommandContext, CommandOutcome, CommandResult, UndoRedoStack};
use crate::service::model_manager::ModelManager;
use log::{info, warn};
use std::time::Instant;

/// Model manager plus history, driven one command at a time.
#[derive(Debug, Default)]
pub struct LogicManager {
    model: ModelManager,
    history: UndoRedoStack,
}

impl LogicManager {
    pub fn new(model: ModelManager) -> Self {
        Self {
            model,
            history: UndoRedoStack::new(),
        }
    }

    /// Executes one command and reports its outcome.
    ///
    /// # Side effects
    /// - Emits one `command_execute` log event with duration and status.
    pub fn execute(&mut self, command: Command) -> CommandResult<CommandOutcome> {
        let started_at = Instant::now();
        let word = command.word();
        let mut ctx = CommandContext::new(&mut self.model, &mut self.history);
        let result = command.execute(&mut ctx);
        match &result {
            Ok(_) => info!(
                "event=command_execute module=logic status=ok command={word} duration_ms={} revision={}",
                started_at.elapsed().as_millis(),
                self.model.revision()
            ),
            Err(err) => warn!(
                "event=command_execute module=logic status=error command={word} duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result
    }

    pub fn model(&self) -> &ModelManager {
        &self.model
    }

    /// Mutable model access for presentation settings and observers.
    ///
    /// Store mutations made here bypass the history.
    pub fn model_mut(&mut self) -> &mut ModelManager {
        &mut self.model
    }

    pub fn history(&self) -> &UndoRedoStack {
        &self.history
    }
}
