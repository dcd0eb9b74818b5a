//! Core data layer for the address book.
//! This crate owns the contact store, its live projection and the undo/redo
//! command history.

pub mod command;
pub mod config;
pub mod db;
pub mod email;
pub mod logging;
pub mod logic;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use command::{
    AddCommand, ClearCommand, Command, CommandContext, CommandError, CommandOutcome,
    CommandResult, DeleteCommand, DeleteTagCommand, EditCommand, EditContactDescriptor,
    EmailCommand, EntryState, FindCommand, HistoryEntry, Mutation, UndoRedoStack,
};
pub use config::{bootstrap, BootstrapError, CoreConfig};
pub use email::{Credentials, EmailError, Mailer, MessageDraft, OutboxMailer, SentMessage};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use logic::LogicManager;
pub use model::contact::{Address, Contact, Email, Name, Phone};
pub use model::tag::Tag;
pub use model::ValidationError;
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::model_manager::ModelManager;
pub use service::notify::{AddressBookChanged, ChangeObserver};
pub use service::projection::{ContactFilter, Projection, SortMode};
pub use service::storage::SaveOnChange;
pub use store::address_book::{AddressBook, TagRemoval};
pub use store::{StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
