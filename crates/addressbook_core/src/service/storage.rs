//! Save-on-change persistence observer.
//!
//! # Responsibility
//! - Write the full address book snapshot after every store change.
//!
//! # Invariants
//! - Persistence failures are logged and kept for inspection; they never
//!   reach the model manager or roll back the in-memory store.

use crate::repo::contact_repo::{ContactRepository, RepoError};
use crate::service::notify::{AddressBookChanged, ChangeObserver};
use log::{debug, error};
use std::time::Instant;

/// Observer saving each notified snapshot through a repository.
pub struct SaveOnChange<R: ContactRepository> {
    repo: R,
    saved_revision: Option<u64>,
    last_error: Option<RepoError>,
}

impl<R: ContactRepository> SaveOnChange<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            saved_revision: None,
            last_error: None,
        }
    }

    /// Revision of the most recent successful save.
    pub fn saved_revision(&self) -> Option<u64> {
        self.saved_revision
    }

    pub fn last_error(&self) -> Option<&RepoError> {
        self.last_error.as_ref()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

impl<R: ContactRepository> ChangeObserver for SaveOnChange<R> {
    fn address_book_changed(&mut self, event: &AddressBookChanged<'_>) {
        let started_at = Instant::now();
        match self.repo.save_address_book(event.book) {
            Ok(()) => {
                debug!(
                    "event=snapshot_save module=storage status=ok revision={} size={} duration_ms={}",
                    event.revision,
                    event.book.len(),
                    started_at.elapsed().as_millis()
                );
                self.saved_revision = Some(event.revision);
                self.last_error = None;
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=storage status=error revision={} duration_ms={} error={}",
                    event.revision,
                    started_at.elapsed().as_millis(),
                    err
                );
                self.last_error = Some(err);
            }
        }
    }
}
