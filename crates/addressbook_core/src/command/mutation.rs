//! Invertible record of one executed store mutation.
//!
//! # Invariants
//! - A `Mutation` only exists for a forward operation that already
//!   succeeded, and holds every value needed to reverse it.
//! - `revert` and `reapply` go through the model manager, so each successful
//!   call notifies observers exactly once.

use crate::model::contact::Contact;
use crate::model::tag::Tag;
use crate::service::model_manager::ModelManager;
use crate::store::address_book::{AddressBook, TagRemoval};
use crate::store::StoreResult;

/// Captured state of an undoable command after execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Added {
        contact: Contact,
    },
    Deleted {
        /// Store position the contact occupied before removal.
        position: usize,
        contact: Contact,
    },
    Edited {
        original: Contact,
        edited: Contact,
    },
    Cleared {
        previous: AddressBook,
    },
    TagRemoved {
        tag: Tag,
        removals: Vec<TagRemoval>,
    },
}

impl Mutation {
    /// Command word of the forward operation.
    pub fn word(&self) -> &'static str {
        match self {
            Self::Added { .. } => "add",
            Self::Deleted { .. } => "delete",
            Self::Edited { .. } => "edit",
            Self::Cleared { .. } => "clear",
            Self::TagRemoved { .. } => "deletetag",
        }
    }

    /// Reverses the forward effect against the current store.
    ///
    /// # Errors
    /// Returns the store error when the captured state no longer fits the
    /// store, e.g. the added contact was removed through another path.
    pub fn revert(&self, model: &mut ModelManager) -> StoreResult<()> {
        match self {
            Self::Added { contact } => model.delete_contact(contact).map(|_| ()),
            Self::Deleted { position, contact } => model.restore_contact(*position, contact.clone()),
            Self::Edited { original, edited } => {
                model.update_contact(edited, original.clone()).map(|_| ())
            }
            Self::Cleared { previous } => {
                model.reset_data(previous.clone());
                Ok(())
            }
            Self::TagRemoved { removals, .. } => {
                let pairs: Vec<(Contact, Contact)> = removals
                    .iter()
                    .map(|removal| (removal.after.clone(), removal.before.clone()))
                    .collect();
                model.replace_contacts(&pairs)
            }
        }
    }

    /// Applies the forward effect again and refreshes the captured state.
    pub fn reapply(&mut self, model: &mut ModelManager) -> StoreResult<()> {
        match self {
            Self::Added { contact } => model.add_contact(contact.clone()),
            Self::Deleted { position, contact } => {
                let (removed_at, _) = model.delete_contact(contact)?;
                *position = removed_at;
                Ok(())
            }
            Self::Edited { original, edited } => {
                model.update_contact(original, edited.clone()).map(|_| ())
            }
            Self::Cleared { previous } => {
                *previous = model.reset_data(AddressBook::new());
                Ok(())
            }
            Self::TagRemoved { tag, removals } => {
                *removals = model.remove_tag_everywhere(tag)?;
                Ok(())
            }
        }
    }
}
