//! Contact commands.
//!
//! Index-addressed commands resolve their target against the current
//! projection at execution time; the captured `Mutation` then refers to the
//! contact itself, so undo/redo no longer depend on what is visible.

use crate::command::mutation::Mutation;
use crate::command::{CommandError, CommandOutcome, CommandResult};
use crate::model::contact::{Address, Contact, Email, Name, Phone};
use crate::model::tag::Tag;
use crate::service::model_manager::ModelManager;
use crate::service::projection::ContactFilter;
use crate::store::StoreError;
use std::collections::BTreeSet;

type Executed = (Mutation, CommandOutcome);

fn visible_target(model: &ModelManager, index: usize) -> CommandResult<Contact> {
    let projection = model.projection();
    projection
        .get(index)
        .cloned()
        .ok_or(CommandError::InvalidIndex {
            index,
            visible: projection.len(),
        })
}

/// Adds one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    contact: Contact,
}

impl AddCommand {
    pub fn new(contact: Contact) -> Self {
        Self { contact }
    }

    pub(crate) fn execute(self, model: &mut ModelManager) -> CommandResult<Executed> {
        model.add_contact(self.contact.clone())?;
        let outcome = CommandOutcome::new(format!("New contact added: {}", self.contact.name));
        Ok((
            Mutation::Added {
                contact: self.contact,
            },
            outcome,
        ))
    }
}

/// Deletes the contact at a zero-based projection index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommand {
    index: usize,
}

impl DeleteCommand {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub(crate) fn execute(self, model: &mut ModelManager) -> CommandResult<Executed> {
        let target = visible_target(model, self.index)?;
        let (position, contact) = model.delete_contact(&target)?;
        let outcome = CommandOutcome::new(format!("Deleted contact: {}", contact.name));
        Ok((Mutation::Deleted { position, contact }, outcome))
    }
}

/// Field changes applied by `EditCommand`; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditContactDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    /// Replaces the whole tag set when present.
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditContactDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.tags.is_some()
    }

    /// Returns `contact` with the described changes applied.
    pub fn apply(&self, contact: &Contact) -> Contact {
        Contact {
            name: self.name.clone().unwrap_or_else(|| contact.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| contact.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| contact.email.clone()),
            address: self
                .address
                .clone()
                .unwrap_or_else(|| contact.address.clone()),
            tags: self.tags.clone().unwrap_or_else(|| contact.tags.clone()),
        }
    }
}

/// Replaces the contact at a zero-based projection index with an edited copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    index: usize,
    descriptor: EditContactDescriptor,
}

impl EditCommand {
    pub fn new(index: usize, descriptor: EditContactDescriptor) -> Self {
        Self { index, descriptor }
    }

    pub(crate) fn execute(self, model: &mut ModelManager) -> CommandResult<Executed> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::NotEdited);
        }
        let target = visible_target(model, self.index)?;
        let edited = self.descriptor.apply(&target);
        let original = model.update_contact(&target, edited.clone())?;
        let outcome = CommandOutcome::new(format!("Edited contact: {}", edited.name));
        Ok((Mutation::Edited { original, edited }, outcome))
    }
}

/// Empties the address book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub(crate) fn execute(self, model: &mut ModelManager) -> CommandResult<Executed> {
        let previous = model.reset_data(Default::default());
        Ok((
            Mutation::Cleared { previous },
            CommandOutcome::new("Address book has been cleared!"),
        ))
    }
}

/// Removes one tag from every contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTagCommand {
    tag: Tag,
}

impl DeleteTagCommand {
    pub fn new(tag: Tag) -> Self {
        Self { tag }
    }

    pub(crate) fn execute(self, model: &mut ModelManager) -> CommandResult<Executed> {
        let removals = match model.remove_tag_everywhere(&self.tag) {
            Ok(removals) => removals,
            Err(StoreError::TagNotFound(tag)) => return Err(CommandError::TagNotFound(tag)),
            Err(err) => return Err(err.into()),
        };
        let outcome = CommandOutcome::new(format!(
            "Deleted tag {} from {} contacts",
            self.tag,
            removals.len()
        ));
        Ok((
            Mutation::TagRemoved {
                tag: self.tag,
                removals,
            },
            outcome,
        ))
    }
}

/// Shows contacts whose name contains any of the keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    keywords: Vec<String>,
}

impl FindCommand {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn execute(self, model: &mut ModelManager) -> CommandOutcome {
        model.set_filter(ContactFilter::name_contains_any(&self.keywords));
        CommandOutcome::new(format!("{} contacts listed!", model.projection().len()))
    }
}
