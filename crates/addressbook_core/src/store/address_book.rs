//! Address book record store.
//!
//! # Responsibility
//! - Provide add/remove/replace by identity-equivalent lookup.
//! - Provide the aggregate tag removal and batch replacement used by
//!   commands and their inverses.
//!
//! # Invariants
//! - Insertion order is the canonical order before projection.
//! - `replace` keeps the replaced contact's position.
//! - Aggregate operations are staged on a working copy and committed only
//!   when every step succeeds.

use crate::model::contact::Contact;
use crate::model::tag::Tag;
use crate::store::{StoreError, StoreResult};
use std::collections::BTreeSet;

/// Before/after pair recorded for one contact touched by tag removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRemoval {
    pub before: Contact,
    pub after: Contact,
}

/// Ordered, duplicate-free contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contacts: Vec<Contact>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an ordered list, rejecting duplicates.
    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> StoreResult<Self> {
        let mut book = Self::new();
        for contact in contacts {
            book.add(contact)?;
        }
        Ok(book)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Position of the identity-equivalent entry, if stored.
    pub fn position_of(&self, contact: &Contact) -> Option<usize> {
        self.contacts
            .iter()
            .position(|stored| stored.is_same_contact(contact))
    }

    pub fn contains(&self, contact: &Contact) -> bool {
        self.position_of(contact).is_some()
    }

    /// Tag vocabulary: every tag carried by at least one contact.
    pub fn tags(&self) -> BTreeSet<Tag> {
        self.contacts
            .iter()
            .flat_map(|contact| contact.tags.iter().cloned())
            .collect()
    }

    /// Appends a contact.
    ///
    /// # Errors
    /// - `DuplicateContact` when an identity-equivalent contact exists.
    pub fn add(&mut self, contact: Contact) -> StoreResult<()> {
        if self.contains(&contact) {
            return Err(StoreError::DuplicateContact(contact.name));
        }
        self.contacts.push(contact);
        Ok(())
    }

    /// Inserts a contact at `position`, clamped to the current length.
    ///
    /// # Errors
    /// - `DuplicateContact` when an identity-equivalent contact exists.
    pub fn insert_at(&mut self, position: usize, contact: Contact) -> StoreResult<()> {
        if self.contains(&contact) {
            return Err(StoreError::DuplicateContact(contact.name));
        }
        let position = position.min(self.contacts.len());
        self.contacts.insert(position, contact);
        Ok(())
    }

    /// Removes the identity-equivalent entry and returns it with its former
    /// position.
    ///
    /// # Errors
    /// - `ContactNotFound` when no identity-equivalent contact exists.
    pub fn remove(&mut self, contact: &Contact) -> StoreResult<(usize, Contact)> {
        let position = self
            .position_of(contact)
            .ok_or_else(|| StoreError::ContactNotFound(contact.name.clone()))?;
        let removed = self.contacts.remove(position);
        Ok((position, removed))
    }

    /// Swaps `target` for `replacement` in place and returns the previous
    /// stored value.
    ///
    /// # Errors
    /// - `ContactNotFound` when `target` is absent.
    /// - `DuplicateContact` when `replacement` collides with a different
    ///   stored contact.
    pub fn replace(&mut self, target: &Contact, replacement: Contact) -> StoreResult<Contact> {
        let position = self
            .position_of(target)
            .ok_or_else(|| StoreError::ContactNotFound(target.name.clone()))?;

        let collides = self
            .contacts
            .iter()
            .enumerate()
            .any(|(index, stored)| index != position && stored.is_same_contact(&replacement));
        if collides {
            return Err(StoreError::DuplicateContact(replacement.name));
        }

        Ok(std::mem::replace(&mut self.contacts[position], replacement))
    }

    /// Applies a batch of replacements in order, all or nothing.
    pub fn replace_all(&mut self, pairs: &[(Contact, Contact)]) -> StoreResult<()> {
        let mut staged = self.clone();
        for (target, replacement) in pairs {
            staged.replace(target, replacement.clone())?;
        }
        *self = staged;
        Ok(())
    }

    /// Removes `tag` from every contact carrying it.
    ///
    /// Contacts without the tag are untouched. The returned pairs are in
    /// store order.
    ///
    /// # Errors
    /// - `TagNotFound` when no contact carries `tag`; the store is unchanged.
    pub fn remove_tag_everywhere(&mut self, tag: &Tag) -> StoreResult<Vec<TagRemoval>> {
        let removals: Vec<TagRemoval> = self
            .contacts
            .iter()
            .filter_map(|contact| {
                contact.without_tag(tag).map(|after| TagRemoval {
                    before: contact.clone(),
                    after,
                })
            })
            .collect();
        if removals.is_empty() {
            return Err(StoreError::TagNotFound(tag.clone()));
        }

        let pairs: Vec<(Contact, Contact)> = removals
            .iter()
            .map(|removal| (removal.before.clone(), removal.after.clone()))
            .collect();
        self.replace_all(&pairs)?;
        Ok(removals)
    }

    /// Replaces the whole contents, rejecting input with duplicates.
    pub fn reset_data(&mut self, contacts: Vec<Contact>) -> StoreResult<()> {
        *self = Self::from_contacts(contacts)?;
        Ok(())
    }
}
