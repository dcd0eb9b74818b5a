//! Model manager: the single mutation gate over the record store.
//!
//! # Responsibility
//! - Apply every store mutation and notify observers exactly once per
//!   successful mutation.
//! - Hold the active filter and sort mode and derive the live projection.
//! - Forward email actions to the configured mailer.
//!
//! # Invariants
//! - Store errors are returned unchanged; a failed mutation notifies nobody
//!   and leaves the store untouched.
//! - Notifications are sent after the store reflects the mutation and
//!   before the mutating call returns.
//! - Filter and sort changes never notify observers.

use crate::email::{Credentials, EmailError, Mailer, MessageDraft, OutboxMailer, SentMessage};
use crate::model::contact::Contact;
use crate::model::tag::Tag;
use crate::service::notify::{AddressBookChanged, ChangeObserver};
use crate::service::projection::{ContactFilter, Projection, SortMode};
use crate::store::address_book::{AddressBook, TagRemoval};
use crate::store::StoreResult;
use log::{debug, warn};
use std::fmt::{Debug, Formatter};

/// Owner of the canonical store and its projection settings.
pub struct ModelManager {
    book: AddressBook,
    filter: ContactFilter,
    sort: SortMode,
    revision: u64,
    observers: Vec<Box<dyn ChangeObserver>>,
    mailer: Box<dyn Mailer>,
}

impl ModelManager {
    /// Creates a manager over `book` with an in-process outbox mailer.
    pub fn new(book: AddressBook) -> Self {
        Self::with_mailer(book, Box::new(OutboxMailer::new()))
    }

    pub fn with_mailer(book: AddressBook, mailer: Box<dyn Mailer>) -> Self {
        debug!(
            "event=model_init module=model status=ok size={}",
            book.len()
        );
        Self {
            book,
            filter: ContactFilter::show_all(),
            sort: SortMode::default(),
            revision: 0,
            observers: Vec::new(),
            mailer,
        }
    }

    /// Registers a change observer; it only sees later mutations.
    pub fn add_observer(&mut self, observer: impl ChangeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn address_book(&self) -> &AddressBook {
        &self.book
    }

    /// Number of successful mutations applied through this manager.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adds a contact and resets the filter so the new contact is visible.
    pub fn add_contact(&mut self, contact: Contact) -> StoreResult<()> {
        let result = self.book.add(contact);
        if result.is_ok() {
            self.filter = ContactFilter::show_all();
        }
        self.finish("contact_add", result)
    }

    /// Removes a contact; returns its former store position and value.
    pub fn delete_contact(&mut self, target: &Contact) -> StoreResult<(usize, Contact)> {
        let result = self.book.remove(target);
        self.finish("contact_delete", result)
    }

    /// Replaces `target` in place; returns the previous stored value.
    pub fn update_contact(&mut self, target: &Contact, edited: Contact) -> StoreResult<Contact> {
        let result = self.book.replace(target, edited);
        self.finish("contact_update", result)
    }

    /// Re-inserts a contact at a store position.
    pub fn restore_contact(&mut self, position: usize, contact: Contact) -> StoreResult<()> {
        let result = self.book.insert_at(position, contact);
        self.finish("contact_restore", result)
    }

    /// Applies a batch of replacements as one mutation.
    pub fn replace_contacts(&mut self, pairs: &[(Contact, Contact)]) -> StoreResult<()> {
        let result = self.book.replace_all(pairs);
        self.finish("contact_replace_batch", result)
    }

    /// Removes `tag` from every contact as one mutation.
    ///
    /// The active filter is left as it is.
    /// Fails with `TagNotFound`, without notifying, when no contact carries
    /// `tag`.
    pub fn remove_tag_everywhere(&mut self, tag: &Tag) -> StoreResult<Vec<TagRemoval>> {
        let result = self.book.remove_tag_everywhere(tag);
        self.finish("tag_remove_everywhere", result)
    }

    /// Replaces the whole store; returns the previous contents.
    pub fn reset_data(&mut self, book: AddressBook) -> AddressBook {
        let previous = std::mem::replace(&mut self.book, book);
        self.notify("address_book_reset");
        previous
    }

    pub fn set_filter(&mut self, filter: ContactFilter) {
        debug!(
            "event=filter_set module=model status=ok filter={}",
            filter.description()
        );
        self.filter = filter;
    }

    pub fn show_all(&mut self) {
        self.set_filter(ContactFilter::show_all());
    }

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        debug!("event=sort_set module=model status=ok sort={}", sort.as_str());
        self.sort = sort;
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    /// Live filtered-then-sorted view, derived on every call.
    pub fn projection(&self) -> Projection<'_> {
        Projection::derive(&self.book, &self.filter, self.sort)
    }

    pub fn login_email(&mut self, credentials: Credentials) -> Result<(), EmailError> {
        self.mailer.login(credentials)
    }

    /// Composes `draft` and, when `send` is set, sends it.
    pub fn send_email(
        &mut self,
        draft: MessageDraft,
        send: bool,
    ) -> Result<Option<SentMessage>, EmailError> {
        self.mailer.compose(draft);
        if !send {
            return Ok(None);
        }
        self.mailer.send().map(Some)
    }

    pub fn email_status(&self) -> String {
        self.mailer.status()
    }

    fn finish<T>(&mut self, event: &'static str, result: StoreResult<T>) -> StoreResult<T> {
        match result {
            Ok(value) => {
                self.notify(event);
                Ok(value)
            }
            Err(err) => {
                warn!(
                    "event={event} module=model status=error error_code={} revision={}",
                    err.code(),
                    self.revision
                );
                Err(err)
            }
        }
    }

    fn notify(&mut self, event: &'static str) {
        self.revision += 1;
        debug!(
            "event={event} module=model status=ok revision={} size={} observers={}",
            self.revision,
            self.book.len(),
            self.observers.len()
        );
        let payload = AddressBookChanged {
            revision: self.revision,
            book: &self.book,
        };
        for observer in self.observers.iter_mut() {
            observer.address_book_changed(&payload);
        }
    }
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(AddressBook::new())
    }
}

impl Debug for ModelManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelManager")
            .field("book", &self.book)
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
