//! Change notification contract between the model manager and observers.
//!
//! # Invariants
//! - Observers are called synchronously, once per successful mutation, after
//!   the store already reflects it.
//! - Observers cannot fail the mutation; they return nothing.

use crate::store::address_book::AddressBook;

/// Payload delivered after every successful store mutation.
#[derive(Debug, Clone, Copy)]
pub struct AddressBookChanged<'book> {
    /// Count of successful mutations so far, starting at 1.
    pub revision: u64,
    /// Full canonical store after the mutation.
    pub book: &'book AddressBook,
}

/// Receiver of store change notifications (e.g. the persistence layer).
pub trait ChangeObserver {
    fn address_book_changed(&mut self, event: &AddressBookChanged<'_>);
}

impl<F> ChangeObserver for F
where
    F: FnMut(&AddressBookChanged<'_>),
{
    fn address_book_changed(&mut self, event: &AddressBookChanged<'_>) {
        self(event)
    }
}
