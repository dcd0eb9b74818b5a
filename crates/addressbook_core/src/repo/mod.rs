//! Repository layer for address book persistence.
//!
//! # Responsibility
//! - Define the snapshot persistence contract used by the save-on-change
//!   observer.
//! - Keep SQL details out of the model and command layers.
//!
//! # Invariants
//! - Loaded snapshots are re-validated field by field and for uniqueness.

pub mod contact_repo;
