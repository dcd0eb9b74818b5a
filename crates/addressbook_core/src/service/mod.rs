//! Core services over the record store.
//!
//! # Responsibility
//! - Gate every store mutation through the model manager.
//! - Derive the live projection consumed by presentation code.
//! - Deliver change notifications to observers such as persistence.
//!
//! # Invariants
//! - No service mutates the store except through `ModelManager`.

pub mod model_manager;
pub mod notify;
pub mod projection;
pub mod storage;
