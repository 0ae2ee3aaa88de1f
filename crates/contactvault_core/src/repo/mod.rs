//! Repository layer: storage contracts and their SQLite implementations.
//!
//! # Invariants
//! - Repository writes enforce `Contact::validate()` before persistence.
//! - Repository APIs report `NotFound` separately from transport errors.

pub mod contact_repo;
