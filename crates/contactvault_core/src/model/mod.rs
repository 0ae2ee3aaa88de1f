//! Domain model for the address book.
//!
//! # Invariants
//! - Contacts are identified by name alone.
//! - Deletion is a hard delete; there are no tombstones or versions.

pub mod contact;
