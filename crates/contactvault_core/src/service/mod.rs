//! Use-case services over repository contracts.
//!
//! # Invariants
//! - Services never issue SQL directly.
//! - Interactive decisions arrive as caller-supplied closures.

pub mod contact_service;
