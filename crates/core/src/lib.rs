//! Shared domain types and pure logic for the character catalogue.
//!
//! Nothing in this crate performs I/O. The storage, network and
//! presentation layers all depend on it.

pub mod error;
pub mod quiz;
pub mod types;
pub mod validation;
pub mod versus;
