//! `morty-app` library crate.
//!
//! Composes the remote API and the local store behind [`repo::MainRepo`],
//! and exposes the [`view_model::CharacterViewModel`] state holder that the
//! `morty` binary drives. Modules are public for integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod repo;
pub mod view_model;
