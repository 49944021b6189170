//! Table change notification for the character catalogue.
//!
//! - [`ChangeBus`]: in-process fan-out of [`TableChange`]s backed by
//!   `tokio::sync::broadcast`. Every change carries the full table
//!   snapshot taken right after the mutation committed.
//! - [`Subscription`]: the continuous producer handed to observers. It
//!   yields the snapshot current at subscription time, then one snapshot
//!   per change.

pub mod bus;
pub mod subscription;

pub use bus::{ChangeBus, ChangeKind, TableChange};
pub use subscription::Subscription;
