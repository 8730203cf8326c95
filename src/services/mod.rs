//! Core services implementing the event-reaction pipeline.
//!
//! Contains the main business logic:
//!
//! - `accounts`: resolution of linked social accounts
//! - `chain`: chain-write collaborator boundary with serialized submission
//! - `decoder`: raw log to domain event decoding
//! - `messenger`: social-messaging collaborator boundary
//! - `notifier`: event to announcement mapping
//! - `pipeline`: dispatcher and the token-moving reactors

pub mod accounts;
pub mod chain;
pub mod decoder;
pub mod messenger;
pub mod notifier;
pub mod pipeline;
