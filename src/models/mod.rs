//! Domain models and data structures for the registry bridge.
//!
//! This module contains the core data structures used throughout the crate:
//!
//! - `account`: linked social identities
//! - `amount`: atomic/human token amount conversion
//! - `config`: bridge configuration
//! - `event`: raw chain logs and the decoded domain event union
//! - `listing`: registry entries

mod account;
mod amount;
mod config;
mod event;
mod listing;

pub use account::Account;
pub use amount::{atomic_from_human, human_from_atomic, TOKEN_DECIMALS};
pub use config::{
	BridgeConfig, ConfirmationConfig, DEFAULT_INITIAL_TOKEN_GRANT, DEFAULT_INITIAL_VOTE_STAKE,
	DEFAULT_MIN_DEPOSIT, PREREGISTRATION_ENV,
};
pub use event::{
	Application, Challenge, ChallengeResolved, DomainEvent, ListingEvent, RawLogEvent,
	WalletInstantiated, Withdrawal,
};
pub use listing::Listing;
