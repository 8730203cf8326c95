//! Bridges the on-chain lifecycle of a token-curated registry with an
//! off-chain social channel and a custodial wallet layer.
//!
//! The crate consumes raw chain log events, decodes them into typed domain
//! events, correlates them with linked social accounts, performs the
//! custodial token operations those events imply (minting, escrow deposit,
//! reward release) and emits the resulting public or private
//! notifications. It is built to be safe under at-least-once log delivery
//! and variable confirmation latency: token-moving reactors are guarded by
//! a durable processed-event ledger, every custodial submission is
//! serialized through one writer, and confirmation waits are bounded.
//!
//! The log subscription transport, the real messaging client and the
//! account storage backend are external collaborators reached through the
//! traits in [`services`].

pub mod models;
pub mod services;
pub mod utils;
