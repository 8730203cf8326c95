//! Registry listing model.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// One entry in the token-curated registry.
///
/// Owned by the on-chain contract; this crate only reads it. The only way
/// the pipeline affects a listing is by submitting a release transaction
/// that the contract itself executes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
	/// Content hash identifying the listing
	pub hash: B256,

	/// Free-text display data (the nominee's handle)
	pub data: String,

	/// Wallet that owns the listing's deposit
	pub owner: Address,

	/// Whether the listing is currently on the whitelist
	pub whitelisted: bool,

	/// Atomic deposit not locked by an active challenge
	pub unstaked_deposit: U256,
}
