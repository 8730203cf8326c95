//! Linked social account model.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A social identity linked to the registry.
///
/// Created by the external onboarding flow; the pipeline only ever attaches
/// a wallet address to an account, exactly once, and never deletes one. At
/// most one account may claim a given wallet address or factory identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
	/// Stable account id assigned by the account store
	pub id: i64,

	/// Social-network user id, used to address direct messages
	pub social_id: u64,

	/// Social-network handle, used in public announcements
	pub handle: String,

	/// Custodial wallet address, set once by the provisioner
	pub wallet_address: Option<Address>,

	/// Factory identifier correlating a not-yet-created wallet with this
	/// account
	pub wallet_factory_id: Option<u64>,
}

impl Account {
	/// Creates an account awaiting its custodial wallet deployment.
	pub fn pending(id: i64, social_id: u64, handle: impl Into<String>, factory_id: u64) -> Self {
		Self {
			id,
			social_id,
			handle: handle.into(),
			wallet_address: None,
			wallet_factory_id: Some(factory_id),
		}
	}
}
