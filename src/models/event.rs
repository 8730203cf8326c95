//! Raw chain log records and the decoded domain event union.

use alloy::primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A raw log record as delivered by the chain log subscription.
///
/// Immutable and sourced from the chain; the pipeline never mutates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLogEvent {
	/// Address of the emitting contract
	pub address: Address,

	/// Ordered indexed topics; the first identifies the event signature
	pub topics: Vec<B256>,

	/// Opaque ABI-encoded payload bytes
	pub data: Bytes,

	/// Number of the block containing the log
	pub block_number: u64,

	/// Hash of the transaction that emitted the log
	pub transaction_hash: B256,

	/// Index of the log within its block
	pub log_index: u64,
}

impl RawLogEvent {
	/// Returns the identifier used by the processed-event ledger.
	///
	/// A transaction hash plus log index uniquely identifies a log on the
	/// canonical chain, so redelivered logs map to the same id.
	pub fn event_id(&self) -> String {
		format!("{:#x}-{}", self.transaction_hash, self.log_index)
	}
}

/// Decoded registry and wallet-factory events.
///
/// Closed union: the dispatcher matches exhaustively, so a new event type is
/// a compile-time-checked change.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
	/// A custodial wallet was deployed by the wallet factory
	WalletInstantiated(WalletInstantiated),

	/// Tokens were withdrawn from a listing's deposit
	Withdrawal(Withdrawal),

	/// A new listing application was submitted
	Application(Application),

	/// A listing was challenged
	Challenge(Challenge),

	/// An application passed onto the registry
	ApplicationWhitelisted(ListingEvent),

	/// A challenge vote resolved against the listing
	ChallengeSucceeded(ChallengeResolved),

	/// A challenge vote resolved in the listing's favor
	ChallengeFailed(ChallengeResolved),

	/// A listing was removed from the registry
	ApplicationRemoved(ListingEvent),
}

impl DomainEvent {
	/// Short lowercase name used for logging and metrics labels.
	pub fn kind(&self) -> &'static str {
		match self {
			DomainEvent::WalletInstantiated(_) => "wallet_instantiated",
			DomainEvent::Withdrawal(_) => "withdrawal",
			DomainEvent::Application(_) => "application",
			DomainEvent::Challenge(_) => "challenge",
			DomainEvent::ApplicationWhitelisted(_) => "application_whitelisted",
			DomainEvent::ChallengeSucceeded(_) => "challenge_succeeded",
			DomainEvent::ChallengeFailed(_) => "challenge_failed",
			DomainEvent::ApplicationRemoved(_) => "application_removed",
		}
	}

	/// Whether handling this event moves tokens or mutates off-chain state.
	///
	/// Only these variants consult the processed-event ledger; purely
	/// informational notifications are safe to re-emit on redelivery.
	pub fn is_state_mutating(&self) -> bool {
		matches!(
			self,
			DomainEvent::WalletInstantiated(_) | DomainEvent::ChallengeFailed(_)
		)
	}
}

/// Payload of the wallet factory's instantiation event.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletInstantiated {
	/// Address that requested the deployment
	pub sender: Address,

	/// Address of the deployed custodial wallet
	pub wallet: Address,

	/// Factory identifier correlating the deployment with a pending account
	pub identifier: u64,
}

/// Payload of the registry's withdrawal event.
#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal {
	/// Content hash of the listing the deposit belongs to
	pub listing_hash: B256,

	/// Atomic amount withdrawn
	pub withdrew: U256,

	/// Atomic deposit remaining after the withdrawal
	pub new_total: U256,

	/// Wallet the tokens were sent to
	pub owner: Address,
}

/// Payload of the registry's application event.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
	/// Content hash identifying the listing
	pub listing_hash: B256,

	/// Atomic deposit staked with the application
	pub deposit: U256,

	/// Unix timestamp at which an unchallenged application whitelists
	pub app_end_date: U256,

	/// Free-text listing display data (the nominee's handle)
	pub data: String,

	/// Wallet that submitted the application
	pub applicant: Address,
}

/// Payload of the registry's challenge event.
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
	/// Content hash of the challenged listing
	pub listing_hash: B256,

	/// Identifier of the poll resolving the challenge
	pub challenge_id: U256,

	/// Free-text listing display data
	pub data: String,

	/// Unix timestamp ending the commit phase
	pub commit_end_date: U256,

	/// Unix timestamp ending the reveal phase
	pub reveal_end_date: U256,

	/// Wallet that raised the challenge
	pub challenger: Address,
}

/// Payload of listing-only registry events (whitelisted, removed).
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEvent {
	/// Content hash identifying the listing
	pub listing_hash: B256,
}

/// Payload of challenge resolution events (succeeded, failed).
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeResolved {
	/// Content hash of the listing the challenge targeted
	pub listing_hash: B256,

	/// Identifier of the resolved poll
	pub challenge_id: U256,

	/// Atomic reward pool distributed to winning voters
	pub reward_pool: U256,

	/// Atomic total of tokens revealed on the winning side
	pub total_tokens: U256,
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::b256;

	#[test]
	fn test_event_id_format() {
		let event = RawLogEvent {
			address: Address::ZERO,
			topics: vec![],
			data: Bytes::new(),
			block_number: 12,
			transaction_hash: b256!(
				"00000000000000000000000000000000000000000000000000000000000000aa"
			),
			log_index: 3,
		};

		assert_eq!(
			event.event_id(),
			"0x00000000000000000000000000000000000000000000000000000000000000aa-3"
		);
	}

	#[test]
	fn test_state_mutating_variants() {
		let wallet = DomainEvent::WalletInstantiated(WalletInstantiated {
			sender: Address::ZERO,
			wallet: Address::ZERO,
			identifier: 1,
		});
		let whitelisted = DomainEvent::ApplicationWhitelisted(ListingEvent {
			listing_hash: B256::ZERO,
		});

		assert!(wallet.is_state_mutating());
		assert!(!whitelisted.is_state_mutating());
	}
}
