//! Chain-write collaborator boundary.
//!
//! The [`ChainClient`] trait is the seam to the RPC transport and contract
//! bindings, which live outside this crate. [`ChainWriter`] layers the two
//! guarantees the pipeline needs on top of any client:
//!
//! - every submission goes through one mutex, because all custodial
//!   transactions share a sender key and its nonce sequence must be
//!   monotonic;
//! - confirmation waits are bounded: the status is polled a configured
//!   number of times at a configured interval and the result is a typed
//!   [`ConfirmationOutcome`] instead of an unbounded block.

pub mod error;

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{ConfirmationConfig, Listing};
use crate::utils::metrics::TRANSACTIONS_SUBMITTED;
use error::ChainError;

/// Handle to a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHandle(pub B256);

impl std::fmt::Display for TxHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:#x}", self.0)
	}
}

/// Status of a submitted transaction as reported by the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
	/// Not yet at the required confirmation depth
	Pending,
	/// Confirmed at the required depth
	Confirmed,
	/// Included and reverted, or dropped from the pool
	Rejected,
}

/// Result of a bounded confirmation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
	Confirmed,
	TimedOut,
	Rejected,
}

/// Interface to the chain RPC transport and contract bindings.
#[async_trait]
pub trait ChainClient: Send + Sync {
	/// Submits a mint crediting `amount` atomic tokens to `wallet`.
	async fn submit_mint(&self, wallet: Address, amount: U256) -> Result<TxHandle, ChainError>;

	/// Submits a deposit locking `amount` atomic tokens from `wallet` into
	/// the voting escrow contract.
	async fn submit_deposit(&self, wallet: Address, amount: U256) -> Result<TxHandle, ChainError>;

	/// Submits a release crediting `amount` atomic tokens to the listing's
	/// owner out of its unstaked deposit.
	async fn submit_release(
		&self,
		listing_hash: B256,
		amount: U256,
	) -> Result<TxHandle, ChainError>;

	/// Reads a wallet's atomic token balance.
	async fn token_balance(&self, wallet: Address) -> Result<U256, ChainError>;

	/// Reads a listing; `None` means the registry has no such entry.
	async fn listing(&self, listing_hash: B256) -> Result<Option<Listing>, ChainError>;

	/// Reads the current status of a submitted transaction.
	async fn transaction_status(&self, tx: &TxHandle) -> Result<TxStatus, ChainError>;
}

/// Serializing, confirmation-aware wrapper over a [`ChainClient`].
pub struct ChainWriter<C> {
	client: Arc<C>,
	submit_guard: Mutex<()>,
	confirmation: ConfirmationConfig,
}

impl<C: ChainClient> ChainWriter<C> {
	pub fn new(client: Arc<C>, confirmation: ConfirmationConfig) -> Self {
		Self {
			client,
			submit_guard: Mutex::new(()),
			confirmation,
		}
	}

	/// Read access to the wrapped client.
	pub fn client(&self) -> &C {
		&self.client
	}

	/// Submits a mint and waits for its confirmation.
	pub async fn mint_confirmed(&self, wallet: Address, amount: U256) -> Result<(), ChainError> {
		let tx = {
			let _guard = self.submit_guard.lock().await;
			self.client.submit_mint(wallet, amount).await?
		};
		TRANSACTIONS_SUBMITTED.with_label_values(&["mint"]).inc();
		tracing::debug!(tx = %tx, %wallet, "Submitted mint, awaiting confirmation");
		self.confirm(&tx).await
	}

	/// Submits an escrow deposit and waits for its confirmation.
	pub async fn deposit_confirmed(
		&self,
		wallet: Address,
		amount: U256,
	) -> Result<(), ChainError> {
		let tx = {
			let _guard = self.submit_guard.lock().await;
			self.client.submit_deposit(wallet, amount).await?
		};
		TRANSACTIONS_SUBMITTED.with_label_values(&["deposit"]).inc();
		tracing::debug!(tx = %tx, %wallet, "Submitted deposit, awaiting confirmation");
		self.confirm(&tx).await
	}

	/// Submits a reward release and waits for its confirmation.
	pub async fn release_confirmed(
		&self,
		listing_hash: B256,
		amount: U256,
	) -> Result<(), ChainError> {
		let tx = {
			let _guard = self.submit_guard.lock().await;
			self.client.submit_release(listing_hash, amount).await?
		};
		TRANSACTIONS_SUBMITTED.with_label_values(&["release"]).inc();
		tracing::debug!(tx = %tx, listing = %listing_hash, "Submitted release, awaiting confirmation");
		self.confirm(&tx).await
	}

	/// Polls a transaction's status until confirmed, rejected or the poll
	/// budget is exhausted.
	pub async fn await_confirmation(
		&self,
		tx: &TxHandle,
	) -> Result<ConfirmationOutcome, ChainError> {
		let interval = Duration::from_millis(self.confirmation.poll_interval_ms);
		for poll in 0..self.confirmation.max_polls {
			match self.client.transaction_status(tx).await? {
				TxStatus::Confirmed => return Ok(ConfirmationOutcome::Confirmed),
				TxStatus::Rejected => return Ok(ConfirmationOutcome::Rejected),
				TxStatus::Pending => {
					if poll + 1 < self.confirmation.max_polls {
						tokio::time::sleep(interval).await;
					}
				}
			}
		}
		Ok(ConfirmationOutcome::TimedOut)
	}

	async fn confirm(&self, tx: &TxHandle) -> Result<(), ChainError> {
		match self.await_confirmation(tx).await? {
			ConfirmationOutcome::Confirmed => Ok(()),
			ConfirmationOutcome::Rejected => Err(ChainError::rejected(tx.to_string(), None)),
			ConfirmationOutcome::TimedOut => Err(ChainError::confirmation_timeout(
				tx.to_string(),
				self.confirmation.max_polls,
				None,
			)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};

	/// Client whose transactions confirm after a fixed number of polls.
	struct SlowConfirmClient {
		polls_until_confirmed: u32,
		polls_seen: AtomicU32,
		reject: bool,
	}

	impl SlowConfirmClient {
		fn confirming_after(polls: u32) -> Self {
			Self {
				polls_until_confirmed: polls,
				polls_seen: AtomicU32::new(0),
				reject: false,
			}
		}

		fn rejecting() -> Self {
			Self {
				polls_until_confirmed: u32::MAX,
				polls_seen: AtomicU32::new(0),
				reject: true,
			}
		}
	}

	#[async_trait]
	impl ChainClient for SlowConfirmClient {
		async fn submit_mint(
			&self,
			_wallet: Address,
			_amount: U256,
		) -> Result<TxHandle, ChainError> {
			Ok(TxHandle(B256::repeat_byte(1)))
		}

		async fn submit_deposit(
			&self,
			_wallet: Address,
			_amount: U256,
		) -> Result<TxHandle, ChainError> {
			Ok(TxHandle(B256::repeat_byte(2)))
		}

		async fn submit_release(
			&self,
			_listing_hash: B256,
			_amount: U256,
		) -> Result<TxHandle, ChainError> {
			Ok(TxHandle(B256::repeat_byte(3)))
		}

		async fn token_balance(&self, _wallet: Address) -> Result<U256, ChainError> {
			Ok(U256::ZERO)
		}

		async fn listing(&self, _listing_hash: B256) -> Result<Option<Listing>, ChainError> {
			Ok(None)
		}

		async fn transaction_status(&self, _tx: &TxHandle) -> Result<TxStatus, ChainError> {
			if self.reject {
				return Ok(TxStatus::Rejected);
			}
			let seen = self.polls_seen.fetch_add(1, Ordering::SeqCst) + 1;
			if seen >= self.polls_until_confirmed {
				Ok(TxStatus::Confirmed)
			} else {
				Ok(TxStatus::Pending)
			}
		}
	}

	fn fast_policy(max_polls: u32) -> ConfirmationConfig {
		ConfirmationConfig {
			max_polls,
			poll_interval_ms: 0,
		}
	}

	#[tokio::test]
	async fn test_confirmation_within_budget() {
		let writer =
			ChainWriter::new(Arc::new(SlowConfirmClient::confirming_after(3)), fast_policy(5));
		let result = writer.mint_confirmed(Address::ZERO, U256::from(1)).await;
		assert!(result.is_ok());
	}

	#[tokio::test]
	async fn test_confirmation_budget_exhausted() {
		let writer =
			ChainWriter::new(Arc::new(SlowConfirmClient::confirming_after(10)), fast_policy(2));
		let error = writer
			.mint_confirmed(Address::ZERO, U256::from(1))
			.await
			.unwrap_err();
		assert!(error.is_confirmation_timeout());
	}

	#[tokio::test]
	async fn test_rejected_transaction_surfaces() {
		let writer = ChainWriter::new(Arc::new(SlowConfirmClient::rejecting()), fast_policy(3));
		let error = writer
			.deposit_confirmed(Address::ZERO, U256::from(1))
			.await
			.unwrap_err();
		assert!(matches!(error, ChainError::Rejected { .. }));
	}

	#[tokio::test]
	async fn test_await_confirmation_outcome() {
		let writer =
			ChainWriter::new(Arc::new(SlowConfirmClient::confirming_after(1)), fast_policy(1));
		let outcome = writer
			.await_confirmation(&TxHandle(B256::ZERO))
			.await
			.unwrap();
		assert_eq!(outcome, ConfirmationOutcome::Confirmed);
	}
}
