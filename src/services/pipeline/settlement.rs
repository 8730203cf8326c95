//! Reward settlement.
//!
//! Two independent triggers: withdrawal receipts (read-only, private DM)
//! and failed challenges (release of the listing's excess deposit followed
//! by the public announcement). The release is attempted before the
//! announcement; a failed release suppresses the announcement so the
//! channel never signals a settlement that did not occur.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::U256;

use crate::models::{
	atomic_from_human, human_from_atomic, BridgeConfig, ChallengeResolved, Withdrawal,
};
use crate::services::accounts::AccountStore;
use crate::services::chain::{ChainClient, ChainWriter};
use crate::services::messenger::Messenger;
use crate::services::notifier::templates;
use crate::services::pipeline::error::PipelineError;

/// Reactor settling rewards for withdrawals and failed challenges.
pub struct RewardSettlement<S, C, M> {
	store: Arc<S>,
	writer: Arc<ChainWriter<C>>,
	messenger: Arc<M>,
	config: BridgeConfig,
}

impl<S, C, M> RewardSettlement<S, C, M>
where
	S: AccountStore,
	C: ChainClient,
	M: Messenger,
{
	pub fn new(
		store: Arc<S>,
		writer: Arc<ChainWriter<C>>,
		messenger: Arc<M>,
		config: BridgeConfig,
	) -> Self {
		Self {
			store,
			writer,
			messenger,
			config,
		}
	}

	/// Sends the owner a private receipt for a deposit withdrawal.
	///
	/// Read-only with respect to on-chain state. Withdrawals from wallets
	/// with no linked account are logged and ignored; they must not crash
	/// the pipeline.
	pub async fn handle_withdrawal(&self, event: &Withdrawal) -> Result<(), PipelineError> {
		let Some(account) = self.store.find_by_wallet(event.owner).await? else {
			tracing::warn!(owner = %event.owner, "Withdrawal from unknown owner");
			return Ok(());
		};

		let listing = self.listing_data(event).await?;
		let balance = self.writer.client().token_balance(event.owner).await?;

		let text = templates::withdrawal_receipt(
			&listing,
			&human_from_atomic(event.withdrew),
			&human_from_atomic(balance),
		);
		self.messenger.send_direct(account.social_id, &text).await?;
		Ok(())
	}

	/// Releases the listing's excess deposit after a failed challenge and
	/// announces the outcome.
	pub async fn handle_challenge_failed(
		&self,
		event: &ChallengeResolved,
	) -> Result<(), PipelineError> {
		let listing = self
			.writer
			.client()
			.listing(event.listing_hash)
			.await?
			.ok_or_else(|| {
				PipelineError::data_consistency(
					format!(
						"challenge {} resolved against nonexistent listing {}",
						event.challenge_id, event.listing_hash
					),
					Some(HashMap::from([(
						"listing_hash".to_string(),
						event.listing_hash.to_string(),
					)])),
				)
			})?;

		tracing::info!(data = %listing.data, "Challenge failed");

		let unstaked = listing.unstaked_deposit;
		let retention = atomic_from_human(self.config.min_deposit);
		if unstaked > retention {
			let reward = unstaked - retention;
			tracing::info!(
				data = %listing.data,
				reward = %reward,
				"Unstaked tokens available, releasing"
			);
			self.writer
				.release_confirmed(event.listing_hash, reward)
				.await?;
		} else if unstaked > U256::ZERO {
			// Nothing above the retention floor to release
			tracing::warn!(
				data = %listing.data,
				unstaked = %unstaked,
				"Unstaked deposit at or below the retention floor, skipping release"
			);
		}

		self.messenger
			.send_post(&templates::challenge_failed(&listing.data))
			.await?;
		Ok(())
	}

	async fn listing_data(&self, event: &Withdrawal) -> Result<String, PipelineError> {
		match self.writer.client().listing(event.listing_hash).await? {
			Some(listing) => Ok(listing.data),
			None => Err(PipelineError::data_consistency(
				format!(
					"withdrawal references nonexistent listing {}",
					event.listing_hash
				),
				None,
			)),
		}
	}
}
