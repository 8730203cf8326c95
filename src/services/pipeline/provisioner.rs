//! Custodial wallet provisioner.
//!
//! Reacts to wallet factory instantiation events. Each step is a hard
//! precondition for the next: resolve the pending account, attach the
//! wallet address, mint the initial grant, then lock the vote stake into
//! escrow. The deposit is only valid once the mint is confirmed because
//! the wallet must hold sufficient balance. Any failure aborts the handler
//! and surfaces to the dispatcher; no compensating rollback is attempted.

use std::sync::Arc;

use crate::models::{atomic_from_human, human_from_atomic, BridgeConfig, WalletInstantiated};
use crate::services::accounts::AccountStore;
use crate::services::chain::{ChainClient, ChainWriter};
use crate::services::messenger::Messenger;
use crate::services::notifier::templates;
use crate::services::pipeline::error::PipelineError;

/// Reactor provisioning custodial wallets for pending accounts.
pub struct WalletProvisioner<S, C, M> {
	store: Arc<S>,
	writer: Arc<ChainWriter<C>>,
	messenger: Arc<M>,
	config: BridgeConfig,
}

impl<S, C, M> WalletProvisioner<S, C, M>
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

	/// Handles a wallet instantiation event end to end.
	pub async fn handle_wallet_instantiated(
		&self,
		event: &WalletInstantiated,
	) -> Result<(), PipelineError> {
		let Some(account) = self.store.find_by_factory_id(event.identifier).await? else {
			// Deployment belongs to an unrelated requester
			tracing::debug!(
				identifier = event.identifier,
				wallet = %event.wallet,
				"No pending account for factory identifier"
			);
			return Ok(());
		};

		self.store.attach_wallet(account.id, event.wallet).await?;
		tracing::info!(
			wallet = %event.wallet,
			handle = %account.handle,
			"Wallet linked to account"
		);

		let grant = atomic_from_human(self.config.initial_token_grant);
		self.writer.mint_confirmed(event.wallet, grant).await?;

		let stake = atomic_from_human(self.config.initial_vote_stake);
		self.writer.deposit_confirmed(event.wallet, stake).await?;

		if !self.config.preregistration {
			let balance = self.writer.client().token_balance(event.wallet).await?;
			let text = templates::wallet_confirmed(&human_from_atomic(balance));
			self.messenger.send_direct(account.social_id, &text).await?;
		}

		Ok(())
	}
}
