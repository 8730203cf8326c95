//! Notification emitter.
//!
//! Stateless mapping from a decoded event plus resolved auxiliary data to
//! exactly one outbound public post. The announcer resolves the applicant's
//! linked account for application events (absence selects the degraded
//! template) and verifies listing existence where the event is meaningless
//! without it.

pub mod templates;

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::B256;

use crate::models::{human_from_atomic, Application, Challenge, ListingEvent};
use crate::services::accounts::AccountStore;
use crate::services::chain::ChainClient;
use crate::services::messenger::Messenger;
use crate::services::pipeline::error::PipelineError;

/// Maps registry lifecycle events to public announcements.
pub struct Announcer<S, C, M> {
	store: Arc<S>,
	chain: Arc<C>,
	messenger: Arc<M>,
}

impl<S, C, M> Announcer<S, C, M>
where
	S: AccountStore,
	C: ChainClient,
	M: Messenger,
{
	pub fn new(store: Arc<S>, chain: Arc<C>, messenger: Arc<M>) -> Self {
		Self {
			store,
			chain,
			messenger,
		}
	}

	/// Announces a new application, including the applicant's handle when
	/// their wallet is linked to an account.
	pub async fn announce_application(&self, event: &Application) -> Result<(), PipelineError> {
		tracing::info!(
			applicant = %event.applicant,
			listing = %event.listing_hash,
			data = %event.data,
			"New application"
		);

		let account = self.store.find_by_wallet(event.applicant).await?;
		let deposit = human_from_atomic(event.deposit);

		let text = match account {
			Some(account) => {
				templates::application_with_handle(&account.handle, &event.data, &deposit)
			}
			None => templates::application_without_handle(&event.data, &deposit),
		};

		self.messenger.send_post(&text).await?;
		Ok(())
	}

	/// Announces a new challenge.
	///
	/// A challenge cannot precede its listing; a missing listing is
	/// upstream state corruption and surfaces as a hard error.
	pub async fn announce_challenge(&self, event: &Challenge) -> Result<(), PipelineError> {
		let listing = self.chain.listing(event.listing_hash).await?;
		if listing.is_none() {
			return Err(PipelineError::data_consistency(
				format!(
					"challenge {} references nonexistent listing {}",
					event.challenge_id, event.listing_hash
				),
				Some(HashMap::from([(
					"listing_hash".to_string(),
					event.listing_hash.to_string(),
				)])),
			));
		}

		tracing::info!(listing = %event.listing_hash, data = %event.data, "New challenge");
		self.messenger
			.send_post(&templates::new_challenge(&event.data))
			.await?;
		Ok(())
	}

	/// Announces a whitelisted application.
	pub async fn announce_whitelisted(&self, event: &ListingEvent) -> Result<(), PipelineError> {
		let data = self.listing_data(event.listing_hash).await?;
		tracing::info!(data = %data, "Application whitelisted");
		self.messenger
			.send_post(&templates::application_whitelisted(&data))
			.await?;
		Ok(())
	}

	/// Announces a removed application.
	pub async fn announce_removed(&self, event: &ListingEvent) -> Result<(), PipelineError> {
		let data = self.listing_data(event.listing_hash).await?;
		tracing::info!(data = %data, "Application removed");
		self.messenger
			.send_post(&templates::application_removed(&data))
			.await?;
		Ok(())
	}

	/// Announces a successful challenge.
	pub async fn announce_challenge_succeeded(
		&self,
		listing_hash: B256,
	) -> Result<(), PipelineError> {
		let data = self.listing_data(listing_hash).await?;
		tracing::info!(data = %data, "Challenge succeeded");
		self.messenger
			.send_post(&templates::challenge_succeeded(&data))
			.await?;
		Ok(())
	}

	/// Resolves a listing's display data, surfacing a consistency error
	/// when the registry has no such entry.
	pub async fn listing_data(&self, listing_hash: B256) -> Result<String, PipelineError> {
		match self.chain.listing(listing_hash).await? {
			Some(listing) => Ok(listing.data),
			None => Err(PipelineError::data_consistency(
				format!("no listing found for hash {}", listing_hash),
				None,
			)),
		}
	}
}
