//! Event-reaction pipeline.
//!
//! Consumes raw chain logs one at a time, in delivery order: decode into a
//! typed domain event, consult the processed-event ledger for
//! state-mutating variants, route to exactly one reactor, and record the
//! event id once the reactor succeeds. A failure handling one event is
//! logged with its trace id and never halts the stream.

pub mod error;
pub mod ledger;
mod provisioner;
mod settlement;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::models::{BridgeConfig, DomainEvent, RawLogEvent};
use crate::services::accounts::AccountStore;
use crate::services::chain::{ChainClient, ChainWriter};
use crate::services::decoder::EventDecoder;
use crate::services::messenger::Messenger;
use crate::services::notifier::Announcer;
use crate::utils::logging::error::TraceableError;
use crate::utils::metrics::{EVENTS_DECODED, EVENTS_PROCESSED};

use error::PipelineError;
use ledger::EventLedger;
pub use provisioner::WalletProvisioner;
pub use settlement::RewardSettlement;

/// Disposition of one raw log after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
	/// Decoded and handled by its reactor
	Handled,
	/// State-mutating event already recorded in the ledger; skipped
	Duplicate,
}

/// Dispatcher routing each decoded event to exactly one reactor.
pub struct EventPipeline<S, C, M, L> {
	decoder: EventDecoder,
	ledger: Arc<L>,
	provisioner: WalletProvisioner<S, C, M>,
	settlement: RewardSettlement<S, C, M>,
	announcer: Announcer<S, C, M>,
}

impl<S, C, M, L> EventPipeline<S, C, M, L>
where
	S: AccountStore,
	C: ChainClient,
	M: Messenger,
	L: EventLedger,
{
	/// Wires the pipeline from its collaborators and configuration.
	///
	/// All custodial submissions share one [`ChainWriter`], so mint,
	/// deposit and release transactions from the single sender key are
	/// serialized across reactors.
	pub fn new(
		store: Arc<S>,
		chain: Arc<C>,
		messenger: Arc<M>,
		ledger: Arc<L>,
		config: BridgeConfig,
	) -> Self {
		let writer = Arc::new(ChainWriter::new(chain.clone(), config.confirmation.clone()));
		Self {
			decoder: EventDecoder::new(),
			ledger,
			provisioner: WalletProvisioner::new(
				store.clone(),
				writer.clone(),
				messenger.clone(),
				config.clone(),
			),
			settlement: RewardSettlement::new(
				store.clone(),
				writer,
				messenger.clone(),
				config,
			),
			announcer: Announcer::new(store, chain, messenger),
		}
	}

	/// Processes one raw log to completion.
	pub async fn process(&self, raw: &RawLogEvent) -> Result<ProcessOutcome, PipelineError> {
		let event = match self.decoder.decode(raw) {
			Ok(event) => event,
			Err(e) => {
				EVENTS_PROCESSED.with_label_values(&["decode_failed"]).inc();
				return Err(e.into());
			}
		};
		EVENTS_DECODED.with_label_values(&[event.kind()]).inc();

		let event_id = raw.event_id();
		if event.is_state_mutating() {
			let seen = self
				.ledger
				.seen(&event_id)
				.await
				.map_err(|e| PipelineError::ledger("ledger lookup failed", Some(e.into())))?;
			if seen {
				tracing::warn!(event_id = %event_id, kind = event.kind(), "Duplicate event, skipping");
				EVENTS_PROCESSED.with_label_values(&["duplicate"]).inc();
				return Ok(ProcessOutcome::Duplicate);
			}
		}

		match self.dispatch(&event).await {
			Ok(()) => {
				if event.is_state_mutating() {
					self.ledger
						.record(&event_id)
						.await
						.map_err(|e| PipelineError::ledger("ledger record failed", Some(e.into())))?;
				}
				EVENTS_PROCESSED.with_label_values(&["handled"]).inc();
				Ok(ProcessOutcome::Handled)
			}
			Err(e) => {
				EVENTS_PROCESSED.with_label_values(&["failed"]).inc();
				Err(e)
			}
		}
	}

	/// Routes a decoded event to its reactor. Exhaustive by construction:
	/// adding a domain event variant without a route fails to compile.
	async fn dispatch(&self, event: &DomainEvent) -> Result<(), PipelineError> {
		match event {
			DomainEvent::WalletInstantiated(e) => {
				self.provisioner.handle_wallet_instantiated(e).await
			}
			DomainEvent::Withdrawal(e) => self.settlement.handle_withdrawal(e).await,
			DomainEvent::ChallengeFailed(e) => self.settlement.handle_challenge_failed(e).await,
			DomainEvent::Application(e) => self.announcer.announce_application(e).await,
			DomainEvent::Challenge(e) => self.announcer.announce_challenge(e).await,
			DomainEvent::ApplicationWhitelisted(e) => {
				self.announcer.announce_whitelisted(e).await
			}
			DomainEvent::ApplicationRemoved(e) => self.announcer.announce_removed(e).await,
			DomainEvent::ChallengeSucceeded(e) => {
				self.announcer
					.announce_challenge_succeeded(e.listing_hash)
					.await
			}
		}
	}

	/// Drains a log stream, one event at a time, in delivery order.
	///
	/// Per-event failures (including decode failures) are logged with
	/// their trace id and the stream continues. Returns when the sender
	/// side of the channel closes.
	pub async fn run(&self, mut events: mpsc::Receiver<RawLogEvent>) {
		while let Some(raw) = events.recv().await {
			if let Err(e) = self.process(&raw).await {
				tracing::error!(
					event_id = %raw.event_id(),
					trace_id = %e.trace_id(),
					kind = e.kind(),
					error = %e,
					"Event handler failed"
				);
			}
		}
		tracing::info!("Event stream closed, pipeline stopping");
	}
}
