//! Pipeline error taxonomy.
//!
//! Each reactor returns success or a single [`PipelineError`] to the
//! dispatcher, which logs it (with its trace id) and moves on to the next
//! event. Legitimate absence of linkage is never represented here; lookups
//! return `Option` for that.

use std::collections::HashMap;

use thiserror::Error;

use crate::services::accounts::error::StoreError;
use crate::services::chain::error::ChainError;
use crate::services::decoder::error::DecodeError;
use crate::services::messenger::error::MessengerError;
use crate::utils::logging::error::{ErrorContext, TraceableError};

/// Unified error surfaced by the event-reaction pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
	/// Malformed log payload; the event is dropped and the stream continues
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Transaction submission or confirmation failure
	#[error(transparent)]
	Transaction(#[from] ChainError),

	/// Account store backend failure or linkage anomaly
	#[error(transparent)]
	Store(#[from] StoreError),

	/// Notification delivery failure; never undoes committed chain effects
	#[error(transparent)]
	Messaging(#[from] MessengerError),

	/// Upstream state corruption, e.g. a challenge referencing a listing
	/// the registry does not have
	#[error("Data consistency error: {0}")]
	DataConsistency(Box<ErrorContext>),

	/// Processed-event ledger failure
	#[error("Event ledger error: {0}")]
	Ledger(Box<ErrorContext>),
}

impl PipelineError {
	/// Creates a DataConsistency error
	pub fn data_consistency(
		message: impl Into<String>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::DataConsistency(Box::new(ErrorContext::new_with_log(message, None, metadata)))
	}

	/// Creates a Ledger error
	pub fn ledger(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
	) -> Self {
		Self::Ledger(Box::new(ErrorContext::new_with_log(message, source, None)))
	}

	/// Short lowercase label used for metrics and logs.
	pub fn kind(&self) -> &'static str {
		match self {
			PipelineError::Decode(_) => "decode",
			PipelineError::Transaction(_) => "transaction",
			PipelineError::Store(_) => "store",
			PipelineError::Messaging(_) => "messaging",
			PipelineError::DataConsistency(_) => "data_consistency",
			PipelineError::Ledger(_) => "ledger",
		}
	}
}

impl TraceableError for PipelineError {
	fn trace_id(&self) -> String {
		match self {
			PipelineError::Decode(e) => e.trace_id(),
			PipelineError::Transaction(e) => e.trace_id(),
			PipelineError::Store(e) => e.trace_id(),
			PipelineError::Messaging(e) => e.trace_id(),
			PipelineError::DataConsistency(context) => context.trace_id.clone(),
			PipelineError::Ledger(context) => context.trace_id.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kind_labels() {
		let error = PipelineError::data_consistency("listing missing", None);
		assert_eq!(error.kind(), "data_consistency");
		assert!(error.to_string().contains("listing missing"));
		assert!(!error.trace_id().is_empty());
	}

	#[test]
	fn test_from_decode_error() {
		let decode = DecodeError::malformed_payload("short", None, None);
		let error: PipelineError = decode.into();
		assert_eq!(error.kind(), "decode");
	}
}
