//! Event decoder error types.
//!
//! Decode failures are per-event: the dispatcher logs them and moves on to
//! the next log, they never halt the stream.

use std::collections::HashMap;

use alloy::primitives::B256;
use thiserror::Error;

use crate::utils::logging::error::{ErrorContext, TraceableError};

/// Errors produced while turning a raw log into a domain event.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The log's first topic matches no known event signature
	#[error("No known event signature for topic {topic}")]
	UnknownSignature {
		topic: B256,
		context: Box<ErrorContext>,
	},

	/// The payload or topic list does not match the shape implied by the
	/// event signature
	#[error("Malformed event payload: {0}")]
	MalformedPayload(Box<ErrorContext>),
}

impl DecodeError {
	/// Creates an UnknownSignature error
	pub fn unknown_signature(topic: B256, metadata: Option<HashMap<String, String>>) -> Self {
		let message = format!("No known event signature for topic {}", topic);
		Self::UnknownSignature {
			topic,
			context: Box::new(ErrorContext::new_with_log(message, None, metadata)),
		}
	}

	/// Creates a MalformedPayload error
	pub fn malformed_payload(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::MalformedPayload(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Checks if this is an unknown signature error
	pub fn is_unknown_signature(&self) -> bool {
		matches!(self, Self::UnknownSignature { .. })
	}
}

impl TraceableError for DecodeError {
	fn trace_id(&self) -> String {
		match self {
			DecodeError::UnknownSignature { context, .. } => context.trace_id.clone(),
			DecodeError::MalformedPayload(context) => context.trace_id.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unknown_signature_formatting() {
		let topic = B256::ZERO;
		let error = DecodeError::unknown_signature(topic, None);
		assert!(error.to_string().contains("No known event signature"));
		assert!(error.is_unknown_signature());
		assert!(!error.trace_id().is_empty());
	}

	#[test]
	fn test_malformed_payload_formatting() {
		let error = DecodeError::malformed_payload("payload too short", None, None);
		assert_eq!(
			error.to_string(),
			"Malformed event payload: payload too short"
		);
		assert!(!error.is_unknown_signature());
		assert!(!error.trace_id().is_empty());
	}
}
