//! Messaging collaborator error types.

use std::collections::HashMap;

use thiserror::Error;

use crate::utils::logging::error::{ErrorContext, TraceableError};

/// Errors produced by the social-messaging transport.
#[derive(Debug, Error)]
pub enum MessengerError {
	/// A public post could not be delivered
	#[error("Failed to deliver public post: {0}")]
	PostFailed(Box<ErrorContext>),

	/// A private message could not be delivered
	#[error("Failed to deliver direct message to {recipient}: {reason}")]
	DirectMessageFailed {
		recipient: u64,
		reason: String,
		context: Box<ErrorContext>,
	},
}

impl MessengerError {
	/// Creates a PostFailed error
	pub fn post_failed(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::PostFailed(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Creates a DirectMessageFailed error
	pub fn direct_message_failed(
		recipient: u64,
		reason: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let reason = reason.into();
		let message = format!(
			"Failed to deliver direct message to {}: {}",
			recipient, &reason
		);
		Self::DirectMessageFailed {
			recipient,
			reason,
			context: Box::new(ErrorContext::new_with_log(message, source, metadata)),
		}
	}
}

impl TraceableError for MessengerError {
	fn trace_id(&self) -> String {
		match self {
			MessengerError::PostFailed(context) => context.trace_id.clone(),
			MessengerError::DirectMessageFailed { context, .. } => context.trace_id.clone(),
		}
	}
}
