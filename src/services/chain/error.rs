//! Chain-write collaborator error types.

use std::collections::HashMap;

use thiserror::Error;

use crate::utils::logging::error::{ErrorContext, TraceableError};

/// Errors produced while submitting or confirming custodial transactions.
#[derive(Debug, Error)]
pub enum ChainError {
	/// The transaction could not be submitted
	#[error("Transaction submission failed: {0}")]
	SubmissionFailed(Box<ErrorContext>),

	/// The chain rejected a submitted transaction
	#[error("Transaction {tx} was rejected")]
	Rejected {
		tx: String,
		context: Box<ErrorContext>,
	},

	/// Confirmation polling exhausted its bounded attempts
	#[error("Transaction {tx} not confirmed after {polls} polls")]
	ConfirmationTimeout {
		tx: String,
		polls: u32,
		context: Box<ErrorContext>,
	},

	/// Failure in an RPC read (balance, listing, status)
	#[error("Chain read failed: {0}")]
	RpcError(Box<ErrorContext>),
}

impl ChainError {
	/// Creates a SubmissionFailed error
	pub fn submission_failed(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::SubmissionFailed(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Creates a Rejected error
	pub fn rejected(tx: impl Into<String>, metadata: Option<HashMap<String, String>>) -> Self {
		let tx = tx.into();
		let message = format!("Transaction {} was rejected", &tx);
		Self::Rejected {
			tx,
			context: Box::new(ErrorContext::new_with_log(message, None, metadata)),
		}
	}

	/// Creates a ConfirmationTimeout error
	pub fn confirmation_timeout(
		tx: impl Into<String>,
		polls: u32,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let tx = tx.into();
		let message = format!("Transaction {} not confirmed after {} polls", &tx, polls);
		Self::ConfirmationTimeout {
			tx,
			polls,
			context: Box::new(ErrorContext::new_with_log(message, None, metadata)),
		}
	}

	/// Creates an RPC read error
	pub fn rpc_error(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RpcError(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Checks if this is a confirmation timeout
	pub fn is_confirmation_timeout(&self) -> bool {
		matches!(self, Self::ConfirmationTimeout { .. })
	}
}

impl TraceableError for ChainError {
	fn trace_id(&self) -> String {
		match self {
			ChainError::SubmissionFailed(context) => context.trace_id.clone(),
			ChainError::Rejected { context, .. } => context.trace_id.clone(),
			ChainError::ConfirmationTimeout { context, .. } => context.trace_id.clone(),
			ChainError::RpcError(context) => context.trace_id.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_formatting() {
		let error = ChainError::confirmation_timeout("0xabc", 40, None);
		assert_eq!(
			error.to_string(),
			"Transaction 0xabc not confirmed after 40 polls"
		);
		assert!(error.is_confirmation_timeout());
		assert!(!error.trace_id().is_empty());

		let rejected = ChainError::rejected("0xdef", None);
		assert_eq!(rejected.to_string(), "Transaction 0xdef was rejected");
		assert!(!rejected.is_confirmation_timeout());
	}
}
