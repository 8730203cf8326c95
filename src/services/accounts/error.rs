//! Account store error types.
//!
//! "Not found" is never an error here: lookups return `Option`. These
//! variants cover backend failures and linkage anomalies only.

use std::collections::HashMap;

use thiserror::Error;

use crate::utils::logging::error::{ErrorContext, TraceableError};

/// Errors produced by the account store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// An attach targeted an account that does not exist
	#[error("Account {account_id} does not exist")]
	AccountMissing {
		account_id: i64,
		context: Box<ErrorContext>,
	},

	/// An attach targeted an account that already has a wallet address
	#[error("Account {account_id} already has a linked wallet")]
	WalletAlreadyLinked {
		account_id: i64,
		context: Box<ErrorContext>,
	},

	/// Failure in the underlying storage backend
	#[error("Account store backend error: {0}")]
	Backend(Box<ErrorContext>),
}

impl StoreError {
	/// Creates an AccountMissing error
	pub fn account_missing(account_id: i64, metadata: Option<HashMap<String, String>>) -> Self {
		let message = format!("Account {} does not exist", account_id);
		Self::AccountMissing {
			account_id,
			context: Box::new(ErrorContext::new_with_log(message, None, metadata)),
		}
	}

	/// Creates a WalletAlreadyLinked error
	pub fn wallet_already_linked(
		account_id: i64,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let message = format!("Account {} already has a linked wallet", account_id);
		Self::WalletAlreadyLinked {
			account_id,
			context: Box::new(ErrorContext::new_with_log(message, None, metadata)),
		}
	}

	/// Creates a Backend error
	pub fn backend(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Backend(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Checks if this is a linkage anomaly
	pub fn is_already_linked(&self) -> bool {
		matches!(self, Self::WalletAlreadyLinked { .. })
	}
}

impl TraceableError for StoreError {
	fn trace_id(&self) -> String {
		match self {
			StoreError::AccountMissing { context, .. } => context.trace_id.clone(),
			StoreError::WalletAlreadyLinked { context, .. } => context.trace_id.clone(),
			StoreError::Backend(context) => context.trace_id.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_formatting() {
		let missing = StoreError::account_missing(4, None);
		assert_eq!(missing.to_string(), "Account 4 does not exist");
		assert!(!missing.is_already_linked());

		let linked = StoreError::wallet_already_linked(4, None);
		assert_eq!(linked.to_string(), "Account 4 already has a linked wallet");
		assert!(linked.is_already_linked());
		assert!(!linked.trace_id().is_empty());
	}
}
