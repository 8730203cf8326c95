//! Structured error context shared by every service error type.
//!
//! Each error carries an [`ErrorContext`]: the human-readable message, an
//! optional source error, optional key/value metadata and a trace id that is
//! attached to the log entry emitted when the error is created. The
//! [`TraceableError`] trait lets callers recover the trace id from any
//! service error for correlation.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

/// Context attached to every structured error in the crate.
#[derive(Debug)]
pub struct ErrorContext {
	/// Human-readable error message
	pub message: String,

	/// Underlying cause, if any
	pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,

	/// Additional key/value metadata describing the failure site
	pub metadata: Option<HashMap<String, String>>,

	/// RFC 3339 timestamp of when the error was created
	pub timestamp: String,

	/// Unique id correlating this error with its log entry
	pub trace_id: String,
}

impl ErrorContext {
	/// Creates a new error context without emitting a log entry.
	pub fn new(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self {
			message: message.into(),
			source,
			metadata,
			timestamp: Utc::now().to_rfc3339(),
			trace_id: Uuid::new_v4().to_string(),
		}
	}

	/// Creates a new error context and logs it at error level.
	pub fn new_with_log(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let context = Self::new(message, source, metadata);
		context.log();
		context
	}

	fn log(&self) {
		let metadata = self
			.metadata
			.as_ref()
			.map(|m| {
				let mut entries: Vec<String> =
					m.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
				entries.sort();
				entries.join(" ")
			})
			.unwrap_or_default();

		match &self.source {
			Some(source) => {
				tracing::error!(
					trace_id = %self.trace_id,
					%metadata,
					source = %source,
					"{}",
					self.message
				);
			}
			None => {
				tracing::error!(trace_id = %self.trace_id, %metadata, "{}", self.message);
			}
		}
	}
}

impl std::fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for ErrorContext {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_ref()
			.map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
	}
}

/// Errors that expose the trace id of their inner [`ErrorContext`].
pub trait TraceableError {
	/// Returns the trace id correlating this error with its log entry.
	fn trace_id(&self) -> String;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_context_fields() {
		let context = ErrorContext::new(
			"something failed",
			None,
			Some(HashMap::from([("wallet".to_string(), "0xabc".to_string())])),
		);

		assert_eq!(context.message, "something failed");
		assert!(!context.trace_id.is_empty());
		assert!(!context.timestamp.is_empty());
		assert_eq!(
			context.metadata.as_ref().unwrap().get("wallet").unwrap(),
			"0xabc"
		);
	}

	#[test]
	fn test_error_context_display_and_source() {
		let source = std::io::Error::other("io broke");
		let context = ErrorContext::new("outer failure", Some(Box::new(source)), None);

		assert_eq!(context.to_string(), "outer failure");
		let dyn_err: &dyn std::error::Error = &context;
		assert_eq!(dyn_err.source().unwrap().to_string(), "io broke");
	}

	#[test]
	fn test_trace_ids_are_unique() {
		let a = ErrorContext::new("a", None, None);
		let b = ErrorContext::new("b", None, None);
		assert_ne!(a.trace_id, b.trace_id);
	}
}
