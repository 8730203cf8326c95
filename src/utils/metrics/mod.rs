//! Metrics module for the event-reaction pipeline.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the counters tracked while processing registry events.

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

lazy_static! {
	/// Global Prometheus registry.
	///
	/// Holds all metrics defined in this module and is used to gather
	/// metrics for exposure via a metrics endpoint.
	pub static ref REGISTRY: Registry = Registry::new();

	/// Counter for decoded domain events, labelled by event kind.
	pub static ref EVENTS_DECODED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("events_decoded_total", "Decoded registry log events"),
			&["event"],
		)
		.unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for pipeline outcomes, labelled by disposition
	/// (handled, duplicate, failed, decode_failed).
	pub static ref EVENTS_PROCESSED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("events_processed_total", "Pipeline dispositions per event"),
			&["outcome"],
		)
		.unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for submitted custodial transactions, labelled by kind
	/// (mint, deposit, release).
	pub static ref TRANSACTIONS_SUBMITTED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new(
				"transactions_submitted_total",
				"Custodial transactions submitted to the chain",
			),
			&["kind"],
		)
		.unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}

/// Gathers all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let mut buffer = Vec::new();
	encoder.encode(&REGISTRY.gather(), &mut buffer)?;
	Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_counters_register_and_gather() {
		EVENTS_DECODED.with_label_values(&["application"]).inc();
		EVENTS_PROCESSED.with_label_values(&["handled"]).inc();
		TRANSACTIONS_SUBMITTED.with_label_values(&["mint"]).inc();

		let output = gather_metrics().unwrap();
		assert!(output.contains("events_decoded_total"));
		assert!(output.contains("events_processed_total"));
		assert!(output.contains("transactions_submitted_total"));
	}
}
