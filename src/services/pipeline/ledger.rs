//! Processed-event ledger.
//!
//! Token-moving reactors must not run twice for the same log: the transport
//! only guarantees at-least-once delivery. The dispatcher consults this
//! ledger before any state-mutating reactor and records the event id after
//! the reactor succeeds.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::Context;
use async_trait::async_trait;

/// Interface for processed-event ledger implementations.
#[async_trait]
pub trait EventLedger: Send + Sync {
	/// Returns whether the event id has already been processed.
	async fn seen(&self, event_id: &str) -> Result<bool, anyhow::Error>;

	/// Durably records an event id as processed.
	async fn record(&self, event_id: &str) -> Result<(), anyhow::Error>;
}

/// File-backed ledger persisting processed event ids as a JSON array.
#[derive(Debug)]
pub struct FileEventLedger {
	path: PathBuf,
	seen: RwLock<HashSet<String>>,
}

impl FileEventLedger {
	/// Opens (or creates) the ledger file inside `dir`.
	pub fn new(dir: PathBuf) -> Result<Self, anyhow::Error> {
		std::fs::create_dir_all(&dir)
			.with_context(|| format!("Failed to create ledger directory {}", dir.display()))?;
		let path = dir.join("processed_events.json");

		let seen = if path.exists() {
			let contents = std::fs::read_to_string(&path)
				.with_context(|| format!("Failed to read ledger file {}", path.display()))?;
			serde_json::from_str::<Vec<String>>(&contents)
				.with_context(|| "Failed to parse ledger file")?
				.into_iter()
				.collect()
		} else {
			HashSet::new()
		};

		Ok(Self {
			path,
			seen: RwLock::new(seen),
		})
	}

	fn persist(&self, ids: &HashSet<String>) -> Result<(), anyhow::Error> {
		let mut sorted: Vec<&String> = ids.iter().collect();
		sorted.sort();
		let contents = serde_json::to_string(&sorted)?;
		std::fs::write(&self.path, contents)
			.with_context(|| format!("Failed to write ledger file {}", self.path.display()))?;
		Ok(())
	}
}

#[async_trait]
impl EventLedger for FileEventLedger {
	async fn seen(&self, event_id: &str) -> Result<bool, anyhow::Error> {
		let seen = self
			.seen
			.read()
			.map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;
		Ok(seen.contains(event_id))
	}

	async fn record(&self, event_id: &str) -> Result<(), anyhow::Error> {
		let mut seen = self
			.seen
			.write()
			.map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;
		seen.insert(event_id.to_string());
		self.persist(&seen)
	}
}

/// In-memory ledger for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct InMemoryEventLedger {
	seen: RwLock<HashSet<String>>,
}

impl InMemoryEventLedger {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl EventLedger for InMemoryEventLedger {
	async fn seen(&self, event_id: &str) -> Result<bool, anyhow::Error> {
		let seen = self
			.seen
			.read()
			.map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;
		Ok(seen.contains(event_id))
	}

	async fn record(&self, event_id: &str) -> Result<(), anyhow::Error> {
		let mut seen = self
			.seen
			.write()
			.map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;
		seen.insert(event_id.to_string());
		Ok(())
	}
}
