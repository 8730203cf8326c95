//! Social-messaging collaborator boundary.

pub mod error;

use async_trait::async_trait;

use error::MessengerError;

/// Interface to the social-messaging transport.
///
/// The real client (HTTP API, rate limiting, credentials) lives outside
/// this crate; the pipeline only needs the two delivery surfaces.
#[async_trait]
pub trait Messenger: Send + Sync {
	/// Publishes a public post on the bridge's account.
	async fn send_post(&self, text: &str) -> Result<(), MessengerError>;

	/// Sends a private message to a social-network user.
	async fn send_direct(&self, recipient: u64, text: &str) -> Result<(), MessengerError>;
}
