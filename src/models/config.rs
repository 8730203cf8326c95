//! Bridge configuration.
//!
//! All deployment state the pipeline needs is carried in one explicit
//! [`BridgeConfig`] passed to the services at construction time; there is no
//! global connection or environment state consulted at runtime. The only
//! recognized environment override is `PREREGISTRATION`, which suppresses
//! user-facing wallet confirmations while the deployment is not yet public.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable suppressing user-facing wallet confirmations.
pub const PREREGISTRATION_ENV: &str = "PREREGISTRATION";

/// Minimum deposit retained in a listing, human units.
pub const DEFAULT_MIN_DEPOSIT: u64 = 500;

/// Tokens minted into a freshly provisioned wallet, human units.
pub const DEFAULT_INITIAL_TOKEN_GRANT: u64 = 1550;

/// Tokens locked into voting escrow at provisioning, human units.
pub const DEFAULT_INITIAL_VOTE_STAKE: u64 = 50;

/// Bounded confirmation-wait policy for submitted transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationConfig {
	/// Maximum number of status polls before the wait times out
	pub max_polls: u32,

	/// Milliseconds between status polls
	pub poll_interval_ms: u64,
}

impl Default for ConfirmationConfig {
	fn default() -> Self {
		Self {
			max_polls: 40,
			poll_interval_ms: 3_000,
		}
	}
}

/// Top-level configuration for the event-reaction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
	/// When true, step 5 of wallet provisioning (balance read-back and
	/// confirmation DM) is skipped
	pub preregistration: bool,

	/// Minimum deposit retained by a listing, human units
	pub min_deposit: u64,

	/// Initial grant minted into a new custodial wallet, human units
	pub initial_token_grant: u64,

	/// Amount locked into the voting contract at provisioning, human units
	pub initial_vote_stake: u64,

	/// Confirmation-wait policy for custodial transactions
	pub confirmation: ConfirmationConfig,

	/// Directory holding the processed-event ledger
	pub ledger_dir: PathBuf,
}

impl Default for BridgeConfig {
	fn default() -> Self {
		Self {
			preregistration: false,
			min_deposit: DEFAULT_MIN_DEPOSIT,
			initial_token_grant: DEFAULT_INITIAL_TOKEN_GRANT,
			initial_vote_stake: DEFAULT_INITIAL_VOTE_STAKE,
			confirmation: ConfirmationConfig::default(),
			ledger_dir: PathBuf::from("data"),
		}
	}
}

impl BridgeConfig {
	/// Loads the configuration from a JSON file and applies environment
	/// overrides.
	pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
		let contents = std::fs::read_to_string(path)?;
		let mut config: BridgeConfig = serde_json::from_str(&contents)?;
		config.apply_env_overrides();
		config.validate()?;
		Ok(config)
	}

	/// Applies recognized environment overrides to an existing config.
	pub fn apply_env_overrides(&mut self) {
		if let Ok(value) = std::env::var(PREREGISTRATION_ENV) {
			self.preregistration = value == "true";
		}
	}

	/// Checks the invariants between the configured amounts.
	///
	/// The vote stake is deposited out of the freshly minted grant, so it
	/// must be strictly smaller than the grant.
	pub fn validate(&self) -> Result<(), anyhow::Error> {
		if self.initial_vote_stake >= self.initial_token_grant {
			anyhow::bail!(
				"initial_vote_stake ({}) must be less than initial_token_grant ({})",
				self.initial_vote_stake,
				self.initial_token_grant
			);
		}
		if self.confirmation.max_polls == 0 {
			anyhow::bail!("confirmation.max_polls must be at least 1");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_match_deployment_constants() {
		let config = BridgeConfig::default();
		assert!(!config.preregistration);
		assert_eq!(config.min_deposit, 500);
		assert_eq!(config.initial_token_grant, 1550);
		assert_eq!(config.initial_vote_stake, 50);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_partial_json_uses_defaults() {
		let config: BridgeConfig = serde_json::from_str(r#"{"preregistration": true}"#).unwrap();
		assert!(config.preregistration);
		assert_eq!(config.min_deposit, DEFAULT_MIN_DEPOSIT);
	}

	#[test]
	fn test_validate_rejects_stake_above_grant() {
		let config = BridgeConfig {
			initial_token_grant: 10,
			initial_vote_stake: 10,
			..Default::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_validate_rejects_zero_polls() {
		let config = BridgeConfig {
			confirmation: ConfirmationConfig {
				max_polls: 0,
				poll_interval_ms: 1,
			},
			..Default::default()
		};
		assert!(config.validate().is_err());
	}
}
