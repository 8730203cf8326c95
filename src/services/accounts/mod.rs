//! Account resolution over the external account store.
//!
//! The pipeline correlates on-chain events with linked social accounts
//! through the [`AccountStore`] trait: lookup by custodial wallet address,
//! lookup by wallet-factory identifier, and the single mutation this crate
//! performs: attaching a freshly deployed wallet address to its pending
//! account. Absence is always `Ok(None)`, distinct from a backend error.

pub mod error;

use std::collections::HashMap;
use std::sync::RwLock;

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::models::Account;
use error::StoreError;

/// Interface to the relational store of account linkage.
#[async_trait]
pub trait AccountStore: Send + Sync {
	/// Finds the account owning the given custodial wallet address.
	async fn find_by_wallet(&self, wallet: Address) -> Result<Option<Account>, StoreError>;

	/// Finds the account awaiting the wallet deployment with the given
	/// factory identifier.
	async fn find_by_factory_id(&self, identifier: u64) -> Result<Option<Account>, StoreError>;

	/// Attaches a wallet address to an account, unset to set exactly once.
	///
	/// Attaching to an account that already has an address is a flagged
	/// anomaly (`WalletAlreadyLinked`), never a silent overwrite.
	async fn attach_wallet(&self, account_id: i64, wallet: Address) -> Result<(), StoreError>;
}

/// In-memory account store.
///
/// Backs the tests and small deployments; enforces the invariant that at
/// most one account claims a given wallet address or factory identifier.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
	accounts: RwLock<HashMap<i64, Account>>,
}

impl InMemoryAccountStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts an account, rejecting duplicate wallet or factory claims.
	pub fn insert(&self, account: Account) -> Result<(), StoreError> {
		let mut accounts = self
			.accounts
			.write()
			.map_err(|_| StoreError::backend("account store lock poisoned", None, None))?;

		for existing in accounts.values() {
			let wallet_clash = account.wallet_address.is_some()
				&& existing.wallet_address == account.wallet_address;
			let factory_clash = account.wallet_factory_id.is_some()
				&& existing.wallet_factory_id == account.wallet_factory_id;
			if wallet_clash || factory_clash {
				return Err(StoreError::backend(
					format!(
						"account {} already claims this wallet or factory identifier",
						existing.id
					),
					None,
					Some(HashMap::from([(
						"account_id".to_string(),
						account.id.to_string(),
					)])),
				));
			}
		}

		accounts.insert(account.id, account);
		Ok(())
	}

	/// Returns a snapshot of an account by id.
	pub fn get(&self, account_id: i64) -> Option<Account> {
		self.accounts.read().ok()?.get(&account_id).cloned()
	}
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
	async fn find_by_wallet(&self, wallet: Address) -> Result<Option<Account>, StoreError> {
		let accounts = self
			.accounts
			.read()
			.map_err(|_| StoreError::backend("account store lock poisoned", None, None))?;
		Ok(accounts
			.values()
			.find(|a| a.wallet_address == Some(wallet))
			.cloned())
	}

	async fn find_by_factory_id(&self, identifier: u64) -> Result<Option<Account>, StoreError> {
		let accounts = self
			.accounts
			.read()
			.map_err(|_| StoreError::backend("account store lock poisoned", None, None))?;
		Ok(accounts
			.values()
			.find(|a| a.wallet_factory_id == Some(identifier))
			.cloned())
	}

	async fn attach_wallet(&self, account_id: i64, wallet: Address) -> Result<(), StoreError> {
		let mut accounts = self
			.accounts
			.write()
			.map_err(|_| StoreError::backend("account store lock poisoned", None, None))?;

		let account = accounts
			.get_mut(&account_id)
			.ok_or_else(|| StoreError::account_missing(account_id, None))?;

		if account.wallet_address.is_some() {
			return Err(StoreError::wallet_already_linked(
				account_id,
				Some(HashMap::from([(
					"wallet".to_string(),
					wallet.to_string(),
				)])),
			));
		}

		account.wallet_address = Some(wallet);
		Ok(())
	}
}
