//! Fixed message templates.
//!
//! One template per notification; all amounts are human units. The
//! application announcement degrades to a handle-less template when the
//! applicant has no linked social account, so missing linkage never blocks
//! an on-chain-driven notification.

use alloy::primitives::U256;

/// Public announcement for a new application from a linked account.
pub fn application_with_handle(handle: &str, data: &str, deposit: &U256) -> String {
	format!(
		"New registry listing! @{} has nominated @{} to be on the list for {} TCRP. \
		 Challenge this application by DMing 'challenge @{}'.",
		handle, data, deposit, data
	)
}

/// Public announcement for a new application without a linked account.
pub fn application_without_handle(data: &str, deposit: &U256) -> String {
	format!(
		"New registry listing! @{} has been nominated to be on the list for {} TCRP. \
		 Challenge this application by DMing 'challenge @{}'.",
		data, deposit, data
	)
}

/// Public announcement for a new challenge.
pub fn new_challenge(data: &str) -> String {
	format!(
		"New challenge! @{}'s listing has been put to the test. \
		 Send me a DM with 'vote {} keep/kick' to determine their fate.",
		data, data
	)
}

/// Public announcement for a whitelisted application.
pub fn application_whitelisted(data: &str) -> String {
	format!("@{} has been successfully added to the registry!", data)
}

/// Public announcement for a removed application.
pub fn application_removed(data: &str) -> String {
	format!("@{} has been removed from the registry.", data)
}

/// Public announcement for a successful challenge.
pub fn challenge_succeeded(data: &str) -> String {
	format!(
		"The challenge against @{}'s listing succeeded! They're off the list.",
		data
	)
}

/// Public announcement for a failed challenge.
pub fn challenge_failed(data: &str) -> String {
	format!(
		"The challenge against @{}'s listing failed! Their spot on the list remains.",
		data
	)
}

/// Private confirmation after wallet provisioning completes.
pub fn wallet_confirmed(balance: &U256) -> String {
	format!(
		"Done! Your wallet is good to go and has {} TCRP waiting for you. \
		 Try responding with 'help' to see what you can ask me to do.",
		balance
	)
}

/// Private receipt after a withdrawal credits the owner's wallet.
pub fn withdrawal_receipt(listing: &str, withdrew: &U256, balance: &U256) -> String {
	format!(
		"The challenge against your listing for {} failed! As a result you've won {} tokens. \
		 Your new balance is {}.",
		listing, withdrew, balance
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_application_templates() {
		let with_handle =
			application_with_handle("alice", "alice_eth", &U256::from(500u64));
		assert!(with_handle.contains("@alice has nominated @alice_eth"));
		assert!(with_handle.contains("500 TCRP"));

		let without_handle = application_without_handle("alice_eth", &U256::from(500u64));
		assert!(without_handle.contains("@alice_eth has been nominated"));
		assert!(without_handle.contains("500 TCRP"));
	}

	#[test]
	fn test_lifecycle_templates() {
		assert!(application_whitelisted("bob").starts_with("@bob has been successfully added"));
		assert!(application_removed("bob").contains("removed"));
		assert!(challenge_succeeded("bob").contains("succeeded"));
		assert!(challenge_failed("bob").contains("failed"));
		assert!(new_challenge("bob").contains("vote bob keep/kick"));
	}

	#[test]
	fn test_private_templates() {
		assert!(wallet_confirmed(&U256::from(1550u64)).contains("1550 TCRP"));
		let receipt =
			withdrawal_receipt("bob", &U256::from(200u64), &U256::from(1750u64));
		assert!(receipt.contains("won 200 tokens"));
		assert!(receipt.contains("balance is 1750"));
	}
}
