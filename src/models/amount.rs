//! Atomic/human token amount conversion.
//!
//! The registry token uses 18 decimals. Every amount crossing the system
//! boundary does so exactly once: human units (what users see and what the
//! configuration holds) are scaled up to atomic units before any chain call,
//! and chain reads are scaled down before display.

use alloy::primitives::U256;

/// Decimals of the registry token contract.
pub const TOKEN_DECIMALS: u32 = 18;

/// Scales a human amount up to atomic contract-native units.
pub fn atomic_from_human(human: u64) -> U256 {
	U256::from(human) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

/// Scales an atomic amount down to whole human units.
///
/// Fractional remainders below one whole token are truncated; display
/// surfaces only deal in whole tokens.
pub fn human_from_atomic(atomic: U256) -> U256 {
	atomic / U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}
