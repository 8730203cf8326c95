//! Bounds-checked reader over ABI-encoded event payloads.
//!
//! Event payloads are a sequence of 32-byte words; dynamic values (strings)
//! are referenced by a byte offset into the payload followed by a length
//! word and the raw bytes. Every read is bounds-checked so a truncated or
//! corrupted payload surfaces as a decode error rather than a panic.

use alloy::primitives::{Address, U256};

use super::error::DecodeError;

const WORD: usize = 32;

/// Reader over the data section of a log payload.
pub struct AbiReader<'a> {
	data: &'a [u8],
}

impl<'a> AbiReader<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data }
	}

	fn word(&self, index: usize) -> Result<&'a [u8], DecodeError> {
		let start = index * WORD;
		let end = start + WORD;
		self.data.get(start..end).ok_or_else(|| {
			DecodeError::malformed_payload(
				format!(
					"payload of {} bytes has no word at index {}",
					self.data.len(),
					index
				),
				None,
				None,
			)
		})
	}

	/// Reads the word at `index` as an unsigned 256-bit integer.
	pub fn u256(&self, index: usize) -> Result<U256, DecodeError> {
		Ok(U256::from_be_slice(self.word(index)?))
	}

	/// Reads the word at `index` as a u64, rejecting values that overflow.
	pub fn u64(&self, index: usize) -> Result<u64, DecodeError> {
		let value = self.u256(index)?;
		u64::try_from(value).map_err(|_| {
			DecodeError::malformed_payload(
				format!("word at index {} does not fit in u64: {}", index, value),
				None,
				None,
			)
		})
	}

	/// Reads the word at `index` as an address (the low 20 bytes).
	pub fn address(&self, index: usize) -> Result<Address, DecodeError> {
		let word = self.word(index)?;
		if word[..12].iter().any(|b| *b != 0) {
			return Err(DecodeError::malformed_payload(
				format!("word at index {} has non-zero address padding", index),
				None,
				None,
			));
		}
		Ok(Address::from_slice(&word[12..]))
	}

	/// Reads the dynamic string whose offset word sits at `index`.
	pub fn string(&self, index: usize) -> Result<String, DecodeError> {
		let offset = self.u256(index)?;
		let offset = usize::try_from(offset).map_err(|_| {
			DecodeError::malformed_payload(
				format!("string offset at index {} out of range: {}", index, offset),
				None,
				None,
			)
		})?;

		// Offset and length words are attacker-controlled; the additions
		// below must not wrap.
		let start = offset.checked_add(WORD).ok_or_else(|| {
			DecodeError::malformed_payload(
				format!("string offset {} out of range", offset),
				None,
				None,
			)
		})?;
		let length_word = self.data.get(offset..start).ok_or_else(|| {
			DecodeError::malformed_payload(
				format!("string offset {} points past payload end", offset),
				None,
				None,
			)
		})?;
		let length = usize::try_from(U256::from_be_slice(length_word)).map_err(|_| {
			DecodeError::malformed_payload("string length out of range", None, None)
		})?;

		let end = start.checked_add(length).ok_or_else(|| {
			DecodeError::malformed_payload(
				format!("string length {} out of range", length),
				None,
				None,
			)
		})?;
		let bytes = self.data.get(start..end).ok_or_else(|| {
			DecodeError::malformed_payload(
				format!("string of {} bytes truncated at offset {}", length, start),
				None,
				None,
			)
		})?;

		String::from_utf8(bytes.to_vec()).map_err(|e| {
			DecodeError::malformed_payload("string payload is not UTF-8", Some(Box::new(e)), None)
		})
	}
}
