//! Event decoder for registry and wallet-factory logs.
//!
//! Maps a raw log's first topic to one known event signature and decodes
//! the indexed topics and payload words into exactly one [`DomainEvent`]
//! variant. Every shape mismatch is a [`DecodeError`].

mod abi;
pub mod error;

use alloy::primitives::{keccak256, Address, B256, U256};
use lazy_static::lazy_static;

use crate::models::{
	Application, Challenge, ChallengeResolved, DomainEvent, ListingEvent, RawLogEvent,
	WalletInstantiated, Withdrawal,
};
use abi::AbiReader;
use error::DecodeError;

lazy_static! {
	/// Topic hash of `_Application(bytes32,uint256,uint256,string,address)`
	pub static ref SIG_APPLICATION: B256 =
		keccak256("_Application(bytes32,uint256,uint256,string,address)");

	/// Topic hash of `_Challenge(bytes32,uint256,string,uint256,uint256,address)`
	pub static ref SIG_CHALLENGE: B256 =
		keccak256("_Challenge(bytes32,uint256,string,uint256,uint256,address)");

	/// Topic hash of `_ApplicationWhitelisted(bytes32)`
	pub static ref SIG_APPLICATION_WHITELISTED: B256 =
		keccak256("_ApplicationWhitelisted(bytes32)");

	/// Topic hash of `_ApplicationRemoved(bytes32)`
	pub static ref SIG_APPLICATION_REMOVED: B256 = keccak256("_ApplicationRemoved(bytes32)");

	/// Topic hash of `_ChallengeFailed(bytes32,uint256,uint256,uint256)`
	pub static ref SIG_CHALLENGE_FAILED: B256 =
		keccak256("_ChallengeFailed(bytes32,uint256,uint256,uint256)");

	/// Topic hash of `_ChallengeSucceeded(bytes32,uint256,uint256,uint256)`
	pub static ref SIG_CHALLENGE_SUCCEEDED: B256 =
		keccak256("_ChallengeSucceeded(bytes32,uint256,uint256,uint256)");

	/// Topic hash of `_Withdrawn(bytes32,uint256,uint256,address)`
	pub static ref SIG_WITHDRAWN: B256 =
		keccak256("_Withdrawn(bytes32,uint256,uint256,address)");

	/// Topic hash of the wallet factory's
	/// `ContractInstantiation(address,address,uint256)`
	pub static ref SIG_CONTRACT_INSTANTIATION: B256 =
		keccak256("ContractInstantiation(address,address,uint256)");
}

/// Decoder turning raw logs into typed domain events.
#[derive(Debug, Clone, Default)]
pub struct EventDecoder;

impl EventDecoder {
	pub fn new() -> Self {
		Self
	}

	/// Decodes a raw log into exactly one domain event variant.
	pub fn decode(&self, raw: &RawLogEvent) -> Result<DomainEvent, DecodeError> {
		let signature = *raw.topics.first().ok_or_else(|| {
			DecodeError::malformed_payload("log has no signature topic", None, None)
		})?;

		let event = if signature == *SIG_CONTRACT_INSTANTIATION {
			self.decode_wallet_instantiated(raw)?
		} else if signature == *SIG_APPLICATION {
			self.decode_application(raw)?
		} else if signature == *SIG_CHALLENGE {
			self.decode_challenge(raw)?
		} else if signature == *SIG_APPLICATION_WHITELISTED {
			DomainEvent::ApplicationWhitelisted(self.decode_listing_event(raw)?)
		} else if signature == *SIG_APPLICATION_REMOVED {
			DomainEvent::ApplicationRemoved(self.decode_listing_event(raw)?)
		} else if signature == *SIG_CHALLENGE_SUCCEEDED {
			DomainEvent::ChallengeSucceeded(self.decode_challenge_resolved(raw)?)
		} else if signature == *SIG_CHALLENGE_FAILED {
			DomainEvent::ChallengeFailed(self.decode_challenge_resolved(raw)?)
		} else if signature == *SIG_WITHDRAWN {
			self.decode_withdrawal(raw)?
		} else {
			return Err(DecodeError::unknown_signature(signature, None));
		};

		Ok(event)
	}

	fn decode_wallet_instantiated(&self, raw: &RawLogEvent) -> Result<DomainEvent, DecodeError> {
		// The factory event carries everything in the payload
		expect_topics(raw, 1)?;
		let reader = AbiReader::new(&raw.data);
		Ok(DomainEvent::WalletInstantiated(WalletInstantiated {
			sender: reader.address(0)?,
			wallet: reader.address(1)?,
			identifier: reader.u64(2)?,
		}))
	}

	fn decode_application(&self, raw: &RawLogEvent) -> Result<DomainEvent, DecodeError> {
		expect_topics(raw, 3)?;
		let reader = AbiReader::new(&raw.data);
		Ok(DomainEvent::Application(Application {
			listing_hash: raw.topics[1],
			applicant: topic_address(raw, 2)?,
			deposit: reader.u256(0)?,
			app_end_date: reader.u256(1)?,
			data: reader.string(2)?,
		}))
	}

	fn decode_challenge(&self, raw: &RawLogEvent) -> Result<DomainEvent, DecodeError> {
		expect_topics(raw, 3)?;
		let reader = AbiReader::new(&raw.data);
		Ok(DomainEvent::Challenge(Challenge {
			listing_hash: raw.topics[1],
			challenger: topic_address(raw, 2)?,
			challenge_id: reader.u256(0)?,
			data: reader.string(1)?,
			commit_end_date: reader.u256(2)?,
			reveal_end_date: reader.u256(3)?,
		}))
	}

	fn decode_listing_event(&self, raw: &RawLogEvent) -> Result<ListingEvent, DecodeError> {
		expect_topics(raw, 2)?;
		Ok(ListingEvent {
			listing_hash: raw.topics[1],
		})
	}

	fn decode_challenge_resolved(
		&self,
		raw: &RawLogEvent,
	) -> Result<ChallengeResolved, DecodeError> {
		expect_topics(raw, 3)?;
		let reader = AbiReader::new(&raw.data);
		Ok(ChallengeResolved {
			listing_hash: raw.topics[1],
			challenge_id: U256::from_be_bytes(raw.topics[2].0),
			reward_pool: reader.u256(0)?,
			total_tokens: reader.u256(1)?,
		})
	}

	fn decode_withdrawal(&self, raw: &RawLogEvent) -> Result<DomainEvent, DecodeError> {
		expect_topics(raw, 3)?;
		let reader = AbiReader::new(&raw.data);
		Ok(DomainEvent::Withdrawal(Withdrawal {
			listing_hash: raw.topics[1],
			owner: topic_address(raw, 2)?,
			withdrew: reader.u256(0)?,
			new_total: reader.u256(1)?,
		}))
	}
}

fn expect_topics(raw: &RawLogEvent, count: usize) -> Result<(), DecodeError> {
	if raw.topics.len() != count {
		return Err(DecodeError::malformed_payload(
			format!("expected {} topics, log has {}", count, raw.topics.len()),
			None,
			None,
		));
	}
	Ok(())
}

fn topic_address(raw: &RawLogEvent, index: usize) -> Result<Address, DecodeError> {
	let topic = raw.topics[index];
	if topic[..12].iter().any(|b| *b != 0) {
		return Err(DecodeError::malformed_payload(
			format!("topic {} has non-zero address padding", index),
			None,
			None,
		));
	}
	Ok(Address::from_slice(&topic[12..]))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{address, Bytes};

	fn raw_event(topics: Vec<B256>, data: Vec<u8>) -> RawLogEvent {
		RawLogEvent {
			address: Address::ZERO,
			topics,
			data: Bytes::from(data),
			block_number: 1,
			transaction_hash: B256::ZERO,
			log_index: 0,
		}
	}

	fn word(value: U256) -> [u8; 32] {
		value.to_be_bytes()
	}

	fn address_topic(addr: Address) -> B256 {
		let mut topic = [0u8; 32];
		topic[12..].copy_from_slice(addr.as_slice());
		B256::from(topic)
	}

	fn append_string(data: &mut Vec<u8>, offset_slot: usize, static_slots: usize, value: &str) {
		let tail = (static_slots * 32) as u64;
		data[offset_slot * 32..(offset_slot + 1) * 32]
			.copy_from_slice(&word(U256::from(tail)));
		data.extend_from_slice(&word(U256::from(value.len() as u64)));
		let mut bytes = value.as_bytes().to_vec();
		bytes.resize(bytes.len().div_ceil(32) * 32, 0);
		data.extend_from_slice(&bytes);
	}

	#[test]
	fn test_decode_wallet_instantiated() {
		let sender = address!("0000000000000000000000000000000000000001");
		let wallet = address!("0000000000000000000000000000000000000002");
		let mut data = Vec::new();
		data.extend_from_slice(address_topic(sender).as_slice());
		data.extend_from_slice(address_topic(wallet).as_slice());
		data.extend_from_slice(&word(U256::from(7u64)));

		let raw = raw_event(vec![*SIG_CONTRACT_INSTANTIATION], data);
		let event = EventDecoder::new().decode(&raw).unwrap();

		assert_eq!(
			event,
			DomainEvent::WalletInstantiated(WalletInstantiated {
				sender,
				wallet,
				identifier: 7,
			})
		);
	}

	#[test]
	fn test_decode_application() {
		let listing_hash = B256::repeat_byte(0x11);
		let applicant = address!("00000000000000000000000000000000000000aa");
		let mut data = vec![0u8; 3 * 32];
		data[..32].copy_from_slice(&word(U256::from(500u64)));
		data[32..64].copy_from_slice(&word(U256::from(1_700_000_000u64)));
		append_string(&mut data, 2, 3, "alice");

		let raw = raw_event(
			vec![*SIG_APPLICATION, listing_hash, address_topic(applicant)],
			data,
		);
		let event = EventDecoder::new().decode(&raw).unwrap();

		match event {
			DomainEvent::Application(application) => {
				assert_eq!(application.listing_hash, listing_hash);
				assert_eq!(application.applicant, applicant);
				assert_eq!(application.deposit, U256::from(500u64));
				assert_eq!(application.data, "alice");
			}
			other => panic!("expected Application, got {:?}", other),
		}
	}

	#[test]
	fn test_decode_challenge() {
		let listing_hash = B256::repeat_byte(0x22);
		let challenger = address!("00000000000000000000000000000000000000bb");
		let mut data = vec![0u8; 4 * 32];
		data[..32].copy_from_slice(&word(U256::from(3u64)));
		data[64..96].copy_from_slice(&word(U256::from(100u64)));
		data[96..128].copy_from_slice(&word(U256::from(200u64)));
		append_string(&mut data, 1, 4, "bob");

		let raw = raw_event(
			vec![*SIG_CHALLENGE, listing_hash, address_topic(challenger)],
			data,
		);
		let event = EventDecoder::new().decode(&raw).unwrap();

		match event {
			DomainEvent::Challenge(challenge) => {
				assert_eq!(challenge.challenge_id, U256::from(3u64));
				assert_eq!(challenge.data, "bob");
				assert_eq!(challenge.challenger, challenger);
				assert_eq!(challenge.commit_end_date, U256::from(100u64));
				assert_eq!(challenge.reveal_end_date, U256::from(200u64));
			}
			other => panic!("expected Challenge, got {:?}", other),
		}
	}

	#[test]
	fn test_decode_listing_lifecycle_events() {
		let listing_hash = B256::repeat_byte(0x33);
		let decoder = EventDecoder::new();

		let whitelisted = decoder
			.decode(&raw_event(
				vec![*SIG_APPLICATION_WHITELISTED, listing_hash],
				vec![],
			))
			.unwrap();
		assert!(matches!(
			whitelisted,
			DomainEvent::ApplicationWhitelisted(ListingEvent { listing_hash: h }) if h == listing_hash
		));

		let removed = decoder
			.decode(&raw_event(
				vec![*SIG_APPLICATION_REMOVED, listing_hash],
				vec![],
			))
			.unwrap();
		assert!(matches!(removed, DomainEvent::ApplicationRemoved(_)));
	}

	#[test]
	fn test_decode_challenge_resolutions() {
		let listing_hash = B256::repeat_byte(0x44);
		let challenge_id = B256::from(word(U256::from(9u64)));
		let mut data = Vec::new();
		data.extend_from_slice(&word(U256::from(1_000u64)));
		data.extend_from_slice(&word(U256::from(2_000u64)));

		let decoder = EventDecoder::new();
		let failed = decoder
			.decode(&raw_event(
				vec![*SIG_CHALLENGE_FAILED, listing_hash, challenge_id],
				data.clone(),
			))
			.unwrap();
		match failed {
			DomainEvent::ChallengeFailed(resolved) => {
				assert_eq!(resolved.challenge_id, U256::from(9u64));
				assert_eq!(resolved.reward_pool, U256::from(1_000u64));
			}
			other => panic!("expected ChallengeFailed, got {:?}", other),
		}

		let succeeded = decoder
			.decode(&raw_event(
				vec![*SIG_CHALLENGE_SUCCEEDED, listing_hash, challenge_id],
				data,
			))
			.unwrap();
		assert!(matches!(succeeded, DomainEvent::ChallengeSucceeded(_)));
	}

	#[test]
	fn test_decode_withdrawal() {
		let listing_hash = B256::repeat_byte(0x55);
		let owner = address!("00000000000000000000000000000000000000cc");
		let mut data = Vec::new();
		data.extend_from_slice(&word(U256::from(200u64)));
		data.extend_from_slice(&word(U256::from(500u64)));

		let raw = raw_event(
			vec![*SIG_WITHDRAWN, listing_hash, address_topic(owner)],
			data,
		);
		let event = EventDecoder::new().decode(&raw).unwrap();

		match event {
			DomainEvent::Withdrawal(withdrawal) => {
				assert_eq!(withdrawal.owner, owner);
				assert_eq!(withdrawal.withdrew, U256::from(200u64));
				assert_eq!(withdrawal.new_total, U256::from(500u64));
			}
			other => panic!("expected Withdrawal, got {:?}", other),
		}
	}

	#[test]
	fn test_unknown_signature_rejected() {
		let raw = raw_event(vec![B256::repeat_byte(0xff)], vec![]);
		let error = EventDecoder::new().decode(&raw).unwrap_err();
		assert!(error.is_unknown_signature());
	}

	#[test]
	fn test_no_topics_rejected() {
		let raw = raw_event(vec![], vec![]);
		assert!(EventDecoder::new().decode(&raw).is_err());
	}

	#[test]
	fn test_wrong_topic_count_rejected() {
		// Application requires listing hash and applicant topics
		let raw = raw_event(vec![*SIG_APPLICATION], vec![0u8; 96]);
		let error = EventDecoder::new().decode(&raw).unwrap_err();
		assert!(!error.is_unknown_signature());
	}

	#[test]
	fn test_oversized_string_length_rejected() {
		// Valid application topics; the string length word claims u64::MAX
		let mut data = vec![0u8; 96];
		data[..32].copy_from_slice(&word(U256::from(500u64)));
		data[64..96].copy_from_slice(&word(U256::from(96u64)));
		data.extend_from_slice(&word(U256::from(u64::MAX)));

		let raw = raw_event(
			vec![
				*SIG_APPLICATION,
				B256::repeat_byte(0x11),
				address_topic(Address::new([0xaa; 20])),
			],
			data,
		);
		let error = EventDecoder::new().decode(&raw).unwrap_err();
		assert!(!error.is_unknown_signature());
	}

	#[test]
	fn test_truncated_payload_rejected() {
		let listing_hash = B256::repeat_byte(0x66);
		let raw = raw_event(
			vec![*SIG_CHALLENGE_FAILED, listing_hash, B256::ZERO],
			vec![0u8; 32],
		);
		assert!(EventDecoder::new().decode(&raw).is_err());
	}
}
