#![warn(clippy::missing_docs_in_private_items)]

use web3::types::U256;

use crate::{
	traits::ToBytes,
	types::{
		BlockNumber,
		Bytes,
		Hash32,
	},
};

/// Canonical bytes of a lock: `amount (u256, big-endian) ‖ expiration (u64,
/// big-endian) ‖ hashlock (32 bytes)`.
///
/// This is the preimage hashed (via [`crate::hashing::domain_hash`]) to
/// obtain the lock's entry in the Merkle accumulator.
pub fn pack_lock(amount: U256, expiration: BlockNumber, hashlock: Hash32) -> Bytes {
	let mut buf = Vec::with_capacity(32 + 8 + 32);
	buf.extend_from_slice(&amount.to_bytes());
	buf.extend_from_slice(&expiration.to_be_bytes());
	buf.extend_from_slice(hashlock.as_bytes());
	Bytes(buf)
}
