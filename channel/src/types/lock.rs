#![warn(clippy::missing_docs_in_private_items)]

use htlc_primitives::{
	hashing::domain_hash,
	packing::pack_lock,
	types::{
		BlockNumber,
		Hash32,
		U256,
	},
};
use serde::{
	Deserialize,
	Serialize,
};

/// A claim on `amount` that becomes redeemable when a preimage of
/// `hashlock` is revealed, and expires at `expiration`. Immutable once
/// created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lock {
	pub amount: U256,
	pub expiration: BlockNumber,
	pub hashlock: Hash32,
}

impl Lock {
	pub fn new(amount: U256, expiration: BlockNumber, hashlock: Hash32) -> Self {
		Self { amount, expiration, hashlock }
	}

	/// Canonical byte form: `amount ‖ expiration ‖ hashlock`.
	pub fn as_bytes(&self) -> Vec<u8> {
		pack_lock(self.amount, self.expiration, self.hashlock).0
	}

	/// `H(amount ‖ expiration ‖ hashlock)`, this lock's entry in a
	/// [`crate::merkle`] accumulator.
	pub fn hash(&self) -> Hash32 {
		domain_hash(&self.as_bytes())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_fields_hash_identically() {
		let a = Lock::new(10.into(), 100, Hash32::repeat_byte(0xAB));
		let b = Lock::new(10.into(), 100, Hash32::repeat_byte(0xAB));
		assert_eq!(a.hash(), b.hash());
	}

	#[test]
	fn differing_amount_hashes_differently() {
		let a = Lock::new(10.into(), 100, Hash32::repeat_byte(0xAB));
		let b = Lock::new(11.into(), 100, Hash32::repeat_byte(0xAB));
		assert_ne!(a.hash(), b.hash());
	}
}
