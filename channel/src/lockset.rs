#![warn(clippy::missing_docs_in_private_items)]

use std::{
	cell::Cell,
	collections::HashMap,
};

use htlc_primitives::types::{
	Hash32,
	U256,
};

use crate::{
	errors::ChannelError,
	merkle,
	merkle::ProofStep,
	types::Lock,
};

/// An accumulator of outstanding locks accepted from a counterparty.
///
/// Produces Merkle roots and inclusion proofs over the ordered sequence
/// of lock hashes as they were inserted. Insertion order is irrelevant
/// to any balance or membership semantics; it only fixes the shape of
/// the Merkle tree, which both parties must agree on.
#[derive(Clone, Debug, Default)]
pub struct LockSet {
	/// hashlock -> lock.
	locks: HashMap<Hash32, Lock>,
	/// `H(lock.as_bytes())` in insertion order; the Merkle tree's leaves.
	hash_sequence: Vec<Hash32>,
	/// Cached root, invalidated by any mutation.
	cached_root: Cell<Option<Hash32>>,
}

impl LockSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert `lock`, keyed by its hashlock.
	///
	/// Fails with [`ChannelError::DuplicateHashlock`] if the hashlock is
	/// already present.
	pub fn add(&mut self, lock: Lock) -> Result<(), ChannelError> {
		if self.locks.contains_key(&lock.hashlock) {
			return Err(ChannelError::DuplicateHashlock(lock.hashlock))
		}
		self.hash_sequence.push(lock.hash());
		self.locks.insert(lock.hashlock, lock);
		self.cached_root.set(None);
		Ok(())
	}

	/// Remove and return the lock for `hashlock`.
	///
	/// Fails with [`ChannelError::UnknownLock`] if absent.
	pub fn remove(&mut self, hashlock: Hash32) -> Result<Lock, ChannelError> {
		let lock = self.locks.remove(&hashlock).ok_or(ChannelError::UnknownLock(hashlock))?;
		let lock_hash = lock.hash();
		if let Some(pos) = self.hash_sequence.iter().position(|h| *h == lock_hash) {
			self.hash_sequence.remove(pos);
		}
		self.cached_root.set(None);
		Ok(lock)
	}

	pub fn contains(&self, hashlock: &Hash32) -> bool {
		self.locks.contains_key(hashlock)
	}

	pub fn get(&self, hashlock: &Hash32) -> Option<&Lock> {
		self.locks.get(hashlock)
	}

	pub fn len(&self) -> usize {
		self.locks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.locks.is_empty()
	}

	/// Sum of every outstanding lock's amount.
	pub fn outstanding(&self) -> Result<U256, ChannelError> {
		self.locks.values().try_fold(U256::zero(), |acc, lock| {
			acc.checked_add(lock.amount).ok_or(ChannelError::ArithmeticOverflow)
		})
	}

	/// The current Merkle root, recomputed from the hash sequence on a
	/// cache miss.
	pub fn root(&self) -> Hash32 {
		if let Some(cached) = self.cached_root.get() {
			return cached
		}
		let computed = merkle::root(&self.hash_sequence);
		self.cached_root.set(Some(computed));
		computed
	}

	/// The root that [`Self::root`] would return if `include` were
	/// added and/or `exclude` (by hashlock) were removed, without
	/// mutating this set.
	///
	/// Leaves `self` byte-identical to its pre-call contents on every
	/// exit path, including errors — no mutate-then-rollback.
	pub fn root_with(
		&self,
		include: Option<&Lock>,
		exclude: Option<Hash32>,
	) -> Result<Hash32, ChannelError> {
		let mut view: Vec<Hash32> = Vec::with_capacity(self.hash_sequence.len() + 1);
		view.extend_from_slice(&self.hash_sequence);

		if let Some(hashlock) = exclude {
			let lock = self.get(&hashlock).ok_or(ChannelError::UnknownLock(hashlock))?;
			let lock_hash = lock.hash();
			let pos = view
				.iter()
				.position(|h| *h == lock_hash)
				.ok_or(ChannelError::UnknownLock(hashlock))?;
			view.remove(pos);
		}

		if let Some(lock) = include {
			view.push(lock.hash());
		}

		Ok(merkle::root(&view))
	}

	/// The sibling chain authenticating `H(lock)` under the current
	/// root, for `hashlock`.
	pub fn proof(&self, hashlock: Hash32) -> Result<Vec<ProofStep>, ChannelError> {
		let lock = self.get(&hashlock).ok_or(ChannelError::UnknownLock(hashlock))?;
		let lock_hash = lock.hash();
		let index = self
			.hash_sequence
			.iter()
			.position(|h| *h == lock_hash)
			.ok_or(ChannelError::UnknownLock(hashlock))?;
		merkle::proof(&self.hash_sequence, index).ok_or(ChannelError::UnknownLock(hashlock))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lock(amount: u64, expiration: u64, byte: u8) -> Lock {
		Lock::new(U256::from(amount), expiration, Hash32::repeat_byte(byte))
	}

	#[test]
	fn root_with_include_matches_add_then_root() {
		let mut set = LockSet::new();
		set.add(lock(1, 100, 1)).unwrap();
		let sequence_before = set.hash_sequence.clone();

		let candidate = lock(2, 200, 2);
		let predicted = set.root_with(Some(&candidate), None).unwrap();
		assert_eq!(set.hash_sequence, sequence_before, "root_with must not mutate the set");

		set.add(candidate).unwrap();
		assert_eq!(set.root(), predicted);
	}

	#[test]
	fn root_with_exclude_matches_remove_then_root() {
		let mut set = LockSet::new();
		let l1 = lock(1, 100, 1);
		let l2 = lock(2, 200, 2);
		set.add(l1.clone()).unwrap();
		set.add(l2.clone()).unwrap();

		let predicted = set.root_with(None, Some(l1.hashlock)).unwrap();
		set.remove(l1.hashlock).unwrap();
		assert_eq!(set.root(), predicted);
	}

	#[test]
	fn root_with_leaves_state_untouched_on_error() {
		let mut set = LockSet::new();
		set.add(lock(1, 100, 1)).unwrap();
		let before = set.hash_sequence.clone();

		let err = set.root_with(None, Some(Hash32::repeat_byte(0xFF)));
		assert!(err.is_err());
		assert_eq!(set.hash_sequence, before);
	}

	#[test]
	fn duplicate_hashlock_rejected() {
		let mut set = LockSet::new();
		set.add(lock(1, 100, 1)).unwrap();
		assert!(matches!(set.add(lock(2, 200, 1)), Err(ChannelError::DuplicateHashlock(_))));
	}

	#[test]
	fn proof_verifies_against_root() {
		let mut set = LockSet::new();
		let l1 = lock(1, 100, 1);
		let l2 = lock(2, 200, 2);
		let l3 = lock(3, 300, 3);
		set.add(l1.clone()).unwrap();
		set.add(l2).unwrap();
		set.add(l3).unwrap();

		let steps = set.proof(l1.hashlock).unwrap();
		assert!(merkle::verify(l1.hash(), &steps, set.root()));
	}
}
