#![warn(clippy::missing_docs_in_private_items)]

//! A fixed, binary, domain-separated Merkle tree over 32-byte leaves.
//!
//! Leaves are expected to already be hashes (e.g. `H(lock.as_bytes())`);
//! this module only combines them into internal nodes and produces
//! inclusion proofs. An empty leaf set has the all-zero root.

use htlc_primitives::{
	hashing::domain_hash,
	types::Hash32,
};
use serde::{
	Deserialize,
	Serialize,
};

/// Domain separator prefixed to every internal node's preimage, so an
/// internal node hash can never be confused with a leaf hash of the
/// same 32-byte value.
const NODE_PREFIX: u8 = 0x01;

/// Which side of a pair a proof's sibling sits on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Side {
	Left,
	Right,
}

/// One step of an inclusion proof: the sibling hash and which side of
/// the current node it combines on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProofStep {
	pub sibling: Hash32,
	pub side: Side,
}

/// Combine two child hashes into their parent's hash.
fn combine(left: &Hash32, right: &Hash32) -> Hash32 {
	let mut buf = Vec::with_capacity(1 + 32 + 32);
	buf.push(NODE_PREFIX);
	buf.extend_from_slice(left.as_bytes());
	buf.extend_from_slice(right.as_bytes());
	domain_hash(&buf)
}

/// Reduce one tree level to the next. Pairs are combined left-to-right;
/// a trailing unpaired node is carried up unchanged rather than
/// duplicated.
fn next_level(level: &[Hash32]) -> Vec<Hash32> {
	let mut next = Vec::with_capacity((level.len() + 1) / 2);
	let mut i = 0;
	while i + 1 < level.len() {
		next.push(combine(&level[i], &level[i + 1]));
		i += 2;
	}
	if i < level.len() {
		next.push(level[i]);
	}
	next
}

/// Compute the Merkle root of an ordered sequence of leaf hashes.
///
/// An empty sequence yields the all-zero root.
pub fn root(leaves: &[Hash32]) -> Hash32 {
	if leaves.is_empty() {
		return Hash32::zero()
	}

	let mut level = leaves.to_vec();
	while level.len() > 1 {
		level = next_level(&level);
	}
	level[0]
}

/// Produce the sibling chain authenticating `leaves[index]` under
/// `root(leaves)`.
///
/// Returns `None` if `index` is out of bounds.
pub fn proof(leaves: &[Hash32], index: usize) -> Option<Vec<ProofStep>> {
	if index >= leaves.len() {
		return None
	}

	let mut steps = Vec::new();
	let mut level = leaves.to_vec();
	let mut idx = index;
	while level.len() > 1 {
		let pair_idx = idx ^ 1;
		if pair_idx < level.len() {
			let side = if idx % 2 == 0 { Side::Right } else { Side::Left };
			steps.push(ProofStep { sibling: level[pair_idx], side });
		}
		level = next_level(&level);
		idx /= 2;
	}
	Some(steps)
}

/// Reconstruct a root from a leaf and its proof, and compare against
/// `expected_root`.
pub fn verify(leaf: Hash32, steps: &[ProofStep], expected_root: Hash32) -> bool {
	let mut current = leaf;
	for step in steps {
		current = match step.side {
			Side::Right => combine(&current, &step.sibling),
			Side::Left => combine(&step.sibling, &current),
		};
	}
	current == expected_root
}

#[cfg(test)]
mod tests {
	use super::*;

	fn leaf(byte: u8) -> Hash32 {
		Hash32::repeat_byte(byte)
	}

	#[test]
	fn empty_set_has_zero_root() {
		assert_eq!(root(&[]), Hash32::zero());
	}

	#[test]
	fn single_leaf_is_its_own_root() {
		let leaves = vec![leaf(1)];
		assert_eq!(root(&leaves), leaf(1));
	}

	#[test]
	fn every_leaf_proof_verifies() {
		for n in 1..=9usize {
			let leaves: Vec<Hash32> = (0..n as u8).map(leaf).collect();
			let r = root(&leaves);
			for (i, l) in leaves.iter().enumerate() {
				let steps = proof(&leaves, i).expect("index in bounds");
				assert!(verify(*l, &steps, r), "leaf {i} of {n} failed to verify");
			}
		}
	}

	#[test]
	fn tampered_leaf_does_not_verify() {
		let leaves = vec![leaf(1), leaf(2), leaf(3)];
		let r = root(&leaves);
		let steps = proof(&leaves, 1).unwrap();
		assert!(!verify(leaf(9), &steps, r));
	}

	#[test]
	fn out_of_bounds_index_has_no_proof() {
		let leaves = vec![leaf(1), leaf(2)];
		assert!(proof(&leaves, 2).is_none());
	}
}
