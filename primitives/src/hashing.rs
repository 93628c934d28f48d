#![warn(clippy::missing_docs_in_private_items)]

use web3::signing::keccak256;

use crate::types::Hash32;

/// The 32-byte domain hash `H` used throughout the engine: lock hashes,
/// hashlocks (`H(secret)`), and Merkle tree node hashes.
pub fn domain_hash(data: &[u8]) -> Hash32 {
	Hash32::from(keccak256(data))
}

/// `H(secret)`, the hashlock that gates a lock.
pub fn hash_secret(secret: &[u8]) -> Hash32 {
	domain_hash(secret)
}
