#![warn(clippy::missing_docs_in_private_items)]

pub use web3::types::{
	Address,
	Bytes,
	H256,
	U256,
};

/// Alias type for a chain block number.
pub type BlockNumber = u64;

/// Alias type for the 32-byte domain hash `H` used throughout the engine
/// (lock hashes, hashlocks, Merkle node hashes).
pub type Hash32 = H256;

/// Alias type for a per-sender, per-channel sequence number.
///
/// Value `0` is reserved on-chain to mean "no transfer has happened yet";
/// the first accepted transfer carries nonce `1`.
pub type Nonce = u64;
