#![warn(clippy::missing_docs_in_private_items)]

//! A bidirectional off-chain payment channel with hash-timelocked
//! (HTLC) conditional transfers.
//!
//! [`Channel`] orchestrates two [`EndpointState`]s and an
//! [`ExternalChain`] handle: it validates and applies signed transfers,
//! constructs outbound transfer messages, and settles revealed secrets
//! against the [`LockSet`] each side is holding. Nothing here signs,
//! serializes for the wire, or talks to a network; those are callers'
//! concerns.

/// Per-pair accounting: balances, nonces, and the lock set each side
/// holds.
mod endpoint;
pub use endpoint::EndpointState;

/// The channel's error taxonomy.
mod errors;
pub use errors::ChannelError;

/// The narrow interface a channel needs from the chain it settles on.
mod external;
pub use external::ExternalChain;

/// The orchestrating `Channel` type.
#[allow(clippy::module_inception)]
mod channel;
pub use channel::Channel;

/// The HTLC lock accumulator and its Merkle root.
mod lockset;
pub use lockset::LockSet;

/// A fixed, domain-separated Merkle tree over lock hashes.
pub mod merkle;

/// Locks and transfer message types.
pub mod types;

#[cfg(test)]
mod tests;
