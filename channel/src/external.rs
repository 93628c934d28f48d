#![warn(clippy::missing_docs_in_private_items)]

use htlc_primitives::types::Hash32;

use crate::types::BlockNumber;

/// The narrow slice of on-chain state and action a [`crate::Channel`]
/// needs. Implementations typically wrap a netting-channel contract
/// binding and a block-number feed; none of that lives in this crate.
pub trait ExternalChain {
	/// The current block number, used to bound lock expirations against
	/// `reveal_timeout`/`settle_timeout`.
	fn block_number(&self) -> BlockNumber;

	/// Whether the on-chain channel is still open (not closed or
	/// settled). No transfer may be registered or constructed once this
	/// is `false`.
	fn is_open(&self) -> bool;

	/// Record that this channel is waiting on `hashlock`'s secret,
	/// so it can be looked up if the secret surfaces via a blockchain
	/// log rather than a direct message.
	fn register_channel_for_hashlock(&mut self, hashlock: Hash32);
}
