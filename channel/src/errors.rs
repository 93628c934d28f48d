#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

use crate::types::Hash32;

/// The distinct failure kinds surfaced by the channel engine.
///
/// All validation errors are fatal to the message being processed: the
/// channel's state is never partially mutated when one of these is
/// returned. The engine does not retry; retry is a transport-layer
/// concern of the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
	#[error("transfer recipient `{0:?}` is neither our address nor the partner's")]
	AddressMismatch(web3::types::Address),
	#[error("transfer asset does not match this channel's asset")]
	AssetMismatch,
	#[error("transfer recipient does not match the expected endpoint")]
	UnknownRecipient,
	#[error("transfer sender does not match the recovered signer")]
	UnsignedTransfer,
	#[error("transferred_amount `{new}` is lower than the current `{current}`")]
	NegativeTransfer { current: web3::types::U256, new: web3::types::U256 },
	#[error("nonce `{got}` does not match the expected next nonce `{expected}`")]
	InvalidNonce { expected: u64, got: u64 },
	#[error("transfer of `{amount}` exceeds distributable balance `{distributable}`")]
	InsufficientBalance { amount: web3::types::U256, distributable: web3::types::U256 },
	#[error("lock expiration does not satisfy the reveal/settle timeout window")]
	InvalidLockTime,
	#[error("committed locksroot does not match the recomputed expected root")]
	InvalidLocksRoot,
	#[error("hashlock `{0:?}` does not correspond to any tracked lock")]
	InvalidSecret(Hash32),
	#[error("hashlock `{0:?}` is not held by either side of the channel")]
	UnknownHashlock(Hash32),
	#[error("channel is not open")]
	ChannelClosed,
	#[error("amount must be positive and within the distributable balance")]
	InsufficientFunds,
	#[error("reveal_timeout must be smaller than settle_timeout")]
	InvalidTimeoutConfig,
	#[error("hashlock `{0:?}` is already present in the lock set")]
	DuplicateHashlock(Hash32),
	#[error("hashlock `{0:?}` is not present in the lock set")]
	UnknownLock(Hash32),
	#[error("arithmetic overflow while accumulating balances")]
	ArithmeticOverflow,
}
