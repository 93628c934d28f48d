#![warn(clippy::missing_docs_in_private_items)]

/// Lock type.
mod lock;
pub use lock::Lock;

/// Transfer message variants.
mod transfer;
pub use transfer::{
	DirectTransfer,
	LockedTransfer,
	MediatedTransfer,
	RefundTransfer,
	Transfer,
	TransferCommon,
	TransferTimeout,
};

pub use htlc_primitives::types::{
	Address,
	BlockNumber,
	Hash32,
	Nonce,
	U256,
};
