#![warn(clippy::missing_docs_in_private_items)]

use htlc_primitives::types::{
	Address,
	Hash32,
	Nonce,
	U256,
};
use serde::{
	Deserialize,
	Serialize,
};

use crate::types::Lock;

/// Fields common to every registerable transfer message.
///
/// `sender` is the identity recovered upstream from the message
/// signature; this crate never verifies signatures itself.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransferCommon {
	pub nonce: Nonce,
	pub asset: Address,
	pub transferred_amount: U256,
	pub recipient: Address,
	pub locksroot: Hash32,
	pub sender: Address,
}

/// A transfer of already-unlocked balance, optionally carrying the
/// `secret` that claims a lock the recipient is holding on our behalf.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DirectTransfer {
	pub common: TransferCommon,
	pub secret: Option<Vec<u8>>,
}

/// A transfer that locks `lock.amount` behind a hashlock instead of
/// moving it directly; redeemable by the recipient once the preimage of
/// `lock.hashlock` is revealed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LockedTransfer {
	pub common: TransferCommon,
	pub lock: Lock,
}

/// A [`LockedTransfer`] augmented with the routing fields of a
/// multi-hop mediated payment. The mediation itself (fee computation,
/// next-hop selection) is out of scope for this engine; these fields
/// are carried opaquely.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MediatedTransfer {
	pub locked: LockedTransfer,
	pub initiator: Address,
	pub target: Address,
	pub fee: U256,
}

/// A [`LockedTransfer`] sent back to the original sender of a
/// mediated transfer this node could not forward.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RefundTransfer {
	pub locked: LockedTransfer,
}

/// A notification that a previously sent transfer has timed out.
///
/// Unlike the other variants this carries no nonce, recipient, or
/// locksroot — it is never passed to [`crate::Channel::register_transfer`];
/// it is only constructed, for out-of-band dispatch to the counterparty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransferTimeout {
	pub transfer_hash: Hash32,
	pub hashlock: Hash32,
}

/// The transfer messages the engine can validate and apply.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Transfer {
	Direct(DirectTransfer),
	Locked(LockedTransfer),
	Mediated(MediatedTransfer),
	Refund(RefundTransfer),
}

impl Transfer {
	/// The message's common header fields.
	pub fn common(&self) -> &TransferCommon {
		match self {
			Transfer::Direct(t) => &t.common,
			Transfer::Locked(t) => &t.common,
			Transfer::Mediated(t) => &t.locked.common,
			Transfer::Refund(t) => &t.locked.common,
		}
	}

	/// The lock this message carries, if it is a locked variant.
	pub fn lock(&self) -> Option<&Lock> {
		match self {
			Transfer::Direct(_) => None,
			Transfer::Locked(t) => Some(&t.lock),
			Transfer::Mediated(t) => Some(&t.locked.lock),
			Transfer::Refund(t) => Some(&t.locked.lock),
		}
	}

	/// The revealed secret carried by a [`DirectTransfer`], if any.
	pub fn secret(&self) -> Option<&[u8]> {
		match self {
			Transfer::Direct(t) => t.secret.as_deref(),
			_ => None,
		}
	}
}

impl From<DirectTransfer> for Transfer {
	fn from(transfer: DirectTransfer) -> Self {
		Transfer::Direct(transfer)
	}
}

impl From<LockedTransfer> for Transfer {
	fn from(transfer: LockedTransfer) -> Self {
		Transfer::Locked(transfer)
	}
}

impl From<MediatedTransfer> for Transfer {
	fn from(transfer: MediatedTransfer) -> Self {
		Transfer::Mediated(transfer)
	}
}

impl From<RefundTransfer> for Transfer {
	fn from(transfer: RefundTransfer) -> Self {
		Transfer::Refund(transfer)
	}
}
