#![warn(clippy::missing_docs_in_private_items)]

use htlc_primitives::hashing::hash_secret;
use serde::{
	Deserialize,
	Serialize,
};

use crate::{
	errors::ChannelError,
	lockset::LockSet,
	types::{
		Address,
		Hash32,
		Nonce,
		U256,
	},
};

/// One party's accounting state within a [`crate::Channel`].
///
/// A channel holds two of these, `our` and `partner`; every derived
/// quantity (`balance`, `distributable`) is a function of a pair, never
/// of one side alone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointState {
	pub address: Address,
	/// The amount this party has deposited on-chain, net of withdrawals.
	pub contract_balance: U256,
	/// Cumulative amount this party has transferred to its partner,
	/// across the lifetime of the channel. Monotonically non-decreasing.
	pub transferred_amount: U256,
	/// The next nonce this party's outbound transfers must carry.
	/// Starts at 1; there is no nonce 0.
	pub nonce: Nonce,
	/// Locks this party currently holds against its partner.
	pub locks: LockSet,
}

impl EndpointState {
	pub fn new(address: Address) -> Self {
		Self { address, contract_balance: U256::zero(), transferred_amount: U256::zero(), nonce: 1, locks: LockSet::new() }
	}

	/// Record a new on-chain deposit total. `new_balance` must not be
	/// lower than the current one; on-chain balances only grow via
	/// deposits in this engine's model (withdrawals are out of scope).
	pub fn update_contract_balance(&mut self, new_balance: U256) -> Result<(), ChannelError> {
		if new_balance < self.contract_balance {
			return Err(ChannelError::NegativeTransfer { current: self.contract_balance, new: new_balance })
		}
		self.contract_balance = new_balance;
		Ok(())
	}

	/// This party's spendable balance against `other`:
	/// `contract_balance - transferred_amount + other.transferred_amount`.
	pub fn balance(&self, other: &EndpointState) -> Result<U256, ChannelError> {
		self.contract_balance
			.checked_sub(self.transferred_amount)
			.and_then(|b| b.checked_add(other.transferred_amount))
			.ok_or(ChannelError::ArithmeticOverflow)
	}

	/// This party's balance minus what `other` has outstanding in locks
	/// against it: the amount this party could still send right now.
	pub fn distributable(&self, other: &EndpointState) -> Result<U256, ChannelError> {
		let balance = self.balance(other)?;
		let locked = other.locks.outstanding()?;
		balance.checked_sub(locked).ok_or(ChannelError::ArithmeticOverflow)
	}

	/// Redeem the lock for `secret`, held by `self` on `partner`'s
	/// behalf, crediting `partner.transferred_amount` with its amount.
	///
	/// If `expected_locksroot` is given, the root `self.locks` would
	/// have after removing the lock is checked against it before
	/// anything is mutated.
	pub fn claim_locked(
		&mut self,
		partner: &mut EndpointState,
		secret: &[u8],
		expected_locksroot: Option<Hash32>,
	) -> Result<U256, ChannelError> {
		let hashlock = hash_secret(secret);
		if !self.locks.contains(&hashlock) {
			return Err(ChannelError::InvalidSecret(hashlock))
		}

		if let Some(expected) = expected_locksroot {
			let predicted = self.locks.root_with(None, Some(hashlock))?;
			if predicted != expected {
				return Err(ChannelError::InvalidLocksRoot)
			}
		}

		let lock = self.locks.remove(hashlock)?;
		partner.transferred_amount =
			partner.transferred_amount.checked_add(lock.amount).ok_or(ChannelError::ArithmeticOverflow)?;
		Ok(lock.amount)
	}
}
