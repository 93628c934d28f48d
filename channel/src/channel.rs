#![warn(clippy::missing_docs_in_private_items)]

use htlc_primitives::hashing::hash_secret;

use crate::{
	endpoint::EndpointState,
	errors::ChannelError,
	external::ExternalChain,
	types::{
		Address,
		BlockNumber,
		DirectTransfer,
		Hash32,
		Lock,
		LockedTransfer,
		MediatedTransfer,
		RefundTransfer,
		Transfer,
		TransferCommon,
		TransferTimeout,
		U256,
	},
};

/// Two [`EndpointState`]s and the narrow on-chain view tying them
/// together: the full bidirectional off-chain state of one payment
/// channel.
#[derive(Clone, Debug)]
pub struct Channel<E: ExternalChain> {
	asset: Address,
	our: EndpointState,
	partner: EndpointState,
	external: E,
	reveal_timeout: BlockNumber,
	settle_timeout: BlockNumber,
	/// Transfers we sent, kept for settlement.
	sent_transfers: Vec<Transfer>,
	/// Transfers we received, kept for settlement.
	received_transfers: Vec<Transfer>,
}

impl<E: ExternalChain> Channel<E> {
	/// Open a new channel. `reveal_timeout` must be strictly smaller
	/// than `settle_timeout`, or there is no safe window in which a
	/// revealed secret can be claimed before settlement.
	pub fn new(
		asset: Address,
		our_address: Address,
		partner_address: Address,
		external: E,
		reveal_timeout: BlockNumber,
		settle_timeout: BlockNumber,
	) -> Result<Self, ChannelError> {
		if reveal_timeout >= settle_timeout {
			return Err(ChannelError::InvalidTimeoutConfig)
		}

		Ok(Self {
			asset,
			our: EndpointState::new(our_address),
			partner: EndpointState::new(partner_address),
			external,
			reveal_timeout,
			settle_timeout,
			sent_transfers: Vec::new(),
			received_transfers: Vec::new(),
		})
	}

	pub fn is_open(&self) -> bool {
		self.external.is_open()
	}

	/// The endpoint state belonging to `address`, ours or the
	/// partner's.
	pub fn get_state_for(&self, address: Address) -> Result<&EndpointState, ChannelError> {
		if self.our.address == address {
			Ok(&self.our)
		} else if self.partner.address == address {
			Ok(&self.partner)
		} else {
			Err(ChannelError::AddressMismatch(address))
		}
	}

	/// Record a new on-chain deposit total for whichever side owns
	/// `address`. Called when the external chain reports a deposit
	/// event; does not itself touch the chain.
	pub fn update_contract_balance(&mut self, address: Address, new_balance: U256) -> Result<(), ChannelError> {
		if self.our.address == address {
			self.our.update_contract_balance(new_balance)
		} else if self.partner.address == address {
			self.partner.update_contract_balance(new_balance)
		} else {
			Err(ChannelError::AddressMismatch(address))
		}
	}

	pub fn our_state(&self) -> &EndpointState {
		&self.our
	}

	pub fn partner_state(&self) -> &EndpointState {
		&self.partner
	}

	/// Our current spendable balance.
	pub fn balance(&self) -> Result<U256, ChannelError> {
		self.our.balance(&self.partner)
	}

	/// How much more we can still send to the partner right now.
	pub fn distributable(&self) -> Result<U256, ChannelError> {
		self.our.distributable(&self.partner)
	}

	/// The amount of our own asset currently locked, waiting on a
	/// secret to be revealed to the partner.
	pub fn locked(&self) -> Result<U256, ChannelError> {
		self.partner.locks.outstanding()
	}

	/// The amount we are holding on the partner's behalf, waiting on a
	/// secret from them.
	pub fn outstanding(&self) -> Result<U256, ChannelError> {
		self.our.locks.outstanding()
	}

	pub fn sent_transfers(&self) -> &[Transfer] {
		&self.sent_transfers
	}

	pub fn received_transfers(&self) -> &[Transfer] {
		&self.received_transfers
	}

	/// Validate and apply a signed transfer, updating the channel's
	/// state and appending it to the sent or received log.
	///
	/// The transfer's `recipient` field determines direction: a
	/// transfer addressed to the partner is outbound (sent by us), one
	/// addressed to us is inbound.
	pub fn register_transfer(&mut self, transfer: Transfer) -> Result<(), ChannelError> {
		if !self.is_open() {
			return Err(ChannelError::ChannelClosed)
		}

		let recipient = transfer.common().recipient;
		if recipient == self.partner.address {
			self.validate_and_apply(&transfer, true)?;
			self.sent_transfers.push(transfer);
			Ok(())
		} else if recipient == self.our.address {
			self.validate_and_apply(&transfer, false)?;
			self.received_transfers.push(transfer);
			Ok(())
		} else {
			Err(ChannelError::UnknownRecipient)
		}
	}

	/// The checks a transfer must pass, in order, before any part of the
	/// channel's state is mutated. No check may run after a mutation has
	/// occurred.
	fn validate_and_apply(&mut self, transfer: &Transfer, from_is_our: bool) -> Result<(), ChannelError> {
		let (from, to) = if from_is_our { (&mut self.our, &mut self.partner) } else { (&mut self.partner, &mut self.our) };
		let common = transfer.common();

		// 1. asset
		if common.asset != self.asset {
			return Err(ChannelError::AssetMismatch)
		}
		// 2. recipient
		if common.recipient != to.address {
			return Err(ChannelError::UnknownRecipient)
		}
		// 3. sender
		if common.sender != from.address {
			return Err(ChannelError::UnsignedTransfer)
		}
		// 4. monotonic transferred_amount
		if common.transferred_amount < from.transferred_amount {
			return Err(ChannelError::NegativeTransfer { current: from.transferred_amount, new: common.transferred_amount })
		}
		// 5. nonce
		if common.nonce < 1 || common.nonce != from.nonce {
			return Err(ChannelError::InvalidNonce { expected: from.nonce, got: common.nonce })
		}

		let amount = common
			.transferred_amount
			.checked_sub(from.transferred_amount)
			.ok_or(ChannelError::ArithmeticOverflow)?;
		let distributable = from.distributable(to)?;
		// 6. amount within distributable
		if amount > distributable {
			return Err(ChannelError::InsufficientBalance { amount, distributable })
		}

		if let Some(lock) = transfer.lock() {
			let block_number = self.external.block_number();

			let total = amount.checked_add(lock.amount).ok_or(ChannelError::ArithmeticOverflow)?;
			// 7. amount plus the new lock within distributable
			if total > distributable {
				return Err(ChannelError::InsufficientBalance { amount: total, distributable })
			}

			if to.locks.contains(&lock.hashlock) {
				return Err(ChannelError::DuplicateHashlock(lock.hashlock))
			}

			// 8. expiration leaves room to settle
			let remaining = lock.expiration.checked_sub(block_number).ok_or(ChannelError::InvalidLockTime)?;
			if !(remaining < self.settle_timeout) {
				return Err(ChannelError::InvalidLockTime)
			}
			// 9. expiration leaves room to reveal
			if !(remaining > self.reveal_timeout) {
				return Err(ChannelError::InvalidLockTime)
			}

			// 10. committed locksroot matches what we'd get by adding this lock
			let expected_locksroot = to.locks.root_with(Some(lock), None)?;
			if expected_locksroot != common.locksroot {
				return Err(ChannelError::InvalidLocksRoot)
			}
		}

		// all checks passed; mutate.

		if let Some(lock) = transfer.lock() {
			to.locks.add(lock.clone())?;
			self.external.register_channel_for_hashlock(lock.hashlock);
		}

		if let Some(secret) = transfer.secret() {
			to.claim_locked(from, secret, Some(common.locksroot))?;
		}

		from.transferred_amount = common.transferred_amount;
		from.nonce = from.nonce.checked_add(1).ok_or(ChannelError::ArithmeticOverflow)?;

		Ok(())
	}

	/// Release the lock matching `secret`'s hash, on whichever side of
	/// the channel is holding it.
	pub fn claim_locked(&mut self, secret: &[u8]) -> Result<U256, ChannelError> {
		let hashlock = hash_secret(secret);

		if self.our.locks.contains(&hashlock) {
			self.our.claim_locked(&mut self.partner, secret, None)
		} else if self.partner.locks.contains(&hashlock) {
			self.partner.claim_locked(&mut self.our, secret, None)
		} else {
			Err(ChannelError::UnknownHashlock(hashlock))
		}
	}

	/// A [`DirectTransfer`] moving `amount` to the partner, optionally
	/// revealing `secret` to let them claim a lock we hold.
	///
	/// The caller must sign and [`Self::register_transfer`] the result
	/// before it is sent.
	pub fn create_direct_transfer(&self, amount: U256, secret: Option<Vec<u8>>) -> Result<DirectTransfer, ChannelError> {
		if !self.is_open() {
			return Err(ChannelError::ChannelClosed)
		}

		let distributable = self.our.distributable(&self.partner)?;
		if amount.is_zero() || amount > distributable {
			return Err(ChannelError::InsufficientFunds)
		}

		let transferred_amount = self.our.transferred_amount.checked_add(amount).ok_or(ChannelError::ArithmeticOverflow)?;
		let locksroot = self.partner.locks.root();

		Ok(DirectTransfer {
			common: TransferCommon {
				nonce: self.our.nonce,
				asset: self.asset,
				transferred_amount,
				recipient: self.partner.address,
				locksroot,
				sender: self.our.address,
			},
			secret,
		})
	}

	/// A [`LockedTransfer`] locking `amount` behind `hashlock`, expiring
	/// at `expiration`.
	pub fn create_locked_transfer(
		&self,
		amount: U256,
		expiration: BlockNumber,
		hashlock: Hash32,
	) -> Result<LockedTransfer, ChannelError> {
		if !self.is_open() {
			return Err(ChannelError::ChannelClosed)
		}

		let block_number = self.external.block_number();
		let remaining = expiration.checked_sub(block_number).ok_or(ChannelError::InvalidLockTime)?;
		if !(remaining < self.settle_timeout) {
			return Err(ChannelError::InvalidLockTime)
		}
		if !(remaining > self.reveal_timeout) {
			return Err(ChannelError::InvalidLockTime)
		}

		let distributable = self.our.distributable(&self.partner)?;
		if amount.is_zero() || amount > distributable {
			return Err(ChannelError::InsufficientFunds)
		}

		let lock = Lock::new(amount, expiration, hashlock);
		let transferred_amount = self.our.transferred_amount;
		let locksroot = self.partner.locks.root_with(Some(&lock), None)?;

		Ok(LockedTransfer {
			common: TransferCommon {
				nonce: self.our.nonce,
				asset: self.asset,
				transferred_amount,
				recipient: self.partner.address,
				locksroot,
				sender: self.our.address,
			},
			lock,
		})
	}

	/// A [`MediatedTransfer`]: a locked transfer carrying routing
	/// metadata for a multi-hop payment. Routing itself is not this
	/// crate's concern; the fields are carried opaquely.
	pub fn create_mediated_transfer(
		&self,
		initiator: Address,
		target: Address,
		fee: U256,
		amount: U256,
		expiration: BlockNumber,
		hashlock: Hash32,
	) -> Result<MediatedTransfer, ChannelError> {
		let locked = self.create_locked_transfer(amount, expiration, hashlock)?;
		Ok(MediatedTransfer { locked, initiator, target, fee })
	}

	/// A [`RefundTransfer`] sending `transfer`'s lock back to its
	/// original sender, because it could not be forwarded.
	///
	/// `transfer` must be a lock we are currently holding.
	pub fn create_refund_transfer_for(&self, transfer: &LockedTransfer) -> Result<RefundTransfer, ChannelError> {
		if !self.is_open() {
			return Err(ChannelError::ChannelClosed)
		}
		let lock = &transfer.lock;
		if !self.our.locks.contains(&lock.hashlock) {
			return Err(ChannelError::UnknownLock(lock.hashlock))
		}

		let locked = self.create_locked_transfer(lock.amount, lock.expiration, lock.hashlock)?;
		Ok(RefundTransfer { locked })
	}

	/// A [`TransferTimeout`] notifying the partner that `transfer` has
	/// timed out. `transfer_hash` identifies the original message at
	/// the transport layer; this crate does not compute it.
	pub fn create_timeout_transfer_for(
		&self,
		transfer: &LockedTransfer,
		transfer_hash: Hash32,
	) -> Result<TransferTimeout, ChannelError> {
		if !self.is_open() {
			return Err(ChannelError::ChannelClosed)
		}
		let lock = &transfer.lock;
		if !self.our.locks.contains(&lock.hashlock) {
			return Err(ChannelError::UnknownLock(lock.hashlock))
		}

		Ok(TransferTimeout { transfer_hash, hashlock: lock.hashlock })
	}
}
