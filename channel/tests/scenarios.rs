//! Multi-step scenarios that exercise a channel over many transfers,
//! rather than a single validation path: sustained locked-transfer
//! throughput, replay rejection after a claim, a stale proof failing
//! against a moved-on locksroot, and settlement via a Merkle proof
//! against the lock holder's root.

use htlc_channel::{
	merkle,
	Channel,
	ExternalChain,
};
use htlc_primitives::{
	hashing::hash_secret,
	types::{
		Address,
		BlockNumber,
		Hash32,
		U256,
	},
};

const REVEAL_TIMEOUT: BlockNumber = 10;
const SETTLE_TIMEOUT: BlockNumber = 50;

#[derive(Clone, Debug)]
struct FakeChain {
	block_number: BlockNumber,
	open: bool,
}

impl ExternalChain for FakeChain {
	fn block_number(&self) -> BlockNumber {
		self.block_number
	}

	fn is_open(&self) -> bool {
		self.open
	}

	fn register_channel_for_hashlock(&mut self, _hashlock: Hash32) {}
}

fn fixture(our_deposit: u64, partner_deposit: u64) -> Channel<FakeChain> {
	let mut channel = Channel::new(
		Address::repeat_byte(0xA5),
		Address::repeat_byte(0x01),
		Address::repeat_byte(0x02),
		FakeChain { block_number: 1, open: true },
		REVEAL_TIMEOUT,
		SETTLE_TIMEOUT,
	)
	.unwrap();
	channel.update_contract_balance(Address::repeat_byte(0x01), our_deposit.into()).unwrap();
	channel.update_contract_balance(Address::repeat_byte(0x02), partner_deposit.into()).unwrap();
	channel
}

fn secret_and_hashlock(seed: &[u8]) -> (Vec<u8>, Hash32) {
	let secret = seed.to_vec();
	let hashlock = hash_secret(&secret);
	(secret, hashlock)
}

#[test]
fn one_hundred_sequential_locked_transfers_with_selective_reveal() {
	let mut channel = fixture(10_000, 0);
	let mut secrets = Vec::with_capacity(100);

	for i in 0..100u64 {
		let (secret, hashlock) = secret_and_hashlock(&i.to_be_bytes());
		let locked = channel.create_locked_transfer(U256::from(10), 40, hashlock).unwrap();
		channel.register_transfer(locked.into()).unwrap();
		secrets.push(secret);
	}

	assert_eq!(channel.locked().unwrap(), U256::from(1_000));
	assert_eq!(channel.distributable().unwrap(), U256::from(9_000));

	let mut claimed = U256::zero();
	for (i, secret) in secrets.iter().enumerate() {
		if i % 2 == 0 {
			claimed = claimed + channel.claim_locked(secret).unwrap();
		}
	}

	assert_eq!(claimed, U256::from(500));
	assert_eq!(channel.locked().unwrap(), U256::from(500));
	assert_eq!(channel.our_state().transferred_amount, U256::from(500));
}

#[test]
fn replaying_a_claimed_locked_transfer_is_rejected_by_nonce() {
	let mut channel = fixture(100, 0);
	let (secret, hashlock) = secret_and_hashlock(b"once");

	let locked = channel.create_locked_transfer(U256::from(20), 30, hashlock).unwrap();
	channel.register_transfer(locked.clone().into()).unwrap();
	channel.claim_locked(&secret).unwrap();

	// Re-registering the exact same message — hashlock already removed
	// from the set it was held in, stale nonce — must not credit the
	// sender a second time.
	let err = channel.register_transfer(locked.into()).unwrap_err();
	assert!(matches!(err, htlc_channel::ChannelError::InvalidNonce { .. }));
	assert_eq!(channel.our_state().transferred_amount, U256::from(20));
}

#[test]
fn revealing_a_secret_moves_the_locksroot_so_a_stale_proof_no_longer_verifies() {
	let mut channel = fixture(100, 0);
	let (secret, hashlock) = secret_and_hashlock(b"l1");

	let locked = channel.create_locked_transfer(U256::from(10), 30, hashlock).unwrap();
	channel.register_transfer(locked.into()).unwrap();

	// The proof and root an on-chain unlock of L1 would be submitted
	// with, captured before the secret is revealed off-chain.
	let stale_root = channel.partner_state().locks.root();
	let leaf = channel.partner_state().locks.get(&hashlock).unwrap().hash();
	let stale_proof = channel.partner_state().locks.proof(hashlock).unwrap();
	assert!(merkle::verify(leaf, &stale_proof, stale_root));

	// The secret is revealed off-chain: the lock leaves the holder's
	// set and the commitment moves on.
	channel.claim_locked(&secret).unwrap();

	// A's next transfer commits to the new, moved-on locksroot.
	let direct = channel.create_direct_transfer(U256::from(5), None).unwrap();
	channel.register_transfer(direct.into()).unwrap();
	let new_root = channel.partner_state().locks.root();

	assert_eq!(channel.our_state().transferred_amount, U256::from(15));
	assert_ne!(new_root, stale_root);
	// A stale proof of L1, submitted against the channel's current
	// state, no longer verifies: the commitment has already moved on.
	assert!(!merkle::verify(leaf, &stale_proof, new_root));
}

#[test]
fn settlement_via_proof_verifies_against_the_holder_root() {
	let mut channel = fixture(100, 0);
	let (_s1, h1) = secret_and_hashlock(b"p1");
	let (_s2, h2) = secret_and_hashlock(b"p2");
	let (_s3, h3) = secret_and_hashlock(b"p3");

	for hashlock in [h1, h2, h3] {
		let locked = channel.create_locked_transfer(U256::from(10), 40, hashlock).unwrap();
		channel.register_transfer(locked.into()).unwrap();
	}

	let holder = channel.partner_state();
	let root = holder.locks.root();
	let proof = holder.locks.proof(h2).unwrap();
	let leaf = holder.locks.get(&h2).unwrap().hash();

	assert!(merkle::verify(leaf, &proof, root));
}
