#![warn(clippy::missing_docs_in_private_items)]

use web3::types::U256;

use crate::traits::ToBytes;

impl ToBytes for U256 {
	fn to_bytes(&self) -> Vec<u8> {
		let mut bytes = [0u8; 32];
		self.to_big_endian(&mut bytes);
		bytes.to_vec()
	}
}
