#![warn(clippy::missing_docs_in_private_items)]

/// Convert a type to its canonical byte representation.
pub trait ToBytes {
	fn to_bytes(&self) -> Vec<u8>;
}
