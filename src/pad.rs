//! Turns messages into the padded blocks the engines expect.
//!
//! The engines never look at padding themselves; anything that produces
//! blocks with the layout below works just as well.

use thiserror::Error;

use crate::keccak::sha3::{Sha3Block, RATE_BYTES};
use crate::sha2::{Sha256Block, BLOCK_LEN};

/// Longest message that still leaves room for `0x80` and the 64-bit length.
pub const SHA256_MAX_MESSAGE: usize = BLOCK_LEN - 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PadError {
	#[error("message of {len} bytes does not fit in a single block (at most {max})")]
	MessageTooLong {len: usize, max: usize},
}

/// Pads `msg` into one SHA-256 block: the message, `0x80`, zeros, and the
/// message length in bits as a big-endian u64.
pub fn sha256_block(msg: &[u8]) -> Result<Sha256Block, PadError> {
	if msg.len() > SHA256_MAX_MESSAGE {
		return Err(PadError::MessageTooLong {len: msg.len(), max: SHA256_MAX_MESSAGE});
	}

	let mut block = [0; BLOCK_LEN];

	block[.. msg.len()].copy_from_slice(msg);
	block[msg.len()] = 0x80;

	let bit_length = msg.len() as u64 * 8;
	block[BLOCK_LEN - 8 ..].copy_from_slice(&bit_length.to_be_bytes());

	Ok(block)
}

/// Iterator over the SHA3-256 rate blocks of a message, in wire order.
pub struct Sha3Padding<'a> {
	bytes: &'a [u8],
	done: bool,
}

impl<'a> Sha3Padding<'a> {
	fn new(bytes: &'a [u8]) -> Self {
		Self {bytes, done: false}
	}
}

impl<'a> Iterator for Sha3Padding<'a> {
	type Item = Sha3Block;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let mut buf = [0; RATE_BYTES];

		if self.bytes.len() >= RATE_BYTES {
			buf.copy_from_slice(&self.bytes[.. RATE_BYTES]);
			self.bytes = &self.bytes[RATE_BYTES ..];
		} else {
			// a message that fills a whole number of blocks still gets a
			// final block holding nothing but padding
			buf[.. self.bytes.len()].copy_from_slice(self.bytes);
			buf[self.bytes.len()] |= 0x06;
			buf[RATE_BYTES - 1] |= 0x80;
			self.done = true;
		}

		Some(buf)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = if self.done {0} else {self.bytes.len() / RATE_BYTES + 1};

		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for Sha3Padding<'_> {}

impl core::iter::FusedIterator for Sha3Padding<'_> {}

/// Pads `msg` into SHA3-256 rate blocks: the message, `0x06`, zeros, and a
/// final `0x80` bit in the last byte of the last block.
pub fn sha3_256_blocks(msg: &[u8]) -> Sha3Padding<'_> {
	Sha3Padding::new(msg)
}

#[test]
fn sha256_block_layout() {
	let block = sha256_block(b"abc").unwrap();

	assert_eq!(&block[.. 4], &[0x61, 0x62, 0x63, 0x80]);
	assert!(block[4 .. 56].iter().all(|&byte| byte == 0));
	assert_eq!(&block[56 ..], &[0, 0, 0, 0, 0, 0, 0, 24]);
}

#[test]
fn sha256_block_rejects_long_messages() {
	assert!(sha256_block(&[0; 55]).is_ok());

	assert_eq!(
		sha256_block(&[0; 56]),
		Err(PadError::MessageTooLong {len: 56, max: 55}),
	);
}

#[test]
fn sha3_short_message_is_one_block() {
	let blocks: Vec<_> = sha3_256_blocks(b"abc").collect();

	assert_eq!(blocks.len(), 1);
	assert_eq!(&blocks[0][.. 4], &[0x61, 0x62, 0x63, 0x06]);
	assert_eq!(blocks[0][RATE_BYTES - 1], 0x80);
}

#[test]
fn sha3_delimiter_and_final_bit_share_a_byte() {
	let blocks: Vec<_> = sha3_256_blocks(&[0x11; RATE_BYTES - 1]).collect();

	assert_eq!(blocks.len(), 1);
	assert_eq!(blocks[0][RATE_BYTES - 1], 0x86);
}

#[test]
fn sha3_full_block_gets_padding_block() {
	let padding = sha3_256_blocks(&[0x11; RATE_BYTES]);
	assert_eq!(padding.len(), 2);

	let blocks: Vec<_> = padding.collect();

	assert_eq!(blocks[0], [0x11; RATE_BYTES]);
	assert_eq!(blocks[1][0], 0x06);
	assert_eq!(blocks[1][RATE_BYTES - 1], 0x80);
	assert!(blocks[1][1 .. RATE_BYTES - 1].iter().all(|&byte| byte == 0));
}
