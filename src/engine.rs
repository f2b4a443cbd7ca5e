//! The start/ready/digest handshake shared by [`Sha256Engine`](crate::Sha256Engine)
//! and [`Sha3Engine`](crate::Sha3Engine).

use thiserror::Error;

pub const DIGEST_LEN: usize = 32;

/// A 256-bit digest, most significant byte first.
pub type Digest = [u8; DIGEST_LEN];

/// How much work a call to `submit` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	/// `submit` only latches the block; every unit of work waits for `step`.
	#[default]
	Stepped,
	/// `submit` steps the block to completion before returning.
	Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
	#[error("engine is still processing a block")]
	Busy,
	#[error("block is {actual} bytes long, expected {expected}")]
	BlockLength {expected: usize, actual: usize},
	#[error("no digest is available until a final block completes")]
	DigestNotReady,
}

/// A hash engine that consumes one pre-padded block at a time.
///
/// At most one block is in flight: `ready` is false from the moment a block
/// is accepted until its last step has run, and `submit` is refused in
/// between. Each call to `step` performs one round (or one load/finalize
/// step), so the number of steps per block is fixed for each algorithm.
pub trait Engine {
	type Block: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

	const BLOCK_LEN: usize;

	/// Steps needed to take a final block from `submit` back to `ready`.
	const STEPS_PER_BLOCK: usize;

	/// Latches `block` and starts processing it. Returns `false`, leaving the
	/// engine untouched, if a block is already in flight.
	fn submit(&mut self, block: &Self::Block, is_last: bool) -> bool;

	fn ready(&self) -> bool;

	/// Advances the state machine by one unit of work. Does nothing while idle.
	fn step(&mut self);

	fn try_digest(&self) -> Result<Digest, EngineError>;

	/// Returns the external reset state: initial registers, idle, no digest.
	fn reset(&mut self);

	/// Like `submit`, but takes an unsized slice and reports why a block
	/// was refused.
	fn try_submit(&mut self, bytes: &[u8], is_last: bool) -> Result<(), EngineError> {
		let block = Self::Block::try_from(bytes).map_err(|_| EngineError::BlockLength {
			expected: Self::BLOCK_LEN,
			actual: bytes.len(),
		})?;

		if self.submit(&block, is_last) {
			Ok(())
		} else {
			Err(EngineError::Busy)
		}
	}

	/// The digest of the last completed final block.
	///
	/// Reading it at any other time is a contract violation and panics.
	fn digest(&self) -> Digest {
		match self.try_digest() {
			Ok(digest) => digest,
			Err(err) => panic!("digest read out of turn: {}", err),
		}
	}

	/// Steps until the engine is ready again, returning how many steps it took.
	fn finish(&mut self) -> usize {
		let mut steps = 0;

		while !self.ready() {
			self.step();
			steps += 1;
		}

		steps
	}

	/// Submits `block` and runs it to completion, returning the digest if
	/// the block produced one.
	fn process(&mut self, block: &Self::Block, is_last: bool) -> Result<Option<Digest>, EngineError> {
		if !self.submit(block, is_last) {
			return Err(EngineError::Busy);
		}

		self.finish();

		Ok(self.try_digest().ok())
	}
}
