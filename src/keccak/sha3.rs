//! [SHA3-256](https://en.wikipedia.org/wiki/SHA-3) as a sponge state machine:
//! absorb one 1088-bit rate block, permute for 24 steps, and squeeze the
//! digest once the final block has been permuted.
//!
//! Blocks arrive in wire order, most significant byte first. Keccak numbers
//! the bytes of a lane from the least significant end, so every lane is
//! byte-swapped on the way in and again on the way out.

use tracing::{debug, trace};
use zeroize::Zeroize;

use super::{round, State, NUM_ROUNDS};
use crate::engine::{Digest, Engine, EngineError, Mode, DIGEST_LEN};
use crate::pad;

pub const RATE_BYTES: usize = 136;
pub const RATE_LANES: usize = RATE_BYTES / 8;

/// Absorb, 24 permutation rounds, squeeze.
pub const STEPS_PER_BLOCK: usize = 1 + NUM_ROUNDS + 1;

/// Absorb and 24 permutation rounds; intermediate blocks are never squeezed.
pub const STEPS_PER_INTERMEDIATE_BLOCK: usize = 1 + NUM_ROUNDS;

/// A padded 1088-bit rate block in wire order.
pub type Sha3Block = [u8; RATE_BYTES];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha3Phase {
	Idle,
	/// XOR the rate block into the first 17 lanes.
	Absorb,
	/// One permutation round per step.
	Permute,
	/// Read the digest out of the first four lanes and clear the state.
	Squeeze,
}

/// Converts eight wire-order bytes into a Keccak lane.
pub fn lane_from_wire(bytes: [u8; 8]) -> u64 {
	u64::from_be_bytes(bytes).swap_bytes()
}

/// Converts a Keccak lane back into eight wire-order bytes.
pub fn lane_to_wire(lane: u64) -> [u8; 8] {
	lane.swap_bytes().to_be_bytes()
}

pub struct Sha3Engine {
	mode: Mode,
	phase: Sha3Phase,
	round: usize,
	block: Sha3Block,
	is_last: bool,
	pending: bool,
	state: State,
	digest: Option<Digest>,
}

impl Sha3Engine {
	pub fn new() -> Self {
		Self::with_mode(Mode::default())
	}

	pub fn with_mode(mode: Mode) -> Self {
		Self {
			mode,
			phase: Sha3Phase::Idle,
			round: 0,
			block: [0; RATE_BYTES],
			is_last: false,
			pending: false,
			state: [[0; 5]; 5],
			digest: None,
		}
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn phase(&self) -> Sha3Phase {
		self.phase
	}

	/// The permutation round about to run during `Permute`, 0 otherwise.
	pub fn round(&self) -> usize {
		self.round
	}

	/// Whether an intermediate block has been permuted into the sponge and
	/// is waiting on the final block to be squeezed.
	pub fn is_absorbing(&self) -> bool {
		self.pending
	}

	fn enter(&mut self, phase: Sha3Phase, round: usize) {
		trace!(from = ?self.phase, to = ?phase, round, "sha3 phase transition");

		self.phase = phase;
		self.round = round;
	}

	fn absorb(&mut self) {
		for (i, bytes) in self.block.chunks_exact(8).enumerate() {
			let lane = lane_from_wire([
				bytes[0], bytes[1], bytes[2], bytes[3],
				bytes[4], bytes[5], bytes[6], bytes[7],
			]);

			self.state[i % 5][i / 5] ^= lane;
		}

		self.block.zeroize();

		self.enter(Sha3Phase::Permute, 0);
	}

	fn permute(&mut self) {
		round(&mut self.state, self.round);

		if self.round + 1 < NUM_ROUNDS {
			self.round += 1;
		} else if self.is_last {
			self.enter(Sha3Phase::Squeeze, 0);
		} else {
			// keep the state for the next block
			trace!("sha3 intermediate block absorbed");
			self.pending = true;
			self.enter(Sha3Phase::Idle, 0);
		}
	}

	fn squeeze(&mut self) {
		let mut out = [0; DIGEST_LEN];

		for i in 0 .. DIGEST_LEN / 8 {
			out[8 * i .. 8 * (i + 1)].copy_from_slice(&lane_to_wire(self.state[i][0]));
		}

		self.state.zeroize();
		self.is_last = false;
		self.pending = false;

		debug!("sha3 digest ready");

		self.digest = Some(out);
		self.enter(Sha3Phase::Idle, 0);
	}
}

impl Default for Sha3Engine {
	fn default() -> Self {
		Self::new()
	}
}

impl Engine for Sha3Engine {
	type Block = Sha3Block;

	const BLOCK_LEN: usize = RATE_BYTES;
	const STEPS_PER_BLOCK: usize = STEPS_PER_BLOCK;

	fn submit(&mut self, block: &Sha3Block, is_last: bool) -> bool {
		if !self.ready() {
			debug!(phase = ?self.phase, "sha3 block refused while busy");
			return false;
		}

		self.block = *block;
		self.is_last = is_last;
		self.digest = None;

		trace!(is_last, "sha3 block accepted");
		self.enter(Sha3Phase::Absorb, 0);

		if self.mode == Mode::Immediate {
			self.finish();
		}

		true
	}

	fn ready(&self) -> bool {
		self.phase == Sha3Phase::Idle
	}

	fn step(&mut self) {
		match self.phase {
			Sha3Phase::Idle => {},
			Sha3Phase::Absorb => self.absorb(),
			Sha3Phase::Permute => self.permute(),
			Sha3Phase::Squeeze => self.squeeze(),
		}
	}

	fn try_digest(&self) -> Result<Digest, EngineError> {
		match (self.phase, self.digest) {
			(Sha3Phase::Idle, Some(digest)) => Ok(digest),
			_ => Err(EngineError::DigestNotReady),
		}
	}

	fn reset(&mut self) {
		self.zeroize();
	}
}

impl Zeroize for Sha3Engine {
	fn zeroize(&mut self) {
		self.block.zeroize();
		self.state.zeroize();
		self.digest.zeroize();

		self.is_last = false;
		self.pending = false;
		self.phase = Sha3Phase::Idle;
		self.round = 0;
	}
}

impl Drop for Sha3Engine {
	fn drop(&mut self) {
		self.zeroize();
	}
}

impl core::fmt::Debug for Sha3Engine {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Sha3Engine")
			.field("mode", &self.mode)
			.field("phase", &self.phase)
			.field("round", &self.round)
			.field("is_last", &self.is_last)
			.field("pending", &self.pending)
			.finish_non_exhaustive()
	}
}

/// Returns the SHA3-256 digest of the byte slice passed to it, absorbing as
/// many rate blocks as the message needs.
pub fn sha3_256(bytes: &[u8]) -> Digest {
	let mut engine = Sha3Engine::with_mode(Mode::Immediate);
	let mut blocks = pad::sha3_256_blocks(bytes).peekable();

	while let Some(block) = blocks.next() {
		engine.submit(&block, blocks.peek().is_none());
	}

	engine.digest()
}

#[cfg(test)]
fn format_hash(hash: &[u8]) -> String {
	use std::fmt::Write;

	let mut out = String::new();

	for &byte in hash {
		write!(out, "{:>02x}", byte).unwrap();
	}

	out
}

#[cfg(test)]
fn hash_str(msg: &str) -> String {
	format_hash(&sha3_256(msg.as_bytes()))
}

#[test]
fn test_known_vectors() {
	assert_eq!(
		hash_str(""),
		"a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
	);

	assert_eq!(
		hash_str("abc"),
		"3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
	);

	assert_eq!(
		hash_str("a"),
		"80084bf2fba02475726feb2cab2d8215eab14bc6bdd8bfb2c8151257032ecd8b",
	);

	assert_eq!(
		hash_str("The quick brown fox jumps over the lazy dog"),
		"69070dda01975c8c120c3aada1b282394e7f032fa9cf32f4cb2259a0897dfc04",
	);

	assert_eq!(
		hash_str("abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
		"41c0dba2a9d6240849100376a8235e2c82e1b9998a999e21db32dd97496d3376",
	);

	assert_eq!(
		hash_str(&"a".repeat(135)),
		"8094bb53c44cfb1e67b7c30447f9a1c33696d2463ecc1d9c92538913392843c9",
	);
}

#[test]
fn test_multi_block_vectors() {
	// exactly one rate block of data, followed by a block that is all padding
	assert_eq!(
		hash_str(&"a".repeat(136)),
		"3fc5559f14db8e453a0a3091edbd2bc25e11528d81c66fa570a4efdcc2695ee1",
	);

	assert_eq!(
		hash_str(&"a".repeat(200)),
		"cce34485baf2bf2aca99b94833892a4f52896d3d153f7b840cc4f9fe695f1387",
	);

	assert_eq!(
		hash_str(&"x".repeat(300)),
		"34ed36d4d71d1a9a582cce5a006d6102d173fd867a27be7b2fe5d854587ddba2",
	);
}

#[test]
fn test_padding_only_block() {
	let mut block = [0; RATE_BYTES];
	block[0] = 0x06;
	block[RATE_BYTES - 1] = 0x80;

	let mut engine = Sha3Engine::new();
	assert!(engine.submit(&block, true));
	assert_eq!(engine.finish(), STEPS_PER_BLOCK);

	assert_eq!(
		format_hash(&engine.digest()),
		"a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
	);
}

#[test]
fn test_lane_byte_order() {
	let wire = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

	assert_eq!(lane_from_wire(wire), 0x0807060504030201);
	assert_eq!(lane_to_wire(0x0807060504030201), wire);
}

#[test]
fn test_phase_sequence() {
	let block = pad::sha3_256_blocks(b"abc").next().unwrap();
	let mut engine = Sha3Engine::new();

	assert!(engine.submit(&block, true));
	assert!(!engine.ready());
	assert_eq!(engine.phase(), Sha3Phase::Absorb);

	engine.step();

	for round_number in 0 .. NUM_ROUNDS {
		assert_eq!(engine.phase(), Sha3Phase::Permute);
		assert_eq!(engine.round(), round_number);
		assert_eq!(engine.try_digest(), Err(EngineError::DigestNotReady));
		engine.step();
	}

	assert_eq!(engine.phase(), Sha3Phase::Squeeze);
	assert!(!engine.ready());

	engine.step();
	assert!(engine.ready());
	assert!(!engine.is_absorbing());
	assert_eq!(
		format_hash(&engine.digest()),
		"3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
	);
}

#[test]
fn test_intermediate_block_keeps_state() {
	let message = [b'a'; 200];
	let blocks: Vec<_> = pad::sha3_256_blocks(&message).collect();
	assert_eq!(blocks.len(), 2);

	let mut engine = Sha3Engine::new();
	assert!(engine.submit(&blocks[0], false));
	assert_eq!(engine.finish(), STEPS_PER_INTERMEDIATE_BLOCK);

	assert!(engine.ready());
	assert!(engine.is_absorbing());
	assert_eq!(engine.try_digest(), Err(EngineError::DigestNotReady));

	assert!(engine.submit(&blocks[1], true));
	assert_eq!(engine.finish(), STEPS_PER_BLOCK);
	assert_eq!(engine.digest(), sha3_256(&message));
	assert!(!engine.is_absorbing());
}

#[test]
fn test_back_to_back_blocks() {
	let mut engine = Sha3Engine::new();

	let abc = pad::sha3_256_blocks(b"abc").next().unwrap();
	let fox = pad::sha3_256_blocks(b"The quick brown fox jumps over the lazy dog").next().unwrap();

	let first = engine.process(&abc, true).unwrap();
	let second = engine.process(&fox, true).unwrap();
	let third = engine.process(&abc, true).unwrap();

	assert_eq!(first, Some(sha3_256(b"abc")));
	assert_eq!(second, Some(sha3_256(b"The quick brown fox jumps over the lazy dog")));
	assert_eq!(first, third);
}

#[test]
fn test_busy_submission_is_ignored() {
	let abc = pad::sha3_256_blocks(b"abc").next().unwrap();
	let mut engine = Sha3Engine::new();

	assert!(engine.submit(&abc, true));

	for _ in 0 .. 10 {
		engine.step();
		assert!(!engine.submit(&[0xff; RATE_BYTES], true));
	}

	engine.finish();
	assert_eq!(engine.digest(), sha3_256(b"abc"));
}

#[test]
fn test_reset_discards_absorbed_blocks() {
	let message = [b'a'; 200];
	let blocks: Vec<_> = pad::sha3_256_blocks(&message).collect();

	let mut engine = Sha3Engine::with_mode(Mode::Immediate);
	engine.submit(&blocks[0], false);
	assert!(engine.is_absorbing());

	engine.reset();
	assert!(!engine.is_absorbing());

	let abc = pad::sha3_256_blocks(b"abc").next().unwrap();
	assert_eq!(engine.process(&abc, true).unwrap(), Some(sha3_256(b"abc")));
}

#[test]
fn test_reset_mid_permutation() {
	let message = [b'a'; 200];
	let blocks: Vec<_> = pad::sha3_256_blocks(&message).collect();

	let mut engine = Sha3Engine::new();
	assert_eq!(engine.process(&blocks[0], false).unwrap(), None);
	assert!(engine.is_absorbing());
	assert!(engine.submit(&blocks[1], true));

	// absorb, then ten permutation rounds
	for _ in 0 .. 11 {
		engine.step();
	}

	assert_eq!(engine.phase(), Sha3Phase::Permute);
	assert_eq!(engine.round(), 10);

	engine.reset();

	assert!(engine.ready());
	assert!(!engine.is_absorbing());
	assert_eq!(engine.phase(), Sha3Phase::Idle);
	assert_eq!(engine.round(), 0);
	assert_eq!(engine.try_digest(), Err(EngineError::DigestNotReady));
	assert_eq!(engine.state, [[0; 5]; 5]);

	let abc = pad::sha3_256_blocks(b"abc").next().unwrap();
	assert_eq!(engine.process(&abc, true).unwrap(), Some(sha3_256(b"abc")));
}
