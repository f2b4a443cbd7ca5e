//! SHA-256 as a five-phase state machine compressing one 512-bit block.
//!
//! The engine reinitializes the hash registers to the IV every time it loads
//! a block, so each block must be a complete padded message of at most 55
//! bytes. Chaining several blocks together is not supported.

pub mod round_functions;

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::engine::{Digest, Engine, EngineError, Mode};
use crate::pad::{self, PadError};

use round_functions::{compress_round, schedule_word, INITIAL_HASH, ROUND_CONSTANTS};

pub const BLOCK_LEN: usize = 64;

/// One load step, 48 schedule words, 64 compression rounds, one fold.
pub const STEPS_PER_BLOCK: usize = 1 + 48 + 64 + 1;

/// A padded 512-bit block, big-endian words.
pub type Sha256Block = [u8; BLOCK_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha256Phase {
	Idle,
	/// Split the block into W[0 .. 16] and reset H to the IV.
	Load,
	/// Expand W[16 .. 64], one word per step. `round()` counts from 16 here,
	/// since it names the schedule word being produced.
	Prepare,
	/// Run the 64 compression rounds, one per step.
	Process,
	/// Fold the working registers into H and publish the digest.
	Done,
}

pub struct Sha256Engine {
	mode: Mode,
	phase: Sha256Phase,
	round: usize,
	block: Sha256Block,
	hash_vals: [u32; 8],
	working_vars: [u32; 8],
	message_schedule: [u32; 64],
	digest: Option<Digest>,
}

impl Sha256Engine {
	pub fn new() -> Self {
		Self::with_mode(Mode::default())
	}

	pub fn with_mode(mode: Mode) -> Self {
		Self {
			mode,
			phase: Sha256Phase::Idle,
			round: 0,
			block: [0; BLOCK_LEN],
			hash_vals: INITIAL_HASH,
			working_vars: INITIAL_HASH,
			message_schedule: [0; 64],
			digest: None,
		}
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn phase(&self) -> Sha256Phase {
		self.phase
	}

	/// The schedule index being produced during `Prepare`, the round index
	/// during `Process`, and 0 otherwise.
	pub fn round(&self) -> usize {
		self.round
	}

	fn enter(&mut self, phase: Sha256Phase, round: usize) {
		trace!(from = ?self.phase, to = ?phase, round, "sha256 phase transition");

		self.phase = phase;
		self.round = round;
	}

	fn load(&mut self) {
		for (word, bytes) in self.message_schedule.iter_mut().zip(self.block.chunks_exact(4)) {
			*word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
		}

		self.hash_vals = INITIAL_HASH;
		self.working_vars = INITIAL_HASH;

		self.enter(Sha256Phase::Prepare, 16);
	}

	fn prepare(&mut self) {
		let t = self.round;
		self.message_schedule[t] = schedule_word(&self.message_schedule, t);

		if t == 63 {
			self.enter(Sha256Phase::Process, 0);
		} else {
			self.round += 1;
		}
	}

	fn compress(&mut self) {
		let t = self.round;
		self.working_vars = compress_round(self.working_vars, ROUND_CONSTANTS[t], self.message_schedule[t]);

		if t == 63 {
			self.enter(Sha256Phase::Done, 0);
		} else {
			self.round += 1;
		}
	}

	fn done(&mut self) {
		for i in 0 .. 8 {
			self.hash_vals[i] = self.hash_vals[i].wrapping_add(self.working_vars[i]);
		}

		let mut out = [0; 32];

		for i in 0 .. 8 {
			out[4 * i .. 4 * (i + 1)].copy_from_slice(&self.hash_vals[i].to_be_bytes());
		}

		self.block.zeroize();
		self.message_schedule.zeroize();
		self.working_vars.zeroize();

		debug!("sha256 digest ready");

		self.digest = Some(out);
		self.enter(Sha256Phase::Idle, 0);
	}
}

impl Default for Sha256Engine {
	fn default() -> Self {
		Self::new()
	}
}

impl Engine for Sha256Engine {
	type Block = Sha256Block;

	const BLOCK_LEN: usize = BLOCK_LEN;
	const STEPS_PER_BLOCK: usize = STEPS_PER_BLOCK;

	/// `is_last` is accepted for symmetry with SHA3; every SHA-256 block is
	/// hashed as a complete message.
	fn submit(&mut self, block: &Sha256Block, is_last: bool) -> bool {
		if !self.ready() {
			debug!(phase = ?self.phase, "sha256 block refused while busy");
			return false;
		}

		self.block = *block;
		self.digest = None;

		trace!(is_last, "sha256 block accepted");
		self.enter(Sha256Phase::Load, 0);

		if self.mode == Mode::Immediate {
			self.finish();
		}

		true
	}

	fn ready(&self) -> bool {
		self.phase == Sha256Phase::Idle
	}

	fn step(&mut self) {
		match self.phase {
			Sha256Phase::Idle => {},
			Sha256Phase::Load => self.load(),
			Sha256Phase::Prepare => self.prepare(),
			Sha256Phase::Process => self.compress(),
			Sha256Phase::Done => self.done(),
		}
	}

	fn try_digest(&self) -> Result<Digest, EngineError> {
		match (self.phase, self.digest) {
			(Sha256Phase::Idle, Some(digest)) => Ok(digest),
			_ => Err(EngineError::DigestNotReady),
		}
	}

	fn reset(&mut self) {
		self.zeroize();
	}
}

impl Zeroize for Sha256Engine {
	fn zeroize(&mut self) {
		self.block.zeroize();
		self.message_schedule.zeroize();
		self.working_vars.zeroize();
		self.digest.zeroize();

		self.hash_vals = INITIAL_HASH;
		self.phase = Sha256Phase::Idle;
		self.round = 0;
	}
}

impl Drop for Sha256Engine {
	fn drop(&mut self) {
		self.zeroize();
	}
}

impl core::fmt::Debug for Sha256Engine {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Sha256Engine")
			.field("mode", &self.mode)
			.field("phase", &self.phase)
			.field("round", &self.round)
			.finish_non_exhaustive()
	}
}

/// Pads `msg` into a single block and hashes it.
///
/// Fails for messages longer than 55 bytes, which need more than one block.
pub fn sha256(msg: &[u8]) -> Result<Digest, PadError> {
	let block = pad::sha256_block(msg)?;

	let mut engine = Sha256Engine::with_mode(Mode::Immediate);
	engine.submit(&block, true);

	Ok(engine.digest())
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
	format_hash(&sha256(msg.as_bytes()).unwrap())
}

#[test]
fn test_known_vectors() {
	assert_eq!(
		hash_str(""),
		"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
	);

	assert_eq!(
		hash_str("abc"),
		"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
	);

	assert_eq!(
		hash_str("hello"),
		"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
	);

	assert_eq!(
		hash_str("test"),
		"9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
	);

	assert_eq!(
		hash_str(&"a".repeat(55)),
		"9f4390f8d30c2dd92ec9f095b65e2b9ae9b0a925a5258e241c9f1e910f734318",
	);
}

#[test]
fn test_padding_only_block() {
	// 0x80 followed by zeros, including a zero length field
	let mut block = [0; BLOCK_LEN];
	block[0] = 0x80;

	let mut engine = Sha256Engine::new();
	assert!(engine.submit(&block, true));
	assert_eq!(engine.finish(), STEPS_PER_BLOCK);

	assert_eq!(
		format_hash(&engine.digest()),
		"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
	);
}

#[test]
fn test_phase_sequence() {
	let block = pad::sha256_block(b"abc").unwrap();
	let mut engine = Sha256Engine::new();

	assert!(engine.ready());
	assert!(engine.submit(&block, true));
	assert!(!engine.ready());
	assert_eq!(engine.phase(), Sha256Phase::Load);

	engine.step();
	assert_eq!(engine.phase(), Sha256Phase::Prepare);

	for t in 16 .. 64 {
		assert_eq!(engine.round(), t);
		assert!(!engine.ready());
		engine.step();
	}

	assert_eq!(engine.phase(), Sha256Phase::Process);

	for t in 0 .. 64 {
		assert_eq!(engine.round(), t);
		assert!(!engine.ready());
		assert_eq!(engine.try_digest(), Err(EngineError::DigestNotReady));
		engine.step();
	}

	assert_eq!(engine.phase(), Sha256Phase::Done);
	assert!(!engine.ready());

	engine.step();
	assert!(engine.ready());
	assert_eq!(
		format_hash(&engine.digest()),
		"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
	);
}

#[test]
fn test_busy_submission_is_ignored() {
	let abc = pad::sha256_block(b"abc").unwrap();
	let hello = pad::sha256_block(b"hello").unwrap();

	let mut engine = Sha256Engine::new();
	assert!(engine.submit(&abc, true));
	engine.step();

	assert!(!engine.submit(&hello, true));
	assert_eq!(engine.try_submit(&hello, true), Err(EngineError::Busy));

	engine.finish();
	assert_eq!(engine.digest(), sha256(b"abc").unwrap());
}

#[test]
fn test_back_to_back_blocks() {
	let mut engine = Sha256Engine::with_mode(Mode::Immediate);

	let first = engine.process(&pad::sha256_block(b"abc").unwrap(), true).unwrap();
	let second = engine.process(&pad::sha256_block(b"test").unwrap(), true).unwrap();
	let third = engine.process(&pad::sha256_block(b"abc").unwrap(), true).unwrap();

	assert_eq!(first, third);
	assert_eq!(second, Some(sha256(b"test").unwrap()));
	assert_eq!(first, Some(sha256(b"abc").unwrap()));
}

#[test]
fn test_wrong_block_length() {
	let mut engine = Sha256Engine::new();

	assert_eq!(
		engine.try_submit(&[0; 63], true),
		Err(EngineError::BlockLength {expected: 64, actual: 63}),
	);
	assert!(engine.ready());
}

#[test]
fn test_reset_mid_block() {
	let mut engine = Sha256Engine::new();
	engine.submit(&pad::sha256_block(b"hello").unwrap(), true);

	for _ in 0 .. 30 {
		engine.step();
	}

	engine.reset();
	assert!(engine.ready());
	assert_eq!(engine.try_digest(), Err(EngineError::DigestNotReady));

	let digest = engine.process(&pad::sha256_block(b"abc").unwrap(), true).unwrap();
	assert_eq!(digest, Some(sha256(b"abc").unwrap()));
}

#[test]
#[should_panic(expected = "digest read out of turn")]
fn test_digest_before_completion_panics() {
	let mut engine = Sha256Engine::new();
	engine.submit(&pad::sha256_block(b"abc").unwrap(), true);
	engine.step();

	engine.digest();
}

#[test]
fn test_is_last_is_ignored() {
	let mut engine = Sha256Engine::new();

	assert!(engine.submit(&pad::sha256_block(b"abc").unwrap(), false));
	assert_eq!(engine.finish(), STEPS_PER_BLOCK);
	assert_eq!(engine.digest(), sha256(b"abc").unwrap());

	// a non-final block never chains into the next one
	let digest = engine.process(&pad::sha256_block(b"test").unwrap(), false).unwrap();
	assert_eq!(digest, Some(sha256(b"test").unwrap()));
}
