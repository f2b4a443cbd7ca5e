//! The start/ready/digest handshake, checked the same way for both engines.

use std::thread;

use stepwise_hash::keccak::sha3::STEPS_PER_INTERMEDIATE_BLOCK;
use stepwise_hash::pad::{sha256_block, sha3_256_blocks};
use stepwise_hash::{Digest, Engine, EngineError, Mode, Sha256Engine, Sha3Engine};

const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const SHA256_TEST: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";
const SHA3_ABC: &str = "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532";
const SHA3_A: &str = "80084bf2fba02475726feb2cab2d8215eab14bc6bdd8bfb2c8151257032ecd8b";

fn decode(expected: &str) -> Digest {
	hex::decode(expected).unwrap().try_into().unwrap()
}

fn sha256_input(msg: &[u8]) -> [u8; 64] {
	sha256_block(msg).unwrap()
}

fn sha3_input(msg: &[u8]) -> [u8; 136] {
	sha3_256_blocks(msg).next().unwrap()
}

fn runs_in_fixed_step_count<E: Engine>(mut engine: E, block: &E::Block, expected: Digest) {
	assert!(engine.ready());
	assert!(engine.submit(block, true));

	let mut steps = 0;

	while !engine.ready() {
		assert_eq!(engine.try_digest(), Err(EngineError::DigestNotReady));
		engine.step();
		steps += 1;
	}

	assert_eq!(steps, E::STEPS_PER_BLOCK);
	assert_eq!(engine.digest(), expected);

	// idle steps change nothing
	engine.step();
	assert!(engine.ready());
	assert_eq!(engine.digest(), expected);
}

fn modes_agree<E: Engine>(make: impl Fn(Mode) -> E, block: &E::Block) {
	let mut stepped = make(Mode::Stepped);
	let mut immediate = make(Mode::Immediate);

	assert!(stepped.submit(block, true));
	assert!(!stepped.ready());

	assert!(immediate.submit(block, true));
	assert!(immediate.ready());

	stepped.finish();

	assert_eq!(stepped.digest(), immediate.digest());
}

fn back_to_back_matches_fresh<E: Engine>(make: impl Fn() -> E, first: &E::Block, second: &E::Block) {
	let mut reused = make();
	reused.process(first, true).unwrap();
	let reused_digest = reused.process(second, true).unwrap();

	let fresh_digest = make().process(second, true).unwrap();

	assert!(fresh_digest.is_some());
	assert_eq!(reused_digest, fresh_digest);
}

fn rejects_while_busy<E: Engine>(make: impl Fn() -> E, block: &E::Block, other: &E::Block) {
	let expected = make().process(block, true).unwrap();

	let mut engine = make();
	assert!(engine.submit(block, true));
	engine.step();

	assert!(!engine.submit(other, true));
	assert_eq!(engine.try_submit(other.as_ref(), true), Err(EngineError::Busy));

	engine.finish();
	assert_eq!(Some(engine.digest()), expected);
}

fn rejects_wrong_length<E: Engine>(mut engine: E) {
	let too_long = vec![0u8; E::BLOCK_LEN + 1];

	assert_eq!(
		engine.try_submit(&too_long, true),
		Err(EngineError::BlockLength {expected: E::BLOCK_LEN, actual: E::BLOCK_LEN + 1}),
	);
	assert_eq!(
		engine.try_submit(&[], true),
		Err(EngineError::BlockLength {expected: E::BLOCK_LEN, actual: 0}),
	);
	assert!(engine.ready());

	let exact = vec![0u8; E::BLOCK_LEN];
	assert_eq!(engine.try_submit(&exact, true), Ok(()));
	assert!(!engine.ready());
}

#[test]
fn sha256_fixed_step_count() {
	runs_in_fixed_step_count(Sha256Engine::new(), &sha256_input(b"abc"), decode(SHA256_ABC));
	assert_eq!(Sha256Engine::STEPS_PER_BLOCK, 114);
}

#[test]
fn sha3_fixed_step_count() {
	runs_in_fixed_step_count(Sha3Engine::new(), &sha3_input(b"abc"), decode(SHA3_ABC));
	assert_eq!(Sha3Engine::STEPS_PER_BLOCK, 26);
	assert_eq!(STEPS_PER_INTERMEDIATE_BLOCK, 25);
}

#[test]
fn stepped_and_immediate_modes_agree() {
	modes_agree(Sha256Engine::with_mode, &sha256_input(b"hello"));
	modes_agree(Sha3Engine::with_mode, &sha3_input(b"hello"));
}

#[test]
fn back_to_back_blocks_leave_no_residue() {
	back_to_back_matches_fresh(Sha256Engine::new, &sha256_input(b"abc"), &sha256_input(b"test"));
	back_to_back_matches_fresh(Sha3Engine::new, &sha3_input(b"abc"), &sha3_input(b"a"));
}

#[test]
fn submissions_while_busy_are_refused() {
	rejects_while_busy(Sha256Engine::new, &sha256_input(b"abc"), &sha256_input(b"test"));
	rejects_while_busy(Sha3Engine::new, &sha3_input(b"abc"), &sha3_input(b"a"));
}

#[test]
fn wrong_block_lengths_are_refused() {
	rejects_wrong_length(Sha256Engine::new());
	rejects_wrong_length(Sha3Engine::new());
}

#[test]
#[should_panic(expected = "digest read out of turn")]
fn digest_on_fresh_engine_panics() {
	Sha3Engine::new().digest();
}

#[test]
fn repeated_runs_are_deterministic() {
	let block = sha3_input(b"The quick brown fox jumps over the lazy dog");

	let digests: Vec<_> = (0 .. 4)
		.map(|_| Sha3Engine::new().process(&block, true).unwrap())
		.collect();

	assert!(digests.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn concurrent_instances_are_independent() {
	let handles: Vec<_> = (0 .. 8)
		.map(|i| {
			thread::spawn(move || {
				let (sha256_msg, sha3_msg): (&[u8], &[u8]) = if i % 2 == 0 {
					(&b"abc"[..], &b"abc"[..])
				} else {
					(&b"test"[..], &b"a"[..])
				};

				let mut sha256_engine = Sha256Engine::new();
				let mut sha3_engine = Sha3Engine::new();

				sha256_engine.submit(&sha256_input(sha256_msg), true);
				sha3_engine.submit(&sha3_input(sha3_msg), true);

				// interleave the two engines step by step
				while !sha256_engine.ready() || !sha3_engine.ready() {
					sha256_engine.step();
					sha3_engine.step();
				}

				(i, sha256_engine.digest(), sha3_engine.digest())
			})
		})
		.collect();

	for handle in handles {
		let (i, sha256_digest, sha3_digest) = handle.join().unwrap();

		if i % 2 == 0 {
			assert_eq!(sha256_digest, decode(SHA256_ABC));
			assert_eq!(sha3_digest, decode(SHA3_ABC));
		} else {
			assert_eq!(sha256_digest, decode(SHA256_TEST));
			assert_eq!(sha3_digest, decode(SHA3_A));
		}
	}
}
