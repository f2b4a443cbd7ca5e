//! Byte-for-byte comparison against the RustCrypto `sha2` and `sha3` crates.

use proptest::prelude::*;
use sha2::Sha256;
use sha3::{Digest as _, Sha3_256};

use stepwise_hash::pad::{sha256_block, sha3_256_blocks, SHA256_MAX_MESSAGE};
use stepwise_hash::sha2::round_functions::{big_sigma0, big_sigma1, ch, maj};
use stepwise_hash::{sha256, sha3_256, Engine, Mode, Sha256Engine, Sha3Engine};

proptest! {
	#![proptest_config(ProptestConfig::with_cases(128))]

	#[test]
	fn sha256_matches_rustcrypto(msg in prop::collection::vec(any::<u8>(), 0 ..= SHA256_MAX_MESSAGE)) {
		let expected: [u8; 32] = Sha256::digest(&msg).into();

		prop_assert_eq!(sha256(&msg).unwrap(), expected);
	}

	#[test]
	fn sha3_256_matches_rustcrypto(msg in prop::collection::vec(any::<u8>(), 0 .. 600)) {
		let expected: [u8; 32] = Sha3_256::digest(&msg).into();

		prop_assert_eq!(sha3_256(&msg), expected);
	}

	#[test]
	fn reused_engines_match_rustcrypto(
		first in prop::collection::vec(any::<u8>(), 0 ..= SHA256_MAX_MESSAGE),
		second in prop::collection::vec(any::<u8>(), 0 ..= SHA256_MAX_MESSAGE),
	) {
		let mut sha256_engine = Sha256Engine::new();
		let mut sha3_engine = Sha3Engine::with_mode(Mode::Immediate);

		for msg in [&first, &second] {
			let sha256_digest = sha256_engine.process(&sha256_block(msg).unwrap(), true).unwrap();
			let expected: [u8; 32] = Sha256::digest(msg).into();
			prop_assert_eq!(sha256_digest, Some(expected));

			let mut sha3_digest = None;
			let mut blocks = sha3_256_blocks(msg).peekable();

			while let Some(block) = blocks.next() {
				sha3_digest = sha3_engine.process(&block, blocks.peek().is_none()).unwrap();
			}

			let expected: [u8; 32] = Sha3_256::digest(msg).into();
			prop_assert_eq!(sha3_digest, Some(expected));
		}
	}

	#[test]
	fn ch_and_maj_select_bitwise(x: u32, y: u32, z: u32) {
		// ch picks y where x is set, z elsewhere; maj is the bitwise majority
		prop_assert_eq!(ch(x, y, z), (x & y) | (!x & z));
		prop_assert_eq!(maj(x, y, z), (x & y) | (x & z) | (y & z));
	}

	#[test]
	fn big_sigmas_commute_with_rotation(val: u32, n in 0u32 .. 32) {
		prop_assert_eq!(big_sigma0(val.rotate_right(n)), big_sigma0(val).rotate_right(n));
		prop_assert_eq!(big_sigma1(val.rotate_right(n)), big_sigma1(val).rotate_right(n));
	}
}

#[test]
fn single_block_limit_is_enforced() {
	let msg = [0x61; SHA256_MAX_MESSAGE + 1];

	assert!(sha256(&msg).is_err());
	assert_eq!(sha3_256(&msg), <[u8; 32]>::from(Sha3_256::digest(msg)));
}
