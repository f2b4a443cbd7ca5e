//! The stateless pieces of SHA-256: constants, the six mixing functions,
//! message schedule expansion and a single compression round.
//!
//! Every addition wraps modulo 2 ** 32.

pub const ROUND_CONSTANTS: [u32; 64] = [
	0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
	0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
	0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
	0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
	0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
	0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
	0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
	0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// H[0..7] before the first (and only) block.
pub const INITIAL_HASH: [u32; 8] = [
	0x6a09e667,
	0xbb67ae85,
	0x3c6ef372,
	0xa54ff53a,
	0x510e527f,
	0x9b05688c,
	0x1f83d9ab,
	0x5be0cd19,
];

pub fn rotr(val: u32, rotation: u32) -> u32 {
	val.rotate_right(rotation)
}

fn mix_shift(val: u32, rotation_a: u32, rotation_b: u32, shift: u32) -> u32 {
	rotr(val, rotation_a) ^ rotr(val, rotation_b) ^ (val >> shift)
}

fn mix_rotate(val: u32, rotation_a: u32, rotation_b: u32, rotation_c: u32) -> u32 {
	rotr(val, rotation_a) ^ rotr(val, rotation_b) ^ rotr(val, rotation_c)
}

pub fn ch(x: u32, y: u32, z: u32) -> u32 {
	(x & y) ^ (!x & z)
}

pub fn maj(x: u32, y: u32, z: u32) -> u32 {
	(x & y) ^ (x & z) ^ (y & z)
}

/// Σ0
pub fn big_sigma0(val: u32) -> u32 {
	mix_rotate(val, 2, 13, 22)
}

/// Σ1
pub fn big_sigma1(val: u32) -> u32 {
	mix_rotate(val, 6, 11, 25)
}

/// σ0
pub fn small_sigma0(val: u32) -> u32 {
	mix_shift(val, 7, 18, 3)
}

/// σ1
pub fn small_sigma1(val: u32) -> u32 {
	mix_shift(val, 17, 19, 10)
}

/// Computes W[t] from the sixteen words before it. `t` must be in 16 .. 64.
pub fn schedule_word(message_schedule: &[u32; 64], t: usize) -> u32 {
	debug_assert!((16 .. 64).contains(&t));

	message_schedule[t - 16]
		.wrapping_add(small_sigma0(message_schedule[t - 15]))
		.wrapping_add(message_schedule[t - 7])
		.wrapping_add(small_sigma1(message_schedule[t - 2]))
}

/// One compression round over the working registers `[a, b, c, d, e, f, g, h]`.
pub fn compress_round(working_vars: [u32; 8], round_constant: u32, schedule_word: u32) -> [u32; 8] {
	let [a, b, c, d, e, f, g, h] = working_vars;

	let t1 = h
		.wrapping_add(big_sigma1(e))
		.wrapping_add(ch(e, f, g))
		.wrapping_add(round_constant)
		.wrapping_add(schedule_word);
	let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

	[
		t1.wrapping_add(t2),
		a,
		b,
		c,
		d.wrapping_add(t1),
		e,
		f,
		g,
	]
}

#[cfg(test)]
fn abc_schedule() -> [u32; 64] {
	let mut block = [0u8; 64];
	block[.. 4].copy_from_slice(&[0x61, 0x62, 0x63, 0x80]);
	block[63] = 24;

	let mut message_schedule = [0; 64];

	for (word, bytes) in message_schedule.iter_mut().zip(block.chunks_exact(4)) {
		*word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
	}

	for t in 16 .. 64 {
		message_schedule[t] = schedule_word(&message_schedule, t);
	}

	message_schedule
}

#[test]
fn mixing_functions_match_reference_values() {
	assert_eq!(ch(0xff00ff00, 0x12345678, 0x9abcdef0), 0x12bc56f0);
	assert_eq!(maj(0xff00ff00, 0x12345678, 0x9abcdef0), 0x9a34de70);

	assert_eq!(big_sigma0(0x6a09e667), 0xce20b47e);
	assert_eq!(big_sigma1(0x510e527f), 0x3587272b);
	assert_eq!(small_sigma0(0x80000000), 0x11002000);
	assert_eq!(small_sigma1(0x80000000), 0x00205000);
}

#[test]
fn schedule_expansion_of_abc() {
	let message_schedule = abc_schedule();

	assert_eq!(message_schedule[16], 0x61626380);
	assert_eq!(message_schedule[17], 0x000f0000);
	assert_eq!(message_schedule[18], 0x7da86405);
	assert_eq!(message_schedule[19], 0x600003c6);
	assert_eq!(message_schedule[63], 0x12b1edeb);
}

#[test]
fn first_round_of_abc() {
	let message_schedule = abc_schedule();
	let working_vars = compress_round(INITIAL_HASH, ROUND_CONSTANTS[0], message_schedule[0]);

	assert_eq!(working_vars[0], 0x5d6aebcd);
	assert_eq!(working_vars[4], 0xfa2a4622);
	assert_eq!(working_vars[1 .. 4], INITIAL_HASH[0 .. 3]);
	assert_eq!(working_vars[5 ..], INITIAL_HASH[4 .. 7]);
}

#[test]
fn round_additions_wrap() {
	// every operand saturated, so t1 alone overflows four times
	let working_vars = compress_round([u32::MAX; 8], ROUND_CONSTANTS[63], u32::MAX);

	assert_eq!(working_vars[0], 0xc67178ec);
	assert_eq!(working_vars[4], 0xc67178ed);
}
