//! Round constants and rotation offsets for Keccak-f[1600], both generated at
//! compile time from their defining recurrences.

pub const NUM_ROUNDS: usize = 24;

// rc(t) is the low bit of x^t mod x^8 + x^6 + x^5 + x^4 + 1, and round i
// takes rc(7i + j) as bit 2^j - 1 of its constant
const fn compute_round_constants() -> [u64; NUM_ROUNDS] {
	let mut out = [0; NUM_ROUNDS];
	let mut r: u16 = 1;

	let mut t = 0;

	while t < 7 * NUM_ROUNDS {
		if r & 1 == 1 {
			out[t / 7] |= 1 << ((1 << (t % 7)) - 1);
		}

		r <<= 1;

		if r & 0x100 != 0 {
			r ^= 0x171;
		}

		t += 1;
	}

	out
}

// walks the 24 non-origin lanes in the order pi visits them, starting at
// (1, 0), where the t-th lane gets rotated by the t-th triangular number
const fn compute_rotation_offsets() -> [[u32; 5]; 5] {
	let mut out = [[0; 5]; 5];
	let mut rotation_amount = 0;

	let mut x = 1;
	let mut y = 0;

	let mut t = 0;

	while t < 24 {
		rotation_amount += t + 1;
		out[x][y] = rotation_amount % 64;

		let new_x = y;
		let new_y = (2 * x + 3 * y) % 5;

		x = new_x;
		y = new_y;

		t += 1;
	}

	out
}

/// XORed into lane (0, 0) by iota, one per round.
pub const ROUND_CONSTANTS: [u64; NUM_ROUNDS] = compute_round_constants();

/// Left rotation applied to lane (x, y) by rho, indexed `[x][y]`.
pub const ROTATION_OFFSETS: [[u32; 5]; 5] = compute_rotation_offsets();

#[test]
fn round_constants_match_published_table() {
	let expected = [
		0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
		0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
		0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
		0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
		0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
		0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
	];

	assert_eq!(ROUND_CONSTANTS, expected);
}

#[test]
fn rotation_offsets_match_published_table() {
	let expected = [
		[0, 36, 3, 41, 18],
		[1, 44, 10, 45, 2],
		[62, 6, 43, 15, 61],
		[28, 55, 25, 21, 56],
		[27, 20, 39, 8, 14],
	];

	assert_eq!(ROTATION_OFFSETS, expected);
}
