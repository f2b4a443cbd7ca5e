//! The Keccak-f[1600] permutation, exposed one round at a time.

mod constants;

pub use constants::{NUM_ROUNDS, ROTATION_OFFSETS, ROUND_CONSTANTS};

pub mod components {
	pub mod chi;
	pub mod iota;
	pub mod rho_pi;
	pub mod theta;
}

use components::chi::chi;
use components::iota::iota;
use components::rho_pi::rho_pi;
use components::theta::theta;

pub mod sha3;

/// The 1600-bit state as 25 lanes, indexed `state[x][y]`.
pub type State = [[u64; 5]; 5];

/// Runs round `round_number` (0 .. 24) of the permutation.
pub fn round(state: &mut State, round_number: usize) {
	theta(state);
	*state = rho_pi(state);
	chi(state);
	iota(state, round_number);
}

pub fn keccak_f1600(state: &mut State) {
	for round_number in 0 .. NUM_ROUNDS {
		round(state, round_number);
	}
}

#[test]
fn permutation_of_zero_state() {
	let mut state = [[0; 5]; 5];

	keccak_f1600(&mut state);

	assert_eq!(state[0][0], 0xf1258f7940e1dde7);
	assert_eq!(state[1][0], 0x84d5ccf933c0478a);
	assert_eq!(state[0][1], 0xff97a42d7f8e6fd4);

	keccak_f1600(&mut state);

	assert_eq!(state[0][0], 0x2d5c954df96ecb3c);
	assert_eq!(state[1][0], 0x6a332cd07057b56d);
}

#[test]
fn first_round_of_zero_state_is_iota_only() {
	// theta, rho, pi and chi all map zero to zero
	let mut state = [[0; 5]; 5];

	round(&mut state, 0);

	assert_eq!(state[0][0], ROUND_CONSTANTS[0]);
	assert_eq!(state.iter().flatten().filter(|&&lane| lane != 0).count(), 1);
}
