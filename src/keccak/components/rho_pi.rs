use super::super::{State, ROTATION_OFFSETS};

/// Rho and pi fused: rotates every lane by its fixed offset and moves lane
/// (x, y) to (y, 2x + 3y).
pub fn rho_pi(state: &State) -> State {
	let mut new_state = [[0; 5]; 5];

	for x in 0 .. 5 {
		for y in 0 .. 5 {
			let new_x = y;
			let new_y = (2 * x + 3 * y) % 5;

			new_state[new_x][new_y] = state[x][y].rotate_left(ROTATION_OFFSETS[x][y]);
		}
	}

	new_state
}

#[test]
fn origin_lane_stays_put() {
	let mut state = [[0; 5]; 5];
	state[0][0] = 0x0123_4567_89ab_cdef;

	let moved = rho_pi(&state);

	assert_eq!(moved[0][0], 0x0123_4567_89ab_cdef);
	assert_eq!(moved.iter().flatten().filter(|&&lane| lane != 0).count(), 1);
}

#[test]
fn lane_moves_and_rotates() {
	// (1, 0) has offset 1 and lands on (0, 2)
	let mut state = [[0; 5]; 5];
	state[1][0] = 0x8000_0000_0000_0001;

	let moved = rho_pi(&state);

	assert_eq!(moved[0][2], 0x0000_0000_0000_0003);
	assert_eq!(moved.iter().flatten().filter(|&&lane| lane != 0).count(), 1);
}
