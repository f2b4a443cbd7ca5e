use super::super::State;

/// Applies `a[x][y] ^= !a[x + 1][y] & a[x + 2][y]` to every row at once.
pub fn chi(state: &mut State) {
	for y in 0 .. 5 {
		let row: [u64; 5] = core::array::from_fn(|x| state[x][y]);

		for (x, column) in state.iter_mut().enumerate() {
			column[y] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
		}
	}
}

#[test]
fn chi_is_row_local() {
	let mut state = [[0; 5]; 5];
	state[2][4] = u64::MAX;

	chi(&mut state);

	// only x = 0 sees the set lane as a[x + 2] with a[x + 1] clear
	assert_eq!(state[0][4], u64::MAX);
	assert_eq!(state[1][4], 0);
	assert_eq!(state[2][4], u64::MAX);
	assert_eq!(state[3][4], 0);
	assert_eq!(state[4][4], 0);
	assert!(state.iter().all(|column| column[.. 4].iter().all(|&lane| lane == 0)));
}
