use super::super::State;

pub fn theta(state: &mut State) {
	let column_parity: [u64; 5] = core::array::from_fn(|x| {
		state[x].iter().fold(0, |acc, &lane| acc ^ lane)
	});

	let effect: [u64; 5] = core::array::from_fn(|x| {
		column_parity[(x + 4) % 5] ^ column_parity[(x + 1) % 5].rotate_left(1)
	});

	for (column, d) in state.iter_mut().zip(effect) {
		for lane in column.iter_mut() {
			*lane ^= d;
		}
	}
}

#[test]
fn single_bit_spreads_to_two_columns() {
	let mut state = [[0; 5]; 5];
	state[2][3] = 1;

	theta(&mut state);

	// column 2 keeps its bit, columns 1 and 3 pick up the parity of column 2
	for y in 0 .. 5 {
		assert_eq!(state[1][y], 2);
		assert_eq!(state[3][y], 1);
		assert_eq!(state[0][y], 0);
		assert_eq!(state[4][y], 0);
	}

	assert_eq!(state[2][3], 1);
	assert_eq!(state[2][0], 0);
}
