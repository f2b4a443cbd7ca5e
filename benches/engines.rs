//! Per-block cost of both engines, stepped round by round and run to
//! completion inside `submit`.

use core::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use stepwise_hash::pad::{sha256_block, sha3_256_blocks};
use stepwise_hash::{sha3_256, Engine, Mode, Sha256Engine, Sha3Engine};

fn bench_engine<E: Engine>(c: &mut Criterion, label: &str, make: impl Fn(Mode) -> E, block: &E::Block) {
	let mut stepped = make(Mode::Stepped);

	c.bench_function(&format!("{label}/stepped"), |b| {
		b.iter(|| {
			stepped.submit(black_box(block), true);
			stepped.finish();
			black_box(stepped.digest());
		});
	});

	let mut immediate = make(Mode::Immediate);

	c.bench_function(&format!("{label}/immediate"), |b| {
		b.iter(|| {
			immediate.submit(black_box(block), true);
			black_box(immediate.digest());
		});
	});
}

fn bench_engines(c: &mut Criterion) {
	let sha256_input = sha256_block(b"abc").expect("short message fits one block");
	let sha3_input = sha3_256_blocks(b"abc").next().expect("padding yields a block");

	bench_engine(c, "sha256", Sha256Engine::with_mode, &sha256_input);
	bench_engine(c, "sha3_256", Sha3Engine::with_mode, &sha3_input);

	let long_message = [0x5a; 1024];

	c.bench_function("sha3_256/1KiB", |b| {
		b.iter(|| black_box(sha3_256(black_box(&long_message))));
	});
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
