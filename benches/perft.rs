/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gambit::*;

fn perft_benchmark(c: &mut Criterion) {
    let (kiwipete, side) = Board::from_fingerprint(FINGERPRINT_KIWIPETE).unwrap();
    c.bench_function("Kiwipete Perft 3", |b| {
        b.iter(|| {
            let kiwipete = black_box(&kiwipete);
            let depth = black_box(3);
            black_box(perft(kiwipete, side, depth))
        });
    });
}

fn search_benchmark(c: &mut Criterion) {
    let game = Game::new();
    c.bench_function("Startpos Search 4", |b| {
        b.iter(|| {
            let game = black_box(&game);
            black_box(game.request_computer_move(SearchConfig::new(4)))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10).measurement_time(Duration::from_secs(30));
    targets = perft_benchmark, search_benchmark
}
criterion_main!(benches);
