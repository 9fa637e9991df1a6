use tachyon_manifold::{part1, part2};

fn main() {
    divan::main();
}

/// Staggered splitter rows in the shape of the puzzle input.
fn manifold(rows: usize, width: usize) -> String {
    let entry = width / 2;
    let mut lines = vec![(0..width)
        .map(|c| if c == entry { 'S' } else { '.' })
        .collect::<String>()];
    for row in 1..rows {
        lines.push(
            (0..width)
                .map(|c| {
                    if row % 2 == 0 && (c + row / 2) % 2 == entry % 2 && (c * 7 + row) % 5 != 0 {
                        '^'
                    } else {
                        '.'
                    }
                })
                .collect(),
        );
    }
    lines.join("\n")
}

#[divan::bench(args = [32, 142])]
fn beam_splits(bencher: divan::Bencher, size: usize) {
    let input = manifold(size, size - 1);
    bencher.bench(|| part1::process(divan::black_box(&input)).unwrap());
}

#[divan::bench(args = [32, 142])]
fn timelines(bencher: divan::Bencher, size: usize) {
    let input = manifold(size, size - 1);
    bencher.bench(|| part2::process(divan::black_box(&input)).unwrap());
}
