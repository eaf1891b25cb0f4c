use edgetone::{Histogram, Swatch};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_histogram(rng: &mut StdRng) -> Histogram {
    let len = rng.gen_range(0..64);

    (0..len)
        .map(|_| {
            let rgb: (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
            // zero populations show up in real output too
            let population = if rng.gen_bool(0.1) { 0 } else { rng.gen_range(1..10_000) };

            Swatch::new(rgb, population)
        })
        .collect()
}

#[test]
fn optimize_keeps_total_population() {
    let mut rng = StdRng::seed_from_u64(0x0ed9e);

    for _ in 0..500 {
        let histogram = random_histogram(&mut rng);
        let threshold = rng.gen_range(0.0..80.0);

        assert_eq!(histogram.optimize(threshold).total_population(), histogram.total_population());
    }
}

#[test]
fn optimize_sorts_and_drops_empty_entries() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let histogram = random_histogram(&mut rng);
        let optimized = histogram.optimize(rng.gen_range(0.0..80.0));
        let swatches = optimized.swatches();

        assert!(swatches.iter().all(|swatch| swatch.population() > 0));
        assert!(swatches.windows(2).all(|w| w[0].population() >= w[1].population()));
        assert!(optimized.len() <= histogram.len());
    }
}

#[test]
fn survivors_keep_their_own_color() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let histogram = random_histogram(&mut rng);
        let optimized = histogram.optimize(22.0);

        for swatch in optimized.swatches() {
            assert!(histogram.swatches().iter().any(|original| original.rgb() == swatch.rgb()));
        }
    }
}

#[test]
fn zero_threshold_only_merges_identical_colors() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..200 {
        let histogram = random_histogram(&mut rng);
        let optimized = histogram.optimize(0.0);

        for (i, lhs) in optimized.swatches().iter().enumerate() {
            for rhs in &optimized.swatches()[i + 1..] {
                assert!(lhs.yuv().distance(rhs.yuv()) > 0.0);
            }
        }
    }
}
