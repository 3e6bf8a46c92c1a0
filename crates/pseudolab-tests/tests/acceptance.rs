//! Acceptance tests run against generated sequences and reference samples.

use pseudolab_core::{constant_multiplier, middle_product, middle_square};
use pseudolab_tests::{
    PercentileModel, TestConfig, TestKind, TestReport, run_all_tests, run_test, test_mean,
    test_uniformity, test_variance,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn uniform_samples(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random::<f64>()).collect()
}

fn pass_count(kind: TestKind, model: PercentileModel) -> usize {
    let config = TestConfig {
        model,
        ..TestConfig::default()
    };
    (0..100u64)
        .filter(|&seed| {
            let values = uniform_samples(seed, 1000);
            run_test(kind, &values, &config).unwrap().passed()
        })
        .count()
}

#[test]
fn good_uniform_samples_usually_pass() {
    // At 95% confidence roughly 95 of 100 independent runs should pass.
    for kind in TestKind::ALL {
        for model in [PercentileModel::Approximate, PercentileModel::Exact] {
            let passed = pass_count(kind, model);
            assert!(
                passed >= 85,
                "{kind} ({model}) passed only {passed}/100 seeded runs"
            );
        }
    }
}

#[test]
fn constant_sequences_fail_variance_and_uniformity() {
    let values = vec![0.0; 50];
    assert!(!test_variance(&values, 0.95).unwrap().passed);
    assert!(!test_uniformity(&values, 10, 0.95).unwrap().passed);
}

#[test]
fn constant_half_passes_mean() {
    assert!(test_mean(&[0.5; 100], 0.95).unwrap().passed);
}

#[test]
fn middle_square_default_verdicts() {
    let result = middle_square(5115, 15).unwrap();
    let reports = run_all_tests(&result.values, &TestConfig::default()).unwrap();
    let verdicts: Vec<bool> = reports.iter().map(TestReport::passed).collect();
    // Mean 0.35353 sits just below the lower bound 0.35388.
    assert_eq!(verdicts, vec![false, true, true]);
}

#[test]
fn middle_product_and_constant_multiplier_default_verdicts() {
    for result in [
        middle_product(1234, 5678, 15).unwrap(),
        constant_multiplier(1234, 5678, 15).unwrap(),
    ] {
        let reports = run_all_tests(&result.values, &TestConfig::default()).unwrap();
        assert!(reports.iter().all(TestReport::passed), "{:?}", result.method);
    }
}

#[test]
fn tests_do_not_mutate_input() {
    let result = middle_product(1234, 5678, 15).unwrap();
    let before = result.values.clone();
    run_all_tests(&result.values, &TestConfig::default()).unwrap();
    test_uniformity(&result.values, 4, 0.9).unwrap();
    assert_eq!(result.values, before);
}

#[test]
fn uniformity_counts_every_sample_in_range() {
    let values = uniform_samples(7, 1000);
    for intervals in [2, 5, 10, 20] {
        let report = test_uniformity(&values, intervals, 0.95).unwrap();
        assert_eq!(report.observed.iter().sum::<u64>(), 1000);
        assert_eq!(report.expected, 1000.0 / intervals as f64);
        assert_eq!(report.bin_edges.len(), intervals + 1);
        assert_eq!(report.df, intervals - 1);
    }
}

#[test]
fn higher_confidence_widens_mean_bounds() {
    let values = uniform_samples(11, 500);
    let narrow = test_mean(&values, 0.90).unwrap();
    let wide = test_mean(&values, 0.99).unwrap();
    assert!(wide.lower < narrow.lower);
    assert!(wide.upper > narrow.upper);
}

#[test]
fn collapsed_sequence_is_short_but_testable() {
    let result = middle_square(100, 15).unwrap();
    assert_eq!(result.values.len(), 2);
    let reports = run_all_tests(&result.values, &TestConfig::default()).unwrap();
    assert_eq!(reports.len(), 3);
}
