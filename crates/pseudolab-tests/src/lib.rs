//! Acceptance tests for pseudorandom sequences in [0, 1).
//!
//! Three classic checks against the Uniform(0, 1) hypothesis:
//!
//! - **Mean test**: the sample mean must fall inside `0.5 ∓ z·sqrt(1/(12n))`.
//! - **Variance test**: the population variance must fall between the
//!   chi-square bounds scaled by `1/(12(n-1))`.
//! - **Uniformity test**: chi-square goodness of fit over `m` equal intervals.
//!
//! Each test borrows the sequence, never mutates it, and returns a report
//! with the statistic, its bounds and a pass/fail verdict.

pub mod percentile;

use std::fmt;
use std::str::FromStr;

use pseudolab_core::{
    DEFAULT_CONFIDENCE, DEFAULT_INTERVALS, Error, Result, check_confidence, check_intervals,
};
use serde::Serialize;

pub use percentile::{PercentileModel, chi2_ppf, norm_ppf};

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of the mean test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanReport {
    pub sample_count: usize,
    pub confidence: f64,
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
    /// Two-tailed critical value `Φ⁻¹(1 - (1-c)/2)`.
    pub z: f64,
    pub passed: bool,
}

/// Result of the variance test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceReport {
    pub sample_count: usize,
    pub confidence: f64,
    /// Population variance (divisor `n`).
    pub variance: f64,
    pub lower: f64,
    pub upper: f64,
    pub chi2_lower: f64,
    pub chi2_upper: f64,
    pub df: usize,
    pub passed: bool,
}

/// One row of the uniformity frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalFrequency {
    pub lower: f64,
    pub upper: f64,
    pub observed: u64,
    pub expected: f64,
    /// `(observed - expected)² / expected`
    pub contribution: f64,
}

/// Result of the chi-square uniformity test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformityReport {
    pub sample_count: usize,
    pub confidence: f64,
    pub observed: Vec<u64>,
    pub expected: f64,
    pub chi2_calc: f64,
    pub chi2_crit: f64,
    pub df: usize,
    /// `intervals + 1` edges from 0.0 to 1.0.
    pub bin_edges: Vec<f64>,
    pub intervals: Vec<IntervalFrequency>,
    pub passed: bool,
}

/// The three acceptance tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Mean,
    Variance,
    Uniformity,
}

impl TestKind {
    pub const ALL: [TestKind; 3] = [TestKind::Mean, TestKind::Variance, TestKind::Uniformity];

    pub fn title(self) -> &'static str {
        match self {
            Self::Mean => "Mean Test",
            Self::Variance => "Variance Test",
            Self::Uniformity => "Uniformity Test (Chi-Square)",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "mean"),
            Self::Variance => write!(f, "variance"),
            Self::Uniformity => write!(f, "uniformity"),
        }
    }
}

impl FromStr for TestKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" | "means" => Ok(Self::Mean),
            "variance" | "var" => Ok(Self::Variance),
            "uniformity" | "chi2" | "chi-square" => Ok(Self::Uniformity),
            other => Err(Error::configuration(format!(
                "unknown test '{other}' (expected mean, variance or uniformity)"
            ))),
        }
    }
}

/// Report from any of the three tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum TestReport {
    Mean(MeanReport),
    Variance(VarianceReport),
    Uniformity(UniformityReport),
}

impl TestReport {
    pub fn kind(&self) -> TestKind {
        match self {
            Self::Mean(_) => TestKind::Mean,
            Self::Variance(_) => TestKind::Variance,
            Self::Uniformity(_) => TestKind::Uniformity,
        }
    }

    pub fn passed(&self) -> bool {
        match self {
            Self::Mean(r) => r.passed,
            Self::Variance(r) => r.passed,
            Self::Uniformity(r) => r.passed,
        }
    }
}

/// Parameters shared by the test dispatch functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestConfig {
    pub confidence: f64,
    /// Interval count for the uniformity test.
    pub intervals: usize,
    pub model: PercentileModel,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            intervals: DEFAULT_INTERVALS,
            model: PercentileModel::Approximate,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn require_samples(test: &'static str, values: &[f64], needed: usize) -> Result<()> {
    if values.len() < needed {
        return Err(Error::InsufficientData {
            test,
            needed,
            got: values.len(),
        });
    }
    Ok(())
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Edges `i/m` for `i = 0..=m`, with the last edge pinned to exactly 1.0.
fn interval_edges(intervals: usize) -> Vec<f64> {
    let step = 1.0 / intervals as f64;
    let mut edges: Vec<f64> = (0..=intervals).map(|i| i as f64 * step).collect();
    edges[intervals] = 1.0;
    edges
}

/// Index of the interval containing `x`. Intervals are half-open except the
/// last, which also takes 1.0. Values outside [0, 1] (and NaN) are skipped.
fn interval_index(x: f64, edges: &[f64]) -> Option<usize> {
    if !(0.0..=1.0).contains(&x) {
        return None;
    }
    let m = edges.len() - 1;
    let mut i = ((x * m as f64) as usize).min(m - 1);
    // Float rounding in x*m can land one bin off; settle against the edges.
    if x < edges[i] {
        i -= 1;
    } else if i + 1 < m && x >= edges[i + 1] {
        i += 1;
    }
    Some(i)
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. MEAN TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Mean test with the classic percentile approximations.
pub fn test_mean(values: &[f64], confidence: f64) -> Result<MeanReport> {
    test_mean_with_model(values, confidence, PercentileModel::Approximate)
}

pub fn test_mean_with_model(
    values: &[f64],
    confidence: f64,
    model: PercentileModel,
) -> Result<MeanReport> {
    let confidence = check_confidence(confidence)?;
    require_samples("mean test", values, 1)?;

    let n = values.len();
    let mean = mean_of(values);
    let z = model.normal(1.0 - (1.0 - confidence) / 2.0)?;
    let half_width = z * (1.0 / (12.0 * n as f64).sqrt());
    let lower = 0.5 - half_width;
    let upper = 0.5 + half_width;
    let passed = lower <= mean && mean <= upper;
    log::debug!("mean test: n={n}, mean={mean:.6}, bounds=[{lower:.6}, {upper:.6}], z={z:.4}");

    Ok(MeanReport {
        sample_count: n,
        confidence,
        mean,
        lower,
        upper,
        z,
        passed,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. VARIANCE TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Variance test with the classic percentile approximations.
pub fn test_variance(values: &[f64], confidence: f64) -> Result<VarianceReport> {
    test_variance_with_model(values, confidence, PercentileModel::Approximate)
}

pub fn test_variance_with_model(
    values: &[f64],
    confidence: f64,
    model: PercentileModel,
) -> Result<VarianceReport> {
    let confidence = check_confidence(confidence)?;
    require_samples("variance test", values, 2)?;

    let n = values.len();
    let mean = mean_of(values);
    let variance = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;

    let alpha = 1.0 - confidence;
    let df = n - 1;
    let chi2_lower = model.chi_squared(alpha / 2.0, df)?;
    let chi2_upper = model.chi_squared(1.0 - alpha / 2.0, df)?;
    let scale = 12.0 * df as f64;
    let lower = chi2_lower / scale;
    let upper = chi2_upper / scale;
    let passed = lower <= variance && variance <= upper;
    log::debug!(
        "variance test: n={n}, variance={variance:.6}, bounds=[{lower:.6}, {upper:.6}], df={df}"
    );

    Ok(VarianceReport {
        sample_count: n,
        confidence,
        variance,
        lower,
        upper,
        chi2_lower,
        chi2_upper,
        df,
        passed,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. UNIFORMITY TEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Chi-square uniformity test with the classic percentile approximations.
pub fn test_uniformity(
    values: &[f64],
    intervals: usize,
    confidence: f64,
) -> Result<UniformityReport> {
    test_uniformity_with_model(values, intervals, confidence, PercentileModel::Approximate)
}

pub fn test_uniformity_with_model(
    values: &[f64],
    intervals: usize,
    confidence: f64,
    model: PercentileModel,
) -> Result<UniformityReport> {
    let confidence = check_confidence(confidence)?;
    let intervals = check_intervals(intervals)?;
    require_samples("uniformity test", values, 1)?;

    let n = values.len();
    let bin_edges = interval_edges(intervals);
    let mut observed = vec![0u64; intervals];
    for &x in values {
        if let Some(i) = interval_index(x, &bin_edges) {
            observed[i] += 1;
        }
    }

    let expected = n as f64 / intervals as f64;
    let rows: Vec<IntervalFrequency> = observed
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let diff = count as f64 - expected;
            IntervalFrequency {
                lower: bin_edges[i],
                upper: bin_edges[i + 1],
                observed: count,
                expected,
                contribution: diff * diff / expected,
            }
        })
        .collect();
    let chi2_calc: f64 = rows.iter().map(|r| r.contribution).sum();

    let df = intervals - 1;
    let chi2_crit = model.chi_squared(confidence, df)?;
    let passed = chi2_calc <= chi2_crit;
    log::debug!(
        "uniformity test: n={n}, m={intervals}, chi2={chi2_calc:.4}, critical={chi2_crit:.4}"
    );

    Ok(UniformityReport {
        sample_count: n,
        confidence,
        observed,
        expected,
        chi2_calc,
        chi2_crit,
        df,
        bin_edges,
        intervals: rows,
        passed,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════════════════════════════════════════

/// Run one test selected at runtime.
pub fn run_test(kind: TestKind, values: &[f64], config: &TestConfig) -> Result<TestReport> {
    let report = match kind {
        TestKind::Mean => {
            TestReport::Mean(test_mean_with_model(values, config.confidence, config.model)?)
        }
        TestKind::Variance => TestReport::Variance(test_variance_with_model(
            values,
            config.confidence,
            config.model,
        )?),
        TestKind::Uniformity => TestReport::Uniformity(test_uniformity_with_model(
            values,
            config.intervals,
            config.confidence,
            config.model,
        )?),
    };
    Ok(report)
}

/// Run mean, variance and uniformity tests in that order.
pub fn run_all_tests(values: &[f64], config: &TestConfig) -> Result<Vec<TestReport>> {
    TestKind::ALL
        .iter()
        .map(|&kind| run_test(kind, values, config))
        .collect()
}
