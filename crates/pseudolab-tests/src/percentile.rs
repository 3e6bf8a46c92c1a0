//! Percentile (inverse CDF) functions for the normal and chi-square distributions.
//!
//! The acceptance tests were historically taught with two closed-form
//! approximations, reproduced here so verdicts match the hand-computed
//! tables. [`PercentileModel::Exact`] swaps in the quantiles from `statrs`.

use pseudolab_core::{Error, Result};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

// Rational approximation coefficients (Abramowitz & Stegun 26.2.23).
const C0: f64 = 2.515517;
const C1: f64 = 0.802853;
const C2: f64 = 0.010328;
const D1: f64 = 1.432788;
const D2: f64 = 0.189269;
const D3: f64 = 0.001308;

/// Approximate standard-normal percentile `Φ⁻¹(p)`.
///
/// Absolute error is around 1e-3 to 1e-4; `norm_ppf(0.5)` is about -1e-7,
/// not exactly zero.
pub fn norm_ppf(p: f64) -> f64 {
    if p < 0.5 {
        return -norm_ppf(1.0 - p);
    }
    let t = (-2.0 * (1.0 - p).ln()).sqrt();
    t - (C0 + C1 * t + C2 * t * t) / (1.0 + D1 * t + D2 * t * t + D3 * t * t * t)
}

/// Approximate chi-square percentile `χ²(p, df)` (Wilson–Hilferty).
///
/// For `df == 1` this returns `sqrt(-2 ln(1 - p))`, which is how the classic
/// tables were computed. It is not the true one-degree quantile.
pub fn chi2_ppf(p: f64, df: usize) -> f64 {
    if df == 1 {
        return (-2.0 * (1.0 - p).ln()).sqrt();
    }
    let k = df as f64;
    let a = 2.0 / (9.0 * k);
    k * (1.0 - a + norm_ppf(p) * a.sqrt()).powi(3)
}

/// Which percentile functions the acceptance tests use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileModel {
    /// Closed-form approximations; reproduces the classic verdicts.
    #[default]
    Approximate,
    /// Exact quantiles from `statrs`.
    Exact,
}

impl std::fmt::Display for PercentileModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approximate => write!(f, "approximate"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

impl PercentileModel {
    /// Standard-normal percentile at `p`.
    pub fn normal(self, p: f64) -> Result<f64> {
        let value = match self {
            Self::Approximate => norm_ppf(p),
            Self::Exact => Normal::standard().inverse_cdf(p),
        };
        finite(value, "normal percentile", p)
    }

    /// Chi-square percentile at `p` with `df` degrees of freedom (`df >= 1`).
    pub fn chi_squared(self, p: f64, df: usize) -> Result<f64> {
        if df == 0 {
            return Err(Error::configuration(
                "chi-square percentile needs at least one degree of freedom",
            ));
        }
        let value = match self {
            Self::Approximate => chi2_ppf(p, df),
            Self::Exact => ChiSquared::new(df as f64)
                .map_err(|e| Error::configuration(format!("chi-square with df={df}: {e}")))?
                .inverse_cdf(p),
        };
        finite(value, "chi-square percentile", p)
    }
}

fn finite(value: f64, what: &str, p: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::configuration(format!(
            "{what} at p={p} is not finite"
        )))
    }
}
