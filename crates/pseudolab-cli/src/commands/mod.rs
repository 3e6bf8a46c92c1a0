pub mod generate;
pub mod report;

use std::path::Path;

use clap::Args;
use pseudolab_core::{
    GenerationRequest, LabConfig, Method, MethodKind, Result, check_confidence, check_intervals,
};
use pseudolab_tests::{PercentileModel, TestConfig, TestKind};
use serde::Serialize;

/// Flags that pick a recurrence and its seeds.
#[derive(Args, Debug, Clone)]
pub struct GenerationArgs {
    /// Generation method
    #[arg(long, default_value = "middle-square", value_parser = ["middle-square", "middle-product", "constant-multiplier"])]
    pub method: String,

    /// Seed (first seed for middle-product)
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Second seed (middle-product only)
    #[arg(long, allow_negative_numbers = true)]
    pub seed2: Option<i64>,

    /// Multiplier constant (constant-multiplier only)
    #[arg(long, allow_negative_numbers = true)]
    pub constant: Option<i64>,

    /// How many numbers to generate (default 15)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Flags shared by the acceptance tests.
#[derive(Args, Debug, Clone, Default)]
pub struct TestArgs {
    /// Confidence level in (0, 1) (default 0.95)
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Intervals for the chi-square uniformity test (default 10)
    #[arg(long)]
    pub intervals: Option<usize>,

    /// Use exact statistical quantiles instead of the classic approximations
    #[arg(long)]
    pub exact: bool,
}

impl GenerationArgs {
    /// Combine flags with the config file; flags win.
    pub fn to_request(&self, config: &LabConfig) -> Result<GenerationRequest> {
        let kind = parse_method(&self.method)?;
        if self.seed2.is_some() && kind != MethodKind::MiddleProduct {
            eprintln!("Warning: --seed2 is only used by middle-product, ignoring it");
        }
        if self.constant.is_some() && kind != MethodKind::ConstantMultiplier {
            eprintln!("Warning: --constant is only used by constant-multiplier, ignoring it");
        }

        let method = match config.method(kind) {
            Method::MiddleSquare { seed } => Method::MiddleSquare {
                seed: self.seed.unwrap_or(seed),
            },
            Method::MiddleProduct { seed1, seed2 } => Method::MiddleProduct {
                seed1: self.seed.unwrap_or(seed1),
                seed2: self.seed2.unwrap_or(seed2),
            },
            Method::ConstantMultiplier { seed, constant } => Method::ConstantMultiplier {
                seed: self.seed.unwrap_or(seed),
                constant: self.constant.unwrap_or(constant),
            },
        };
        GenerationRequest::new(method, self.count.unwrap_or(config.count()))
    }
}

impl TestArgs {
    /// Combine flags with the config file; flags win.
    pub fn to_config(&self, config: &LabConfig) -> Result<TestConfig> {
        let confidence = check_confidence(self.confidence.unwrap_or(config.confidence()))?;
        let intervals = check_intervals(self.intervals.unwrap_or(config.intervals()))?;
        let model = if self.exact || config.exact_percentiles() {
            PercentileModel::Exact
        } else {
            PercentileModel::Approximate
        };
        Ok(TestConfig {
            confidence,
            intervals,
            model,
        })
    }
}

/// Load `--config` if given, otherwise fall back to built-in defaults.
pub fn load_config(path: Option<&str>) -> Result<LabConfig> {
    match path {
        Some(p) => LabConfig::load_from_path(Path::new(p)),
        None => Ok(LabConfig::default()),
    }
}

/// Parse a method name into the enum.
pub fn parse_method(s: &str) -> Result<MethodKind> {
    s.parse()
}

/// Parse a test selector; `all` expands to every test.
pub fn parse_test_kinds(s: &str) -> Result<Vec<TestKind>> {
    if s == "all" {
        return Ok(TestKind::ALL.to_vec());
    }
    Ok(vec![s.parse()?])
}

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
