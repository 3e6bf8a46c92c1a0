//! Digit-extraction pseudorandom generators.
//!
//! Three classical recurrences, each of which turns a product of integers
//! into a four-digit "star" value taken from the middle of its decimal
//! representation:
//!
//! - **Middle square**: `x(i+1) = mid4(x(i)²)`
//! - **Middle product**: `x(i+2) = mid4(x(i) · x(i+1))`
//! - **Constant multiplier**: `x(i+1) = mid4(a · x(i))`
//!
//! Every star value becomes `ri = star / 10000`, a number in [0, 1), and is
//! fed back as (part of) the next state. When the star value reaches zero
//! the recurrence is stuck at zero forever, so generation stops right after
//! recording that step.
//!
//! These generators are weak on purpose. They are reproducible teaching
//! material, not a source of randomness for anything that matters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of digits extracted from the middle of every product.
pub const STAR_DIGITS: usize = 4;

/// Divisor that maps a star value onto [0, 1).
pub const STAR_SCALE: f64 = 10_000.0;

/// Default number of values requested per generation.
pub const DEFAULT_COUNT: usize = 15;

/// Cap on the up-front allocation for one generation; longer runs grow on demand.
const INITIAL_CAPACITY: usize = 1 << 12;

// ---------------------------------------------------------------------------
// Method selection
// ---------------------------------------------------------------------------

/// The three recurrences, without their seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    MiddleSquare,
    MiddleProduct,
    ConstantMultiplier,
}

impl MethodKind {
    pub const ALL: [MethodKind; 3] = [
        MethodKind::MiddleSquare,
        MethodKind::MiddleProduct,
        MethodKind::ConstantMultiplier,
    ];

    /// Human-readable name used in report headers and exports.
    pub fn label(self) -> &'static str {
        match self {
            Self::MiddleSquare => "Middle Square",
            Self::MiddleProduct => "Middle Product",
            Self::ConstantMultiplier => "Constant Multiplier",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MiddleSquare => write!(f, "middle-square"),
            Self::MiddleProduct => write!(f, "middle-product"),
            Self::ConstantMultiplier => write!(f, "constant-multiplier"),
        }
    }
}

impl FromStr for MethodKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "middle-square" | "middle_square" | "square" | "ms" => Ok(Self::MiddleSquare),
            "middle-product" | "middle_product" | "product" | "mp" => Ok(Self::MiddleProduct),
            "constant-multiplier" | "constant_multiplier" | "multiplier" | "cm" => {
                Ok(Self::ConstantMultiplier)
            }
            other => Err(Error::configuration(format!(
                "unknown generation method '{other}' (expected middle-square, middle-product or constant-multiplier)"
            ))),
        }
    }
}

/// A recurrence together with the seeds it starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Method {
    MiddleSquare { seed: i64 },
    MiddleProduct { seed1: i64, seed2: i64 },
    ConstantMultiplier { seed: i64, constant: i64 },
}

impl Method {
    /// Seeds used by the classroom exercises this tool grew out of.
    pub fn default_for(kind: MethodKind) -> Self {
        match kind {
            MethodKind::MiddleSquare => Self::MiddleSquare { seed: 5115 },
            MethodKind::MiddleProduct => Self::MiddleProduct {
                seed1: 1234,
                seed2: 5678,
            },
            MethodKind::ConstantMultiplier => Self::ConstantMultiplier {
                seed: 1234,
                constant: 5678,
            },
        }
    }

    pub fn kind(&self) -> MethodKind {
        match self {
            Self::MiddleSquare { .. } => MethodKind::MiddleSquare,
            Self::MiddleProduct { .. } => MethodKind::MiddleProduct,
            Self::ConstantMultiplier { .. } => MethodKind::ConstantMultiplier,
        }
    }

    fn validate(&self) -> Result<()> {
        let fields: Vec<(&str, i64)> = match *self {
            Self::MiddleSquare { seed } => vec![("seed", seed)],
            Self::MiddleProduct { seed1, seed2 } => vec![("seed1", seed1), ("seed2", seed2)],
            Self::ConstantMultiplier { seed, constant } => {
                vec![("seed", seed), ("constant", constant)]
            }
        };
        for (name, value) in fields {
            if value < 0 {
                return Err(Error::configuration(format!(
                    "{} {name} must be non-negative, got {value}",
                    self.kind()
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// A validated request for `count` values from one recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    method: Method,
    count: usize,
}

impl GenerationRequest {
    /// Build a request. Negative seeds or constants are rejected.
    pub fn new(method: Method, count: usize) -> Result<Self> {
        method.validate()?;
        Ok(Self { method, count })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// State the recurrence held before a step was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum StepInput {
    /// `x²`
    Square { x: u64 },
    /// `x0 · x1`
    Product { x0: u64, x1: u64 },
    /// `constant · x`
    Constant { x: u64, constant: u64 },
}

/// One row of the generation trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStep {
    /// 1-based iteration index.
    pub iteration: usize,
    pub input: StepInput,
    /// The square or product the star digits were taken from.
    pub product: u128,
    pub star: u32,
    pub ri: f64,
}

/// Values produced by one generation, plus the trace that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub method: Method,
    pub requested: usize,
    pub values: Vec<f64>,
    pub steps: Vec<GenerationStep>,
}

impl GenerationResult {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when the state collapsed to zero before `requested` values were produced.
    pub fn terminated_early(&self) -> bool {
        self.values.len() < self.requested
    }
}

// ---------------------------------------------------------------------------
// Digit extraction
// ---------------------------------------------------------------------------

/// Parse `digits[start..end]`, clamping both ends to the string.
/// An empty window reads as zero.
fn parse_window(digits: &str, start: usize, end: usize) -> u32 {
    let end = end.min(digits.len());
    let start = start.min(end);
    digits[start..end].parse().unwrap_or(0)
}

/// Middle four digits after padding to an even digit count with one leading zero.
fn middle_of_even(value: u128) -> u32 {
    let mut digits = value.to_string();
    if digits.len() % 2 != 0 {
        digits.insert(0, '0');
    }
    let mid = digits.len() / 2;
    let half = STAR_DIGITS / 2;
    parse_window(&digits, mid.saturating_sub(half), mid + half)
}

/// Middle four digits after zero-filling to at least four digits.
fn middle_of_zero_filled(value: u128) -> u32 {
    let digits = format!("{value:0>width$}", width = STAR_DIGITS);
    let start = (digits.len() - STAR_DIGITS) / 2;
    parse_window(&digits, start, start + STAR_DIGITS)
}

// ---------------------------------------------------------------------------
// Recurrences
// ---------------------------------------------------------------------------

enum Recurrence {
    Square { x: u64 },
    Product { x0: u64, x1: u64 },
    Constant { x: u64, constant: u64 },
}

impl Recurrence {
    fn from_method(method: Method) -> Self {
        // Seeds were checked for sign when the request was built.
        match method {
            Method::MiddleSquare { seed } => Self::Square { x: seed as u64 },
            Method::MiddleProduct { seed1, seed2 } => Self::Product {
                x0: seed1 as u64,
                x1: seed2 as u64,
            },
            Method::ConstantMultiplier { seed, constant } => Self::Constant {
                x: seed as u64,
                constant: constant as u64,
            },
        }
    }

    /// Advance one step, returning the pre-step state, the product and the star value.
    fn step(&mut self) -> (StepInput, u128, u32) {
        match self {
            Self::Square { x } => {
                let input = StepInput::Square { x: *x };
                let square = u128::from(*x) * u128::from(*x);
                let star = middle_of_even(square);
                *x = u64::from(star);
                (input, square, star)
            }
            Self::Product { x0, x1 } => {
                let input = StepInput::Product { x0: *x0, x1: *x1 };
                let product = u128::from(*x0) * u128::from(*x1);
                let star = middle_of_zero_filled(product);
                *x0 = *x1;
                *x1 = u64::from(star);
                (input, product, star)
            }
            Self::Constant { x, constant } => {
                let input = StepInput::Constant {
                    x: *x,
                    constant: *constant,
                };
                let product = u128::from(*constant) * u128::from(*x);
                let star = middle_of_even(product);
                *x = u64::from(star);
                (input, product, star)
            }
        }
    }
}

/// Run the requested recurrence.
///
/// Returns exactly `request.count()` values unless a star value of zero is
/// reached, in which case that zero is recorded and generation stops.
pub fn generate(request: &GenerationRequest) -> GenerationResult {
    let count = request.count();
    let mut recurrence = Recurrence::from_method(request.method());
    let capacity = count.min(INITIAL_CAPACITY);
    let mut values = Vec::with_capacity(capacity);
    let mut steps = Vec::with_capacity(capacity);

    for i in 0..count {
        let (input, product, star) = recurrence.step();
        let ri = f64::from(star) / STAR_SCALE;
        steps.push(GenerationStep {
            iteration: i + 1,
            input,
            product,
            star,
            ri,
        });
        values.push(ri);
        if star == 0 {
            log::debug!(
                "{}: state collapsed to zero at iteration {}, stopping ({} of {} values)",
                request.method().kind(),
                i + 1,
                values.len(),
                count
            );
            break;
        }
    }

    GenerationResult {
        method: request.method(),
        requested: count,
        values,
        steps,
    }
}

/// Middle-square sequence of up to `n` values starting from `seed`.
pub fn middle_square(seed: i64, n: usize) -> Result<GenerationResult> {
    let request = GenerationRequest::new(Method::MiddleSquare { seed }, n)?;
    Ok(generate(&request))
}

/// Middle-product sequence of up to `n` values starting from `(seed1, seed2)`.
pub fn middle_product(seed1: i64, seed2: i64, n: usize) -> Result<GenerationResult> {
    let request = GenerationRequest::new(Method::MiddleProduct { seed1, seed2 }, n)?;
    Ok(generate(&request))
}

/// Constant-multiplier sequence of up to `n` values starting from `seed`.
pub fn constant_multiplier(seed: i64, constant: i64, n: usize) -> Result<GenerationResult> {
    let request = GenerationRequest::new(Method::ConstantMultiplier { seed, constant }, n)?;
    Ok(generate(&request))
}
