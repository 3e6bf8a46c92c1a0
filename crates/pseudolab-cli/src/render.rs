//! Plain-text rendering of generation traces and test reports.

use pseudolab_core::{GenerationResult, GenerationStep, StepInput};
use pseudolab_tests::{MeanReport, TestReport, UniformityReport, VarianceReport};

const RULE_WIDTH: usize = 60;

fn step_line(step: &GenerationStep) -> String {
    let expr = match step.input {
        StepInput::Square { x } => format!("{x}²"),
        StepInput::Product { x0, x1 } => format!("{x0}×{x1}"),
        StepInput::Constant { x, constant } => format!("{constant}×{x}"),
    };
    format!(
        "Iteration {}: {} = {} -> {:04} -> {:.4}\n",
        step.iteration, expr, step.product, step.star, step.ri
    )
}

/// Step-by-step trace followed by a summary line.
pub fn render_trace(result: &GenerationResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&format!(
        "{} GENERATION\n",
        result.method.kind().label().to_uppercase()
    ));
    out.push_str(&format!("{rule}\n"));
    for step in &result.steps {
        out.push_str(&step_line(step));
    }
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("Generated {} pseudorandom numbers\n", result.len()));
    if result.terminated_early() {
        out.push_str(&format!(
            "Stopped after {} of {}: the state collapsed to 0\n",
            result.len(),
            result.requested
        ));
    }
    out
}

fn verdict(out: &mut String, passed: bool, test: &str) {
    if passed {
        out.push_str(&format!("✓ CONCLUSION: the numbers pass the {test}\n"));
    } else {
        out.push_str(&format!("✗ CONCLUSION: the numbers do NOT pass the {test}\n"));
    }
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("{label:<25} {value}\n"));
}

fn render_mean(out: &mut String, r: &MeanReport) {
    field(out, "Sample count:", r.sample_count);
    field(out, "Mean:", format!("{:.6}", r.mean));
    field(out, "Lower bound:", format!("{:.6}", r.lower));
    field(out, "Upper bound:", format!("{:.6}", r.upper));
    field(out, "Z:", format!("{:.4}", r.z));
    field(out, "Confidence level:", r.confidence);
    verdict(out, r.passed, "mean test");
}

fn render_variance(out: &mut String, r: &VarianceReport) {
    field(out, "Sample count:", r.sample_count);
    field(out, "Variance:", format!("{:.6}", r.variance));
    field(out, "Lower bound:", format!("{:.6}", r.lower));
    field(out, "Upper bound:", format!("{:.6}", r.upper));
    field(out, "Chi² lower:", format!("{:.4}", r.chi2_lower));
    field(out, "Chi² upper:", format!("{:.4}", r.chi2_upper));
    field(out, "Degrees of freedom:", r.df);
    field(out, "Confidence level:", r.confidence);
    verdict(out, r.passed, "variance test");
}

fn render_uniformity(out: &mut String, r: &UniformityReport) {
    field(out, "Sample count:", r.sample_count);
    field(out, "Intervals:", r.intervals.len());
    field(out, "Expected per interval:", format!("{:.2}", r.expected));
    field(out, "Chi² calculated:", format!("{:.4}", r.chi2_calc));
    field(out, "Chi² critical:", format!("{:.4}", r.chi2_crit));
    field(out, "Degrees of freedom:", r.df);
    field(out, "Confidence level:", r.confidence);
    out.push_str("\nFREQUENCY TABLE:\n");
    out.push_str(&format!(
        "{:<16}{:<12}{:<12}{}\n",
        "Interval", "Observed", "Expected", "Contribution"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    let last = r.intervals.len().saturating_sub(1);
    for (i, row) in r.intervals.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        let interval = format!("[{:.2}-{:.2}{close}", row.lower, row.upper);
        out.push_str(&format!(
            "{:<16}{:<12}{:<12.2}{:.4}\n",
            interval, row.observed, row.expected, row.contribution
        ));
    }
    out.push('\n');
    verdict(out, r.passed, "uniformity test");
}

/// One test report under a heading naming the test and the method.
pub fn render_report(report: &TestReport, method_label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {} ({method_label}) ===\n",
        report.kind().title().to_uppercase()
    ));
    match report {
        TestReport::Mean(r) => render_mean(&mut out, r),
        TestReport::Variance(r) => render_variance(&mut out, r),
        TestReport::Uniformity(r) => render_uniformity(&mut out, r),
    }
    out
}
