use std::path::Path;

use pseudolab_core::{LabConfig, Result, write_export};
use pseudolab_tests::{TestConfig, TestKind};

use super::test::collect_reports;
use super::{GenerationArgs, TestArgs};
use crate::render;
use crate::session::Session;

/// Trace plus every test, as one text block.
pub fn build_report(session: &Session, config: &TestConfig) -> Result<String> {
    let mut out = String::new();
    if let Some(result) = session.last() {
        out.push_str(&render::render_trace(result));
    }
    for report in collect_reports(session, &TestKind::ALL, config)? {
        out.push('\n');
        out.push_str(&render::render_report(&report, session.method_label()));
    }
    Ok(out)
}

pub fn run(
    generation: &GenerationArgs,
    tests: &TestArgs,
    config: &LabConfig,
    export: Option<&str>,
) -> Result<()> {
    let request = generation.to_request(config)?;
    let test_config = tests.to_config(config)?;

    let mut session = Session::new();
    session.generate(&request);
    let body = build_report(&session, &test_config)?;
    print!("{body}");

    if let Some(path) = export {
        write_export(Path::new(path), session.method_label(), &body)?;
        println!("\nReport saved to: {path}");
    }
    Ok(())
}
