//! The most recent generation, held for the commands that render and test it.

use pseudolab_core::{GenerationRequest, GenerationResult, Result, generate};
use pseudolab_tests::{TestConfig, TestKind, TestReport, run_test};

#[derive(Debug, Default)]
pub struct Session {
    last: Option<GenerationResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new sequence, replacing the previous one.
    pub fn generate(&mut self, request: &GenerationRequest) -> &GenerationResult {
        let result = generate(request);
        log::info!(
            "generated {} of {} values with {}",
            result.len(),
            result.requested,
            result.method.kind()
        );
        self.last.insert(result)
    }

    pub fn last(&self) -> Option<&GenerationResult> {
        self.last.as_ref()
    }

    /// Label of the method behind the current sequence.
    pub fn method_label(&self) -> &'static str {
        self.last
            .as_ref()
            .map(|r| r.method.kind().label())
            .unwrap_or("No method")
    }

    /// Run one test on the current sequence. Without a sequence this is an
    /// insufficient-data error, same as an empty one.
    pub fn run_test(&self, kind: TestKind, config: &TestConfig) -> Result<TestReport> {
        let values = self.last.as_ref().map(|r| r.values.as_slice()).unwrap_or(&[]);
        run_test(kind, values, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pseudolab_core::{Error, Method};

    #[test]
    fn test_empty_session() {
        let session = Session::new();
        assert!(session.last().is_none());
        assert_eq!(session.method_label(), "No method");
        assert!(matches!(
            session.run_test(TestKind::Mean, &TestConfig::default()),
            Err(Error::InsufficientData { got: 0, .. })
        ));
    }

    #[test]
    fn test_generate_replaces_previous() {
        let mut session = Session::new();
        let square = GenerationRequest::new(Method::MiddleSquare { seed: 5115 }, 3).unwrap();
        session.generate(&square);
        assert_eq!(session.method_label(), "Middle Square");

        let product = GenerationRequest::new(
            Method::MiddleProduct {
                seed1: 1234,
                seed2: 5678,
            },
            4,
        )
        .unwrap();
        let result = session.generate(&product);
        assert_eq!(result.len(), 4);
        assert_eq!(session.method_label(), "Middle Product");
        assert_eq!(session.last().map(|r| r.values[0]), Some(0.0066));
    }

    #[test]
    fn test_generate_huge_count_that_collapses() {
        let mut session = Session::new();
        let request = GenerationRequest::new(Method::MiddleSquare { seed: 100 }, usize::MAX).unwrap();
        let result = session.generate(&request);
        assert_eq!(result.values, vec![0.1, 0.0]);
        assert!(result.terminated_early());
    }

    #[test]
    fn test_run_test_uses_last_sequence() {
        let mut session = Session::new();
        let request = GenerationRequest::new(Method::MiddleSquare { seed: 5115 }, 15).unwrap();
        session.generate(&request);
        let report = session
            .run_test(TestKind::Uniformity, &TestConfig::default())
            .unwrap();
        assert_eq!(report.kind(), TestKind::Uniformity);
        assert!(report.passed());
    }
}
