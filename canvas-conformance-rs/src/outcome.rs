//! Case outcomes and the signals that produce them.

use crate::host::{HostError, Rgba};
use std::time::Duration;
use thiserror::Error;

/// A check inside a case did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("assert_equal: {label} (got {actual}, expected {expected})")]
    AssertionMismatch {
        label: String,
        actual: String,
        expected: String,
    },

    #[error("assert_pixel_approx: {label}: got pixel {actual} at {x},{y}, expected {expected} +/- {tolerance}")]
    PixelMismatch {
        label: String,
        x: u32,
        y: u32,
        actual: Rgba,
        expected: Rgba,
        tolerance: u8,
    },

    #[error("{}: {label}", identity_check(.expected_same))]
    IdentityMismatch { label: String, expected_same: bool },

    #[error("{0}")]
    Explicit(String),
}

fn identity_check(expected_same: &bool) -> &'static str {
    if *expected_same {
        "assert_same: expected the same object"
    } else {
        "assert_not_same: expected distinct objects"
    }
}

/// A case could not reach a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    #[error("Timed out after {0:?} without a terminal signal")]
    Timeout(Duration),

    #[error("Uncaught exception: {0}")]
    UncaughtException(String),

    #[error("Completion handle dropped without done() or fail()")]
    Abandoned,
}

/// Early-exit signal carried out of a case procedure by `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseSignal {
    Fail(Failure),
    Error(CaseError),
}

impl From<Failure> for CaseSignal {
    fn from(failure: Failure) -> Self {
        CaseSignal::Fail(failure)
    }
}

impl From<CaseError> for CaseSignal {
    fn from(error: CaseError) -> Self {
        CaseSignal::Error(error)
    }
}

impl From<HostError> for CaseSignal {
    fn from(error: HostError) -> Self {
        CaseSignal::Error(CaseError::UncaughtException(error.to_string()))
    }
}

/// What a case procedure (or its completion handle) resolves to.
pub type CaseResult<T = ()> = Result<T, CaseSignal>;

/// The single terminal result of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(Failure),
    Error(CaseError),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// Human-readable reason for anything other than a pass.
    pub fn detail(&self) -> Option<String> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail(failure) => Some(failure.to_string()),
            Outcome::Error(error) => Some(error.to_string()),
        }
    }
}

impl From<CaseSignal> for Outcome {
    fn from(signal: CaseSignal) -> Self {
        match signal {
            CaseSignal::Fail(failure) => Outcome::Fail(failure),
            CaseSignal::Error(error) => Outcome::Error(error),
        }
    }
}

impl From<CaseResult> for Outcome {
    fn from(result: CaseResult) -> Self {
        match result {
            Ok(()) => Outcome::Pass,
            Err(signal) => signal.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let failure = Failure::AssertionMismatch {
            label: "ctx.shadowBlur".to_string(),
            actual: "5.0".to_string(),
            expected: "0.0".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "assert_equal: ctx.shadowBlur (got 5.0, expected 0.0)"
        );

        let failure = Failure::PixelMismatch {
            label: "50,25".to_string(),
            x: 50,
            y: 25,
            actual: Rgba::new(255, 0, 0, 255),
            expected: Rgba::new(0, 255, 0, 255),
            tolerance: 4,
        };
        assert_eq!(
            failure.to_string(),
            "assert_pixel_approx: 50,25: got pixel 255,0,0,255 at 50,25, expected 0,255,0,255 +/- 4"
        );

        let failure = Failure::IdentityMismatch {
            label: "getContext('2d')".to_string(),
            expected_same: true,
        };
        assert_eq!(
            failure.to_string(),
            "assert_same: expected the same object: getContext('2d')"
        );
    }

    #[test]
    fn test_host_errors_become_uncaught_exceptions() {
        let signal: CaseSignal = HostError::UnsupportedContext("webgl".to_string()).into();
        assert!(matches!(
            Outcome::from(signal),
            Outcome::Error(CaseError::UncaughtException(msg)) if msg.contains("webgl")
        ));
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(Outcome::from(Ok(())), Outcome::Pass);
        let outcome = Outcome::from(Err(CaseSignal::Error(CaseError::Abandoned)));
        assert_eq!(outcome, Outcome::Error(CaseError::Abandoned));
        assert!(outcome.detail().is_some());
    }
}
