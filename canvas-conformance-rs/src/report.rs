//! Run reports.

use crate::case::TestCase;
use crate::error::ConformanceResult;
use crate::outcome::Outcome;
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Pass,
    Fail,
    Error,
    Skipped,
}

impl From<&Outcome> for OutcomeKind {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Pass => OutcomeKind::Pass,
            Outcome::Fail(_) => OutcomeKind::Fail,
            Outcome::Error(_) => OutcomeKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub description: String,
    pub category: String,
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
}

impl Summary {
    fn count(&mut self, kind: OutcomeKind) {
        self.total += 1;
        match kind {
            OutcomeKind::Pass => self.passed += 1,
            OutcomeKind::Fail => self.failed += 1,
            OutcomeKind::Error => self.errored += 1,
            OutcomeKind::Skipped => self.skipped += 1,
        }
    }
}

/// One entry per case of the suite, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub host: String,
    pub cases: Vec<CaseReport>,
    pub summary: Summary,
}

impl RunReport {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            cases: Vec::new(),
            summary: Summary::default(),
        }
    }

    pub fn record(&mut self, case: &TestCase, outcome: &Outcome, duration: Duration) {
        self.push(case, outcome.into(), outcome.detail(), duration.as_secs_f64() * 1000.0);
    }

    pub fn record_skipped(&mut self, case: &TestCase) {
        self.push(case, OutcomeKind::Skipped, None, 0.0);
    }

    fn push(&mut self, case: &TestCase, outcome: OutcomeKind, detail: Option<String>, duration_ms: f64) {
        self.summary.count(outcome);
        self.cases.push(CaseReport {
            id: case.id().to_string(),
            description: case.description().to_string(),
            category: case.category().to_string(),
            outcome,
            detail,
            duration_ms,
        });
    }

    pub fn get(&self, id: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|case| case.id == id)
    }

    /// No case failed or errored.
    pub fn success(&self) -> bool {
        self.summary.failed == 0 && self.summary.errored == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self, pretty: bool) -> ConformanceResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Plain text report: one line per case, details of failures, summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let ran = self.summary.total - self.summary.skipped;
        let _ = writeln!(out, "running {} tests on {}", ran, self.host);
        for case in &self.cases {
            let status = match case.outcome {
                OutcomeKind::Pass => "ok",
                OutcomeKind::Fail => "FAILED",
                OutcomeKind::Error => "ERROR",
                OutcomeKind::Skipped => "skipped",
            };
            let _ = writeln!(out, "test {} ... {}", case.id, status);
        }

        let problems: Vec<&CaseReport> = self
            .cases
            .iter()
            .filter(|case| matches!(case.outcome, OutcomeKind::Fail | OutcomeKind::Error))
            .collect();
        if !problems.is_empty() {
            let _ = writeln!(out, "\nfailures:");
            for case in problems {
                let _ = writeln!(out, "    {}: {}", case.id, case.detail.as_deref().unwrap_or(""));
            }
        }

        let _ = writeln!(
            out,
            "\ntest result: {}. {} passed; {} failed; {} errored; {} skipped",
            if self.success() { "ok" } else { "FAILED" },
            self.summary.passed,
            self.summary.failed,
            self.summary.errored,
            self.summary.skipped,
        );
        out
    }
}
