//! Sequential test runner.

use crate::case::{panic_message, TestCase, TestContext};
use crate::error::ConformanceResult;
use crate::host::CanvasHost;
use crate::outcome::{CaseError, CaseResult, Outcome};
use crate::report::RunReport;
use crate::suite::Suite;
use futures::channel::oneshot;
use regex::Regex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default per-case timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Upper bound for one case, deferred wait included.
    ///
    /// On expiry the procedure task is aborted. Tasks the case spawned itself
    /// are not; they see [`Completion::cancelled`](crate::Completion::cancelled)
    /// resolve and should stop there.
    pub timeout: Duration,
    /// Only cases whose id matches run; the rest are reported as skipped.
    pub filter: Option<Regex>,
    /// Where failing pixel assertions save a PNG snapshot.
    pub artifacts_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            filter: None,
            artifacts_dir: None,
        }
    }
}

impl RunnerConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_filter(mut self, pattern: &str) -> ConformanceResult<Self> {
        self.filter = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    fn selects(&self, case: &TestCase) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |filter| filter.is_match(case.id()))
    }
}

/// Runs suites against one canvas host.
#[derive(Clone)]
pub struct Runner {
    host: Arc<dyn CanvasHost>,
    config: RunnerConfig,
}

impl Runner {
    pub fn new(host: Arc<dyn CanvasHost>, config: RunnerConfig) -> Self {
        Self { host, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every case of `suite` in order, one at a time.
    ///
    /// A case starts only after the previous one reached its outcome.
    pub async fn run(&self, suite: &Suite) -> RunReport {
        let mut report = RunReport::new(self.host.name());
        log::info!(
            "Running {} test cases on {}",
            suite.len(),
            self.host.name()
        );
        for case in suite.cases() {
            if !self.config.selects(case) {
                log::debug!("Skipping {}", case.id());
                report.record_skipped(case);
                continue;
            }
            let start = Instant::now();
            let outcome = self.run_case(case).await;
            let elapsed = start.elapsed();
            match outcome.detail() {
                None => log::info!("{} ... ok ({:?})", case.id(), elapsed),
                Some(detail) => log::warn!("{} ... {}", case.id(), detail),
            }
            report.record(case, &outcome, elapsed);
        }
        log::info!(
            "Finished: {} passed, {} failed, {} errored, {} skipped",
            report.summary.passed,
            report.summary.failed,
            report.summary.errored,
            report.summary.skipped
        );
        report
    }

    /// Run a single case to its outcome.
    ///
    /// The procedure runs as its own task so that a panic only ends this
    /// case. The procedure's own failure wins over a pending completion.
    pub async fn run_case(&self, case: &TestCase) -> Outcome {
        let (completion_tx, completion_rx) = oneshot::channel::<CaseResult>();
        let deferred = Arc::new(AtomicBool::new(false));
        let ctx = TestContext::new(
            case.id(),
            Arc::clone(&self.host),
            completion_tx,
            Arc::clone(&deferred),
            self.config.artifacts_dir.clone(),
        );

        log::debug!("Starting {}", case.id());
        let mut task = tokio::spawn((case.procedure)(ctx));

        let settle = async {
            let body = match (&mut task).await {
                Ok(result) => result,
                Err(err) if err.is_panic() => {
                    let message = panic_message(err.into_panic().as_ref());
                    return Outcome::Error(CaseError::UncaughtException(message));
                }
                Err(err) => return Outcome::Error(CaseError::UncaughtException(err.to_string())),
            };
            if let Err(signal) = body {
                return signal.into();
            }
            if !deferred.load(Ordering::SeqCst) {
                return Outcome::Pass;
            }
            log::debug!("Waiting for deferred completion of {}", case.id());
            match completion_rx.await {
                Ok(result) => result.into(),
                Err(oneshot::Canceled) => Outcome::Error(CaseError::Abandoned),
            }
        };

        let settled = tokio::time::timeout(self.config.timeout, settle).await;
        match settled {
            Ok(outcome) => outcome,
            Err(_) => {
                task.abort();
                Outcome::Error(CaseError::Timeout(self.config.timeout))
            }
        }
    }
}
