//! Test case definitions and the context handed to a running case.

use crate::assertions;
use crate::host::{CanvasHost, Rgba, Surface};
use crate::outcome::{CaseError, CaseResult, CaseSignal, Failure};
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Category used when a case does not name one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

pub(crate) type Procedure = Arc<dyn Fn(TestContext) -> BoxFuture<'static, CaseResult> + Send + Sync>;

/// A named, self-contained conformance check.
#[derive(Clone)]
pub struct TestCase {
    id: String,
    description: String,
    category: String,
    pub(crate) procedure: Procedure,
}

impl TestCase {
    /// Define a case from an async procedure.
    ///
    /// Returning `Ok(())` without calling [`TestContext::defer`] passes the
    /// case; after `defer` the case waits for its [`Completion`].
    pub fn new<F, Fut>(id: impl Into<String>, description: impl Into<String>, procedure: F) -> Self
    where
        F: Fn(TestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CaseResult> + Send + 'static,
    {
        Self {
            id: id.into(),
            description: description.into(),
            category: DEFAULT_CATEGORY.to_string(),
            procedure: Arc::new(move |ctx| procedure(ctx).boxed()),
        }
    }

    /// Define a case from a synchronous procedure.
    pub fn sync<F>(id: impl Into<String>, description: impl Into<String>, procedure: F) -> Self
    where
        F: Fn(&mut TestContext) -> CaseResult + Send + Sync + 'static,
    {
        let procedure = Arc::new(procedure);
        Self::new(id, description, move |mut ctx| {
            let procedure = Arc::clone(&procedure);
            async move { procedure(&mut ctx) }
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Everything a running case can reach.
pub struct TestContext {
    case_id: String,
    host: Arc<dyn CanvasHost>,
    completion: Option<oneshot::Sender<CaseResult>>,
    deferred: Arc<AtomicBool>,
    artifacts_dir: Option<PathBuf>,
}

impl TestContext {
    pub(crate) fn new(
        case_id: &str,
        host: Arc<dyn CanvasHost>,
        completion: oneshot::Sender<CaseResult>,
        deferred: Arc<AtomicBool>,
        artifacts_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            case_id: case_id.to_string(),
            host,
            completion: Some(completion),
            deferred,
            artifacts_dir,
        }
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn host(&self) -> &Arc<dyn CanvasHost> {
        &self.host
    }

    /// Create a surface on the host under test.
    pub fn create_surface(&self, width: u32, height: u32) -> CaseResult<Arc<dyn Surface>> {
        Ok(self.host.create_surface(width, height)?)
    }

    /// Boolean check with a message.
    pub fn assert(&self, condition: bool, message: &str) -> Result<(), Failure> {
        assertions::assert_equal(condition, true, message)
    }

    /// Fail the case with `reason`.
    pub fn fail<T>(&self, reason: impl Into<String>) -> CaseResult<T> {
        Err(Failure::Explicit(reason.into()).into())
    }

    /// Switch the case to deferred completion.
    ///
    /// The case then ends only through the returned [`Completion`], or by
    /// timing out. A case can defer once.
    pub fn defer(&mut self) -> Result<Completion, CaseSignal> {
        let sender = self.completion.take().ok_or_else(|| {
            CaseError::UncaughtException(format!("{}: defer() called twice", self.case_id))
        })?;
        self.deferred.store(true, Ordering::SeqCst);
        Ok(Completion {
            case_id: self.case_id.clone(),
            sender,
        })
    }

    /// [`assertions::assert_pixel_approx`] that also saves a PNG snapshot of
    /// the surface when the pixel does not match and an artifacts directory
    /// is configured.
    pub fn assert_pixel_approx(
        &self,
        surface: &dyn Surface,
        x: u32,
        y: u32,
        expected: Rgba,
        tolerance: u8,
        label: &str,
    ) -> CaseResult {
        let result = assertions::assert_pixel_approx(surface, x, y, expected, tolerance, label);
        if let (Err(CaseSignal::Fail(Failure::PixelMismatch { .. })), Some(dir)) =
            (&result, &self.artifacts_dir)
        {
            self.write_snapshot(surface, dir);
        }
        result
    }

    fn write_snapshot(&self, surface: &dyn Surface, dir: &Path) {
        let path = dir.join(format!("{}.png", self.case_id));
        let written = surface
            .snapshot_png()
            .map_err(|err| err.to_string())
            .and_then(|png| {
                std::fs::create_dir_all(dir).map_err(|err| err.to_string())?;
                std::fs::write(&path, png).map_err(|err| err.to_string())
            });
        match written {
            Ok(()) => log::info!("Wrote failure snapshot to {}", path.display()),
            Err(err) => log::warn!("Failed to write snapshot {}: {}", path.display(), err),
        }
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("case_id", &self.case_id)
            .field("host", &self.host.name())
            .field("deferred", &self.deferred.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Handle that ends a deferred case.
///
/// Each method consumes the handle, so a case can signal at most once.
/// Dropping it without signalling ends the case with [`CaseError::Abandoned`].
/// Signals arriving after the runner gave up on the case are ignored; tasks
/// holding the handle can watch [`Completion::cancelled`] to stop early.
#[derive(Debug)]
pub struct Completion {
    case_id: String,
    sender: oneshot::Sender<CaseResult>,
}

impl Completion {
    /// Pass the case.
    pub fn done(self) {
        self.resolve(Ok(()));
    }

    /// Fail the case with `reason`.
    pub fn fail(self, reason: impl Into<String>) {
        self.resolve(Err(Failure::Explicit(reason.into()).into()));
    }

    /// End the case with the result of a procedure step.
    pub fn resolve(self, result: CaseResult) {
        if self.sender.send(result).is_err() {
            log::debug!("Late completion for {} ignored", self.case_id);
        }
    }

    /// Resolves once the runner stops waiting for this case, for example
    /// after a timeout.
    pub async fn cancelled(&mut self) {
        self.sender.cancellation().await
    }

    pub fn is_cancelled(&self) -> bool {
        self.sender.is_canceled()
    }

    /// Run `step` and end the case with its result.
    ///
    /// A panic inside `step` ends the case as an uncaught exception.
    pub fn complete_with(self, step: impl FnOnce() -> CaseResult) {
        let result = match panic::catch_unwind(AssertUnwindSafe(step)) {
            Ok(result) => result,
            Err(payload) => Err(CaseError::UncaughtException(panic_message(payload.as_ref())).into()),
        };
        self.resolve(result);
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
