//! Built-in OffscreenCanvas 2D conformance cases.
//!
//! Every case runs deferred: it takes its [`Completion`] up front and ends
//! through it, like the asynchronous worker tests these cases come from.

mod offscreen;
mod shadows;
mod state;

use crate::case::{Completion, TestCase, TestContext};
use crate::outcome::CaseResult;
use crate::suite::Suite;

/// Every built-in case, in a fixed order.
pub fn builtin_suite() -> Suite {
    let mut suite = Suite::new();
    let cases = shadows::cases()
        .into_iter()
        .chain(state::cases())
        .chain(offscreen::cases());
    for case in cases {
        if let Err(err) = suite.register(case) {
            log::error!("Skipping built-in case: {}", err);
        }
    }
    suite
}

/// Defer, run `step`, then end the case through the completion handle.
async fn deferred<F>(mut ctx: TestContext, step: F) -> CaseResult
where
    F: FnOnce(&TestContext) -> CaseResult + Send,
{
    let completion: Completion = ctx.defer()?;
    completion.complete_with(|| step(&ctx));
    Ok(())
}

/// Canvas size used by every built-in case.
const WIDTH: u32 = 100;
const HEIGHT: u32 = 50;
