use super::{deferred, HEIGHT, WIDTH};
use crate::assertions::{assert_not_same, assert_same};
use crate::case::{TestCase, TestContext};
use crate::host::CONTEXT_2D;
use crate::outcome::CaseResult;

pub(super) fn cases() -> Vec<TestCase> {
    vec![TestCase::new(
        "2d.getcontext.unique",
        "getContext('2d') returns the same object",
        |ctx| deferred(ctx, getcontext_unique),
    )
    .with_category("the-offscreen-canvas")]
}

fn getcontext_unique(t: &TestContext) -> CaseResult {
    let canvas = t.create_surface(WIDTH, HEIGHT)?;
    let ctx = canvas.get_context(CONTEXT_2D)?;

    let canvas2 = t.create_surface(WIDTH, HEIGHT)?;
    assert_same(
        &canvas2.get_context(CONTEXT_2D)?,
        &canvas2.get_context(CONTEXT_2D)?,
        "offscreenCanvas2.getContext('2d')",
    )?;
    assert_same(&ctx, &canvas.get_context(CONTEXT_2D)?, "offscreenCanvas.getContext('2d')")?;
    assert_not_same(&ctx, &canvas2.get_context(CONTEXT_2D)?, "contexts of distinct canvases")?;
    Ok(())
}
