use super::{deferred, HEIGHT, WIDTH};
use crate::case::{TestCase, TestContext};
use crate::host::{Rgba, CONTEXT_2D};
use crate::outcome::CaseResult;

pub(super) fn cases() -> Vec<TestCase> {
    vec![TestCase::new(
        "2d.shadow.alpha.1",
        "Shadow colour alpha components are used",
        |ctx| deferred(ctx, shadow_alpha),
    )
    .with_category("shadows")]
}

/// Only the shadow of an off-canvas rectangle lands on the green fill. At
/// 1% alpha it stays within tolerance of pure green.
fn shadow_alpha(t: &TestContext) -> CaseResult {
    let surface = t.create_surface(WIDTH, HEIGHT)?;
    let ctx = surface.get_context(CONTEXT_2D)?;

    ctx.set_fill_style("#0f0")?;
    ctx.fill_rect(0.0, 0.0, 100.0, 50.0)?;
    ctx.set_shadow_color("rgba(255, 0, 0, 0.01)")?;
    ctx.set_shadow_offset_y(50.0)?;
    ctx.fill_rect(0.0, -50.0, 100.0, 50.0)?;

    t.assert_pixel_approx(surface.as_ref(), 50, 25, Rgba::new(0, 255, 0, 255), 4, "50,25")
}
