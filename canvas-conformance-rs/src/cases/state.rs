use super::{deferred, HEIGHT, WIDTH};
use crate::assertions::assert_equal;
use crate::case::{TestCase, TestContext};
use crate::host::{HostResult, RenderingContext2d, CONTEXT_2D};
use crate::outcome::CaseResult;
use std::fmt::Debug;

const CATEGORY: &str = "the-canvas-state";

/// A drawing state attribute with an accessor pair and a non-default value.
#[derive(Clone)]
struct Attribute<T> {
    name: &'static str,
    get: fn(&dyn RenderingContext2d) -> HostResult<T>,
    set: fn(&dyn RenderingContext2d, &T) -> HostResult<()>,
    value: T,
}

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        save_restore_case(Attribute {
            name: "shadowBlur",
            get: |ctx| ctx.shadow_blur(),
            set: |ctx, v| ctx.set_shadow_blur(*v),
            value: 5.0,
        }),
        save_restore_case(Attribute {
            name: "shadowColor",
            get: |ctx| ctx.shadow_color(),
            set: |ctx, v: &String| ctx.set_shadow_color(v),
            value: "#ff0000".to_string(),
        }),
        save_restore_case(Attribute {
            name: "shadowOffsetX",
            get: |ctx| ctx.shadow_offset_x(),
            set: |ctx, v| ctx.set_shadow_offset_x(*v),
            value: 5.0,
        }),
        save_restore_case(Attribute {
            name: "shadowOffsetY",
            get: |ctx| ctx.shadow_offset_y(),
            set: |ctx, v| ctx.set_shadow_offset_y(*v),
            value: 5.0,
        }),
    ]
}

fn save_restore_case<T>(attr: Attribute<T>) -> TestCase
where
    T: PartialEq + Debug + Clone + Send + Sync + 'static,
{
    TestCase::new(
        format!("2d.state.saverestore.{}", attr.name),
        format!("save()/restore() works for {}", attr.name),
        move |ctx| {
            let attr = attr.clone();
            deferred(ctx, move |t| save_restore(t, &attr))
        },
    )
    .with_category(CATEGORY)
}

fn save_restore<T: PartialEq + Debug>(t: &TestContext, attr: &Attribute<T>) -> CaseResult {
    let surface = t.create_surface(WIDTH, HEIGHT)?;
    let ctx = surface.get_context(CONTEXT_2D)?;
    let ctx = ctx.as_ref();
    let label = format!("ctx.{}", attr.name);

    // restore() undoes modifications made after save()
    let old = (attr.get)(ctx)?;
    ctx.save()?;
    (attr.set)(ctx, &attr.value)?;
    ctx.restore()?;
    assert_equal((attr.get)(ctx)?, old, &label)?;

    // save() itself leaves the value alone; compare against the read-back
    // value so setter rounding does not matter
    (attr.set)(ctx, &attr.value)?;
    let old = (attr.get)(ctx)?;
    ctx.save()?;
    assert_equal((attr.get)(ctx)?, old, &label)?;
    ctx.restore()?;
    Ok(())
}
