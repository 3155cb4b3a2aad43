use crate::pipeline::BottomUpContext;

pub(super) fn split(ctx: &mut BottomUpContext<'_>) {
    let modes = ctx.kind().link_modes();
    if !modes.is_empty() {
        ctx.create_variations(modes);
    }
}
