use fanout_core::axis::{CORE, IMAGE, VENDOR};

use crate::aspects::Compiler;
use crate::pipeline::BottomUpContext;

pub(super) fn split(ctx: &mut BottomUpContext<'_>, enable_vendor_image: bool) {
    let props = &ctx.variant().props;
    let names: &[&str] = if !enable_vendor_image {
        &[CORE]
    } else if props.vendor {
        &[VENDOR]
    } else if props.dual_image() {
        &[CORE, VENDOR]
    } else {
        &[CORE]
    };

    for variant in ctx.create_variations(names) {
        if variant.variation.get(IMAGE) == Some(VENDOR) {
            variant.in_vendor = true;
            Compiler::apply_vendor_sources(&mut variant.props);
        } else {
            variant.props.target.vendor = Default::default();
        }
    }
}
