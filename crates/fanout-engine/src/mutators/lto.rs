use fanout_core::axis::{LTO, LTO_FULL, LTO_THIN};

use crate::diagnostics::DiagnosticKind;
use crate::pipeline::{BottomUpContext, TopDownContext};

pub(super) fn mark_deps(ctx: &mut TopDownContext<'_>) {
    let variant = ctx.variant();
    if variant.lto().is_none() {
        return;
    }
    let full = variant.props.lto.is_full();
    let thin = variant.props.lto.is_thin();

    if full && thin {
        // Once per module, not once per variant.
        if ctx.current().index == 0 {
            ctx.report(DiagnosticKind::ConflictingLto)
                .property("lto")
                .emit();
        }
        return;
    }
    if !full && !thin {
        return;
    }

    ctx.walk_deps(|edge, dep| {
        if !edge.tag.library || !edge.tag.is_static() || dep.props.lto.never {
            return false;
        }
        let Some(lto) = dep.lto_mut() else {
            return false;
        };
        if full {
            lto.full_dep = true;
        } else {
            lto.thin_dep = true;
        }
        true
    });
}

pub(super) fn split(ctx: &mut BottomUpContext<'_>) {
    let variant = ctx.variant();
    let Some(flags) = variant.lto() else {
        return;
    };
    let lto = &variant.props.lto;

    let mut names = vec![""];
    if flags.full_dep && !lto.is_full() {
        names.push(LTO_FULL);
    }
    if flags.thin_dep && !lto.is_thin() {
        names.push(LTO_THIN);
    }

    if names.len() > 1 {
        for variant in ctx.create_variations(&names) {
            let (full, thin) = match variant.variation.get(LTO) {
                Some(LTO_FULL) => (true, false),
                Some(LTO_THIN) => (false, true),
                _ => continue,
            };
            variant.props.lto.full = Some(full);
            variant.props.lto.thin = Some(thin);
            if let Some(flags) = variant.lto_mut() {
                flags.clear();
            }
        }
    }

    for variant in ctx.variants_mut() {
        let lto = &variant.props.lto;
        let mode = if lto.is_full() {
            LTO_FULL
        } else if lto.is_thin() {
            LTO_THIN
        } else {
            continue;
        };
        variant.dependency_variation.set(LTO, mode);
    }
}
