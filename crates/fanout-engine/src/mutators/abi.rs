use fanout_core::axis::{LINK, SHARED};

use crate::aspects::AbiClass;
use crate::diagnostics::DiagnosticKind;
use crate::graph::Variant;
use crate::pipeline::BottomUpContext;

struct Violation {
    property: &'static str,
    target: String,
    target_variant: String,
    target_class: AbiClass,
}

/// Classify vendor-image shared libraries and check their library edges
/// against the class matrix.
pub(super) fn classify(ctx: &mut BottomUpContext<'_>) {
    let Some(class) = class_of(ctx.variant()) else {
        return;
    };
    ctx.registries().append(class.registry(), ctx.module_name());

    let mut violations = Vec::new();
    for edge in ctx.variant().edges.iter().filter(|e| e.tag.library) {
        let Some((target_ref, target)) = ctx.resolve(edge) else {
            continue;
        };
        let Some(target_class) = class_of(target) else {
            continue;
        };
        if !class.may_depend_on(target_class) {
            violations.push(Violation {
                property: edge.property,
                target: ctx.graph().module(target_ref.module).name().to_string(),
                target_variant: target.name(),
                target_class,
            });
        }
    }

    if let Some(abi) = ctx.variant_mut().abi_mut() {
        abi.class = Some(class);
    }

    let module = ctx.module_name().to_string();
    for v in violations {
        ctx.report(DiagnosticKind::AbiViolation)
            .property(v.property)
            .message(format!(
                "{class} library `{module}` cannot depend on {} library `{}`",
                v.target_class, v.target
            ))
            .related_to(
                &v.target,
                Some(&v.target_variant),
                format!("`{}` is classified as {}", v.target, v.target_class),
            )
            .emit();
    }
}

/// Class of a vendor-image shared library, from its own properties.
fn class_of(variant: &Variant) -> Option<AbiClass> {
    if !variant.in_vendor || variant.variation.get(LINK) != Some(SHARED) {
        return None;
    }
    variant.abi()?;
    Some(AbiClass::classify(&variant.props))
}
