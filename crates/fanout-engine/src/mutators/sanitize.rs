use fanout_core::{DependencyTag, ModuleKind, SanitizerKind, axis};

use crate::diagnostics::DiagnosticKind;
use crate::graph::{Edge, Variant};
use crate::pipeline::{BottomUpContext, TopDownContext};

const RUNTIME_PROPERTY: &str = "config.sanitizer_runtimes";

/// Stamp the request flag on every variant statically linked into a
/// directly sanitized one.
pub(super) fn mark_deps(ctx: &mut TopDownContext<'_>, kind: SanitizerKind) {
    let variant = ctx.variant();
    if variant.sanitize().is_none() || !variant.props.sanitize.enabled(kind) {
        return;
    }

    ctx.walk_deps(|edge, dep| {
        if !edge.tag.library || !edge.tag.is_static() || dep.props.sanitize.never {
            return false;
        }
        let Some(sanitize) = dep.sanitize_mut() else {
            return false;
        };
        sanitize.request(kind);
        true
    });
}

pub(super) fn split(ctx: &mut BottomUpContext<'_>, kind: SanitizerKind, runtime: Option<&str>) {
    let variant = ctx.variant();
    let Some(sanitize) = variant.sanitize() else {
        return;
    };
    let direct = variant.props.sanitize.enabled(kind);
    if !direct && !sanitize.is_requested(kind) {
        return;
    }

    let module_kind = ctx.kind();
    let runtime = runtime.map(|name| (name, ctx.graph().lookup(name)));

    let variants = ctx.create_variations(&["", kind.variation()]);
    for variant in variants.iter_mut() {
        let on = variant.variation.get(kind.variation()) == Some(kind.variation());
        variant.props.sanitize.set(kind, on);
        if on && kind == SanitizerKind::Address {
            variant.props.sanitize.set(SanitizerKind::Cfi, false);
        }
        if let Some(sanitize) = variant.sanitize_mut() {
            sanitize.clear(kind);
        }
        if on != direct
            && let Some(installer) = variant.installer_mut()
        {
            installer.hidden = true;
        }
    }

    let Some((name, target)) = runtime else {
        return;
    };
    let Some(target) = target else {
        ctx.report(DiagnosticKind::UndefinedDependency)
            .property(RUNTIME_PROPERTY)
            .message(name)
            .emit();
        return;
    };
    if target == ctx.module_id() {
        return;
    }

    for variant in ctx.variants_mut() {
        if needs_runtime(variant, kind, module_kind) {
            variant
                .edges
                .push(Edge::new(DependencyTag::RUNTIME, target, RUNTIME_PROPERTY));
        }
    }
}

fn needs_runtime(variant: &Variant, kind: SanitizerKind, module_kind: ModuleKind) -> bool {
    let sanitized = variant.variation.get(kind.variation()) == Some(kind.variation());
    let links_dynamically = module_kind == ModuleKind::CcBinary
        || variant.variation.get(axis::LINK) == Some(axis::SHARED);
    sanitized && !variant.is_hidden() && links_dynamically
}
