use fanout_core::Arch;

use crate::diagnostics::DiagnosticKind;
use crate::pipeline::BottomUpContext;

pub(super) fn split(ctx: &mut BottomUpContext<'_>, arches: &[Arch]) {
    let kind = ctx.kind();
    if !kind.links() {
        return;
    }

    let multilib = ctx
        .variant()
        .props
        .compile_multilib
        .unwrap_or_else(|| kind.default_multilib());
    let selected = multilib.select(arches);

    if selected.is_empty() {
        let configured: Vec<&str> = arches.iter().map(|a| a.as_str()).collect();
        ctx.report(DiagnosticKind::EmptyArchSet)
            .property("compile_multilib")
            .message(format!(
                "`{}` selects none of [{}]",
                multilib.as_str(),
                configured.join(", ")
            ))
            .emit();
        return;
    }

    let names: Vec<&str> = selected.iter().map(|a| a.as_str()).collect();
    ctx.create_variations(&names);
}
