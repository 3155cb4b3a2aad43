use fanout_core::{DependencyTag, Properties};

use super::{AspectHooks, DepDecl, InitContext};
use crate::diagnostics::DiagnosticKind;

/// Library and object link inputs.
#[derive(Clone, Debug, Default)]
pub struct Linker;

impl AspectHooks for Linker {
    fn name(&self) -> &'static str {
        "linker"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) {
        let props = &*ctx.props;
        let mut unlisted = Vec::new();

        for name in &props.export_static_lib_headers {
            let listed =
                props.static_libs.contains(name) || props.whole_static_libs.contains(name);
            if !listed {
                unlisted.push(("export_static_lib_headers", name.clone()));
            }
        }
        for name in &props.export_shared_lib_headers {
            if !props.shared_libs.contains(name) {
                unlisted.push(("export_shared_lib_headers", name.clone()));
            }
        }

        for (property, name) in unlisted {
            ctx.diagnostics
                .report(DiagnosticKind::UnlistedExport, ctx.module)
                .property(property)
                .message(name)
                .emit();
        }
    }

    fn deps(&self, props: &Properties, out: &mut Vec<DepDecl>) {
        let exported = &props.export_static_lib_headers;
        DepDecl::each(
            &props.whole_static_libs,
            DependencyTag::WHOLE_STATIC,
            exported,
            "whole_static_libs",
            out,
        );
        DepDecl::each(
            &props.static_libs,
            DependencyTag::STATIC,
            exported,
            "static_libs",
            out,
        );
        DepDecl::each(
            &props.shared_libs,
            DependencyTag::SHARED,
            &props.export_shared_lib_headers,
            "shared_libs",
            out,
        );
        DepDecl::each(&props.objs, DependencyTag::OBJECT, &[], "objs", out);
    }
}
