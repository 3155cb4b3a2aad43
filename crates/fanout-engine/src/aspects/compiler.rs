use fanout_core::{DependencyTag, Properties};

use super::{AspectHooks, DepDecl, InitContext};
use crate::diagnostics::DiagnosticKind;

/// Sources, include dirs and header-only dependencies.
#[derive(Clone, Debug, Default)]
pub struct Compiler;

impl Compiler {
    /// Splice the vendor-image source overrides into `srcs`.
    pub fn apply_vendor_sources(props: &mut Properties) {
        let vendor = std::mem::take(&mut props.target.vendor);
        props.srcs.extend(vendor.srcs);
        props.srcs.retain(|src| !vendor.exclude_srcs.contains(src));
    }
}

impl AspectHooks for Compiler {
    fn name(&self) -> &'static str {
        "compiler"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) {
        let props = &*ctx.props;

        for name in &props.export_header_lib_headers {
            if !props.header_libs.contains(name) {
                ctx.diagnostics
                    .report(DiagnosticKind::UnlistedExport, ctx.module)
                    .property("export_header_lib_headers")
                    .message(name)
                    .emit();
            }
        }

        if props.vendor && props.vendor_available {
            ctx.diagnostics
                .report(DiagnosticKind::ConflictingImage, ctx.module)
                .property("vendor_available")
                .emit();
        }

        if !props.vendor && !props.dual_image() && !props.target.vendor.is_empty() {
            ctx.diagnostics
                .report(DiagnosticKind::IgnoredVendorProperty, ctx.module)
                .property("target.vendor")
                .emit();
        }
    }

    fn deps(&self, props: &Properties, out: &mut Vec<DepDecl>) {
        DepDecl::each(
            &props.header_libs,
            DependencyTag::HEADER,
            &props.export_header_lib_headers,
            "header_libs",
            out,
        );
    }
}
