//! The fan-out passes and their standard registration order.

mod abi;
mod arch;
mod image;
mod link;
mod lto;
mod sanitize;

#[cfg(test)]
mod sanitize_tests;

use fanout_core::{BuildConfig, SanitizerKind, axis};

use crate::aspects::AbiClass;
use crate::pipeline::Pipeline;

pub const LTO_DEPS: &str = "lto_deps";
pub const ABI: &str = "abi";

/// Top-down pass name that precedes the `kind` split.
pub fn sanitizer_deps_pass(kind: SanitizerKind) -> String {
    format!("{}_deps", kind.variation())
}

/// arch, image, link, the sanitizer pairs, lto_deps/lto, abi.
pub fn standard(config: &BuildConfig) -> Pipeline {
    let arches = config.target_arches.clone();
    let enable_vendor_image = config.enable_vendor_image;

    let mut pipeline = Pipeline::new()
        .bottom_up_parallel(axis::ARCH, move |ctx| arch::split(ctx, &arches))
        .bottom_up_parallel(axis::IMAGE, move |ctx| {
            image::split(ctx, enable_vendor_image)
        })
        .bottom_up_parallel(axis::LINK, link::split);

    for kind in SanitizerKind::ALL {
        let runtime = config.sanitizer_runtimes.get(&kind).cloned();
        pipeline = pipeline
            .top_down(sanitizer_deps_pass(kind), move |ctx| {
                sanitize::mark_deps(ctx, kind)
            })
            .bottom_up_parallel(kind.variation(), move |ctx| {
                sanitize::split(ctx, kind, runtime.as_deref())
            });
    }

    pipeline = pipeline
        .top_down(LTO_DEPS, lto::mark_deps)
        .bottom_up_parallel(axis::LTO, lto::split)
        .bottom_up_parallel(ABI, abi::classify);

    for class in AbiClass::ALL {
        pipeline = pipeline.owns_registry(class.registry());
    }
    pipeline
}
