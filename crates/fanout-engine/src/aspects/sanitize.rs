use std::collections::BTreeSet;

use fanout_core::SanitizerKind;

use super::{AspectHooks, InitContext};
use crate::diagnostics::DiagnosticKind;

/// Sanitizers that cannot share a variant.
const EXCLUSIVE: [(SanitizerKind, SanitizerKind); 3] = [
    (SanitizerKind::Address, SanitizerKind::Hwaddress),
    (SanitizerKind::Address, SanitizerKind::Thread),
    (SanitizerKind::Hwaddress, SanitizerKind::Thread),
];

/// Request flags stamped by the `<kind>_deps` walks.
#[derive(Clone, Debug, Default)]
pub struct Sanitize {
    pub requested: BTreeSet<SanitizerKind>,
}

impl Sanitize {
    pub fn is_requested(&self, kind: SanitizerKind) -> bool {
        self.requested.contains(&kind)
    }

    pub fn request(&mut self, kind: SanitizerKind) {
        self.requested.insert(kind);
    }

    pub fn clear(&mut self, kind: SanitizerKind) {
        self.requested.remove(&kind);
    }
}

impl AspectHooks for Sanitize {
    fn name(&self) -> &'static str {
        "sanitize"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) {
        let sanitize = &ctx.props.sanitize;
        for (a, b) in EXCLUSIVE {
            if sanitize.enabled(a) && sanitize.enabled(b) {
                ctx.diagnostics
                    .report(DiagnosticKind::ConflictingSanitizers, ctx.module)
                    .property(b.property())
                    .hint(format!(
                        "`{}` and `{}` cannot be enabled together",
                        a.property(),
                        b.property()
                    ))
                    .emit();
            }
        }
    }
}
