use super::AspectHooks;

/// Install policy for a variant.
#[derive(Clone, Debug, Default)]
pub struct Installer {
    /// The variant exists only to satisfy a static-link closure and is not
    /// installed.
    pub hidden: bool,
}

impl AspectHooks for Installer {
    fn name(&self) -> &'static str {
        "installer"
    }
}
