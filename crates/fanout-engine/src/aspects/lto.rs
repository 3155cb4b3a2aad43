use super::AspectHooks;

/// Request flags stamped by the `lto_deps` walk.
#[derive(Clone, Debug, Default)]
pub struct Lto {
    pub full_dep: bool,
    pub thin_dep: bool,
}

impl Lto {
    pub fn clear(&mut self) {
        self.full_dep = false;
        self.thin_dep = false;
    }
}

impl AspectHooks for Lto {
    fn name(&self) -> &'static str {
        "lto"
    }
}
