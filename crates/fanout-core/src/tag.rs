//! Dependency edge roles.

use std::fmt;

use serde::Serialize;

use crate::variation::axis;

/// Semantic role of a dependency.
///
/// Declaration order is the order tags appear in resolution output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepKind {
    Static,
    WholeStatic,
    Shared,
    Runtime,
    Header,
    Object,
}

impl DepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::WholeStatic => "whole_static",
            Self::Shared => "shared",
            Self::Runtime => "runtime",
            Self::Header => "header",
            Self::Object => "object",
        }
    }
}

/// Edge metadata: role plus the `library` and `reexport` flags.
///
/// - `library`: the target contributes to link inputs.
/// - `reexport`: headers exported by the target are re-exported to the
///   dependents of the edge source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyTag {
    pub kind: DepKind,
    pub library: bool,
    pub reexport: bool,
}

impl DependencyTag {
    pub const STATIC: Self = Self::new(DepKind::Static);
    pub const WHOLE_STATIC: Self = Self::new(DepKind::WholeStatic);
    pub const SHARED: Self = Self::new(DepKind::Shared);
    pub const RUNTIME: Self = Self::new(DepKind::Runtime);
    pub const HEADER: Self = Self::new(DepKind::Header);
    pub const OBJECT: Self = Self::new(DepKind::Object);

    pub const fn new(kind: DepKind) -> Self {
        let library = !matches!(kind, DepKind::Header);
        Self {
            kind,
            library,
            reexport: false,
        }
    }

    pub const fn reexported(mut self) -> Self {
        self.reexport = true;
        self
    }

    /// Linked as an archive into the edge source.
    pub fn is_static(&self) -> bool {
        matches!(self.kind, DepKind::Static | DepKind::WholeStatic)
    }

    /// Linked dynamically; crossing such an edge ends static closures.
    pub fn is_shared(&self) -> bool {
        matches!(self.kind, DepKind::Shared | DepKind::Runtime)
    }

    /// Whether the target's exported include dirs are visible to the source.
    pub fn provides_headers(&self) -> bool {
        !matches!(self.kind, DepKind::Object | DepKind::Runtime)
    }

    /// Value this tag pins on the `link` axis, if any.
    pub fn link_mode(&self) -> Option<&'static str> {
        if self.is_static() {
            Some(axis::STATIC)
        } else if self.is_shared() {
            Some(axis::SHARED)
        } else {
            None
        }
    }
}

impl fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if self.reexport {
            f.write_str(" (reexport)")?;
        }
        Ok(())
    }
}
