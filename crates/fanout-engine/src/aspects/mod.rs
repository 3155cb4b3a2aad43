//! Per-variant aspects.
//!
//! A module kind selects a fixed, ordered aspect list once at construction.
//! Every aspect implements the same small interface ([`AspectHooks`]):
//! declaration checks in `init` and edge contributions in `deps`. Passes
//! reach the state they own through the typed accessors on [`Variant`].

mod abi;
mod compiler;
mod installer;
mod linker;
mod lto;
mod sanitize;

#[cfg(test)]
mod aspects_tests;

use fanout_core::{DependencyTag, ModuleKind, Properties};

use crate::diagnostics::Diagnostics;
use crate::graph::Variant;

pub use abi::{Abi, AbiClass};
pub use compiler::Compiler;
pub use installer::Installer;
pub use linker::Linker;
pub use lto::Lto;
pub use sanitize::Sanitize;

/// A dependency as declared by a property, before name lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepDecl {
    pub tag: DependencyTag,
    pub name: String,
    pub property: &'static str,
}

impl DepDecl {
    fn each(
        names: &[String],
        tag: DependencyTag,
        reexported: &[String],
        property: &'static str,
        out: &mut Vec<DepDecl>,
    ) {
        for name in names {
            let tag = if reexported.contains(name) {
                tag.reexported()
            } else {
                tag
            };
            out.push(DepDecl {
                tag,
                name: name.clone(),
                property,
            });
        }
    }
}

pub struct InitContext<'a> {
    pub module: &'a str,
    pub kind: ModuleKind,
    pub props: &'a mut Properties,
    pub diagnostics: &'a mut Diagnostics,
}

/// The fixed capability set every aspect exposes.
pub trait AspectHooks {
    fn name(&self) -> &'static str;

    /// Declaration checks and property normalization, once per module.
    fn init(&mut self, _ctx: &mut InitContext<'_>) {}

    /// Dependencies contributed by this aspect.
    fn deps(&self, _props: &Properties, _out: &mut Vec<DepDecl>) {}
}

#[derive(Clone, Debug)]
pub enum Aspect {
    Compiler(Compiler),
    Linker(Linker),
    Installer(Installer),
    Sanitize(Sanitize),
    Lto(Lto),
    Abi(Abi),
}

impl Aspect {
    pub fn hooks(&self) -> &dyn AspectHooks {
        match self {
            Self::Compiler(a) => a,
            Self::Linker(a) => a,
            Self::Installer(a) => a,
            Self::Sanitize(a) => a,
            Self::Lto(a) => a,
            Self::Abi(a) => a,
        }
    }

    pub fn hooks_mut(&mut self) -> &mut dyn AspectHooks {
        match self {
            Self::Compiler(a) => a,
            Self::Linker(a) => a,
            Self::Installer(a) => a,
            Self::Sanitize(a) => a,
            Self::Lto(a) => a,
            Self::Abi(a) => a,
        }
    }
}

/// Aspect list for a module kind.
pub fn aspects_for(kind: ModuleKind) -> Vec<Aspect> {
    let compiler = Aspect::Compiler(Compiler::default());
    let linker = Aspect::Linker(Linker::default());
    let installer = Aspect::Installer(Installer::default());
    let sanitize = Aspect::Sanitize(Sanitize::default());
    let lto = Aspect::Lto(Lto::default());

    match kind {
        ModuleKind::CcLibrary | ModuleKind::CcLibraryStatic | ModuleKind::CcLibraryShared => {
            let abi = Aspect::Abi(Abi::default());
            vec![compiler, linker, installer, sanitize, lto, abi]
        }
        ModuleKind::CcBinary => vec![compiler, linker, installer, sanitize, lto],
        ModuleKind::CcObject => vec![compiler, linker],
        ModuleKind::CcLibraryHeaders => vec![compiler],
    }
}

macro_rules! accessor {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self) -> Option<&$ty> {
            self.aspects.iter().find_map(|a| match a {
                Aspect::$variant(x) => Some(x),
                _ => None,
            })
        }

        pub fn $get_mut(&mut self) -> Option<&mut $ty> {
            self.aspects.iter_mut().find_map(|a| match a {
                Aspect::$variant(x) => Some(x),
                _ => None,
            })
        }
    };
}

impl Variant {
    accessor!(compiler, compiler_mut, Compiler, Compiler);
    accessor!(linker, linker_mut, Linker, Linker);
    accessor!(installer, installer_mut, Installer, Installer);
    accessor!(sanitize, sanitize_mut, Sanitize, Sanitize);
    accessor!(lto, lto_mut, Lto, Lto);
    accessor!(abi, abi_mut, Abi, Abi);

    pub fn aspect_names(&self) -> Vec<&'static str> {
        self.aspects.iter().map(|a| a.hooks().name()).collect()
    }
}
