//! Declaration layer: the module set as handed over by the declaration loader.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{BuildConfig, Multilib};

/// Blueprint as read from disk, before module entries are checked one by one.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawBlueprint {
    #[serde(default)]
    pub config: Option<BuildConfig>,
    #[serde(default)]
    pub modules: Vec<Value>,
}

/// Parsed blueprint: optional config section plus module declarations.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    pub config: Option<BuildConfig>,
    pub modules: Vec<ModuleDecl>,
    /// Entries that could not be read, in declaration order.
    pub rejected: Vec<RejectedDecl>,
}

/// One declared module.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    #[serde(flatten)]
    pub props: Properties,
    /// Keys no property consumed, reported as unsupported.
    #[serde(flatten)]
    pub unknown: IndexMap<String, Value>,
}

impl ModuleDecl {
    pub fn new(name: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            props: Properties::default(),
            unknown: IndexMap::new(),
        }
    }

    /// Read the module entry at `index` of the `modules` array.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, RejectedDecl> {
        Self::deserialize(value).map_err(|e| RejectedDecl {
            position: 0,
            name: value
                .get("name")
                .and_then(Value::as_str)
                .map_or_else(|| format!("<module #{index}>"), str::to_string),
            kind: value
                .get("type")
                .and_then(|t| ModuleKind::deserialize(t).ok()),
            property: offending_property(value),
            message: e.to_string(),
        })
    }
}

/// A module entry that could not be read. It still becomes a failed module
/// so the rest of the blueprint builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDecl {
    /// Number of readable modules declared before this entry.
    pub position: usize,
    pub name: String,
    /// Declared type, when that much could be read.
    pub kind: Option<ModuleKind>,
    pub property: Option<String>,
    pub message: String,
}

/// First top-level key of a module entry that does not deserialize.
fn offending_property(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if !object.get("name").is_some_and(Value::is_string) {
        return Some("name".to_string());
    }
    match object.get("type") {
        Some(t) if ModuleKind::deserialize(t).is_ok() => {}
        _ => return Some("type".to_string()),
    }

    object
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "name" | "type"))
        .find(|(key, v)| {
            let single = Map::from_iter([((*key).clone(), (*v).clone())]);
            serde_json::from_value::<Properties>(Value::Object(single)).is_err()
        })
        .map(|(key, _)| key.clone())
}

/// Module role. Selects the module's aspect set once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    CcLibrary,
    CcLibraryStatic,
    CcLibraryShared,
    CcLibraryHeaders,
    CcBinary,
    CcObject,
}

impl ModuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CcLibrary => "cc_library",
            Self::CcLibraryStatic => "cc_library_static",
            Self::CcLibraryShared => "cc_library_shared",
            Self::CcLibraryHeaders => "cc_library_headers",
            Self::CcBinary => "cc_binary",
            Self::CcObject => "cc_object",
        }
    }

    pub fn is_library(self) -> bool {
        matches!(
            self,
            Self::CcLibrary | Self::CcLibraryStatic | Self::CcLibraryShared
        )
    }

    /// Whether the module produces a linked or archived artifact.
    pub fn links(self) -> bool {
        !matches!(self, Self::CcLibraryHeaders)
    }

    /// `link` axis values, empty for kinds without a link mode.
    pub fn link_modes(self) -> &'static [&'static str] {
        use crate::variation::axis::{SHARED, STATIC};
        match self {
            Self::CcLibrary => &[STATIC, SHARED],
            Self::CcLibraryStatic => &[STATIC],
            Self::CcLibraryShared => &[SHARED],
            _ => &[],
        }
    }

    pub fn default_multilib(self) -> Multilib {
        match self {
            Self::CcBinary => Multilib::First,
            _ => Multilib::Both,
        }
    }
}

/// The per-variant property bag. Deep-copied at every fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    pub srcs: Vec<String>,
    pub static_libs: Vec<String>,
    pub whole_static_libs: Vec<String>,
    pub shared_libs: Vec<String>,
    pub header_libs: Vec<String>,
    pub objs: Vec<String>,
    pub export_include_dirs: Vec<String>,
    pub export_static_lib_headers: Vec<String>,
    pub export_shared_lib_headers: Vec<String>,
    pub export_header_lib_headers: Vec<String>,
    pub compile_multilib: Option<Multilib>,
    pub vendor: bool,
    pub vendor_available: bool,
    pub llndk: bool,
    pub vndk: VndkProperties,
    pub sanitize: SanitizeProperties,
    pub lto: LtoProperties,
    pub target: TargetProperties,
}

impl Properties {
    /// Eligible for both the core and the vendor image.
    pub fn dual_image(&self) -> bool {
        self.vendor_available || self.vndk.enabled || self.llndk
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VndkProperties {
    pub enabled: bool,
    pub support_system_process: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizeProperties {
    pub address: Option<bool>,
    pub hwaddress: Option<bool>,
    pub thread: Option<bool>,
    pub cfi: Option<bool>,
    /// Opt out of sanitizer variants requested by dependents.
    pub never: bool,
}

impl SanitizeProperties {
    pub fn get(&self, kind: SanitizerKind) -> Option<bool> {
        match kind {
            SanitizerKind::Address => self.address,
            SanitizerKind::Hwaddress => self.hwaddress,
            SanitizerKind::Thread => self.thread,
            SanitizerKind::Cfi => self.cfi,
        }
    }

    pub fn set(&mut self, kind: SanitizerKind, value: bool) {
        let slot = match kind {
            SanitizerKind::Address => &mut self.address,
            SanitizerKind::Hwaddress => &mut self.hwaddress,
            SanitizerKind::Thread => &mut self.thread,
            SanitizerKind::Cfi => &mut self.cfi,
        };
        *slot = Some(value);
    }

    pub fn enabled(&self, kind: SanitizerKind) -> bool {
        self.get(kind).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LtoProperties {
    pub full: Option<bool>,
    pub thin: Option<bool>,
    /// Never build an LTO variant, even when a dependent asks for one.
    pub never: bool,
}

impl LtoProperties {
    pub fn is_full(&self) -> bool {
        self.full.unwrap_or(false)
    }

    pub fn is_thin(&self) -> bool {
        self.thin.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetProperties {
    pub vendor: ImageProperties,
}

/// Image-scoped source lists, spliced in by the image split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageProperties {
    pub srcs: Vec<String>,
    pub exclude_srcs: Vec<String>,
}

impl ImageProperties {
    pub fn is_empty(&self) -> bool {
        self.srcs.is_empty() && self.exclude_srcs.is_empty()
    }
}

/// Instrumentation modes that get their own variant axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SanitizerKind {
    #[serde(rename = "asan")]
    Address,
    #[serde(rename = "hwasan")]
    Hwaddress,
    #[serde(rename = "tsan")]
    Thread,
    #[serde(rename = "cfi")]
    Cfi,
}

impl SanitizerKind {
    pub const ALL: [SanitizerKind; 4] = [Self::Address, Self::Hwaddress, Self::Thread, Self::Cfi];

    /// Axis name and the non-default variation name.
    pub fn variation(self) -> &'static str {
        match self {
            Self::Address => "asan",
            Self::Hwaddress => "hwasan",
            Self::Thread => "tsan",
            Self::Cfi => "cfi",
        }
    }

    /// Property path under `sanitize`.
    pub fn property(self) -> &'static str {
        match self {
            Self::Address => "sanitize.address",
            Self::Hwaddress => "sanitize.hwaddress",
            Self::Thread => "sanitize.thread",
            Self::Cfi => "sanitize.cfi",
        }
    }
}
