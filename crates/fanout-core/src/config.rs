//! Run configuration.

use std::fmt;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::decl::SanitizerKind;

const DEFAULT_JOBS: usize = 1;

/// Settings that shape the fan-out, independent of any one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Target architectures, primary first. Each arch at most once.
    #[serde(deserialize_with = "unique_arches")]
    pub target_arches: Vec<Arch>,
    /// Worker count for parallel-safe passes. `1` runs everything inline.
    pub jobs: usize,
    /// When false, the image split only produces `core` variants.
    pub enable_vendor_image: bool,
    /// Runtime library module linked into visible sanitized binaries and
    /// shared libraries.
    pub sanitizer_runtimes: IndexMap<SanitizerKind, String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            target_arches: vec![Arch::Arm64, Arch::Arm],
            jobs: DEFAULT_JOBS,
            enable_vendor_image: true,
            sanitizer_runtimes: IndexMap::new(),
        }
    }
}

fn unique_arches<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Arch>, D::Error> {
    let arches = Vec::<Arch>::deserialize(deserializer)?;
    for (i, arch) in arches.iter().enumerate() {
        if arches[..i].contains(arch) {
            return Err(D::Error::custom(format!("duplicate target arch `{arch}`")));
        }
    }
    Ok(arches)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Arm,
    Arm64,
    X86,
    X86_64,
    Riscv64,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Riscv64 => "riscv64",
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Arm | Self::X86 => 32,
            Self::Arm64 | Self::X86_64 | Self::Riscv64 => 64,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "arm" => Some(Self::Arm),
            "arm64" => Some(Self::Arm64),
            "x86" => Some(Self::X86),
            "x86_64" => Some(Self::X86_64),
            "riscv64" => Some(Self::Riscv64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `compile_multilib`: which of the configured arches a module builds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multilib {
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "first")]
    First,
    #[serde(rename = "32")]
    Lib32,
    #[serde(rename = "64")]
    Lib64,
}

impl Multilib {
    /// Select arches from the configured list, preserving its order.
    /// Repeated arches are selected once.
    pub fn select(self, arches: &[Arch]) -> Vec<Arch> {
        let mut selected: Vec<Arch> = Vec::new();
        for &arch in arches {
            let wanted = match self {
                Self::Both | Self::First => true,
                Self::Lib32 => arch.bits() == 32,
                Self::Lib64 => arch.bits() == 64,
            };
            if wanted && !selected.contains(&arch) {
                selected.push(arch);
            }
            if self == Self::First && !selected.is_empty() {
                break;
            }
        }
        selected
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::First => "first",
            Self::Lib32 => "32",
            Self::Lib64 => "64",
        }
    }
}
