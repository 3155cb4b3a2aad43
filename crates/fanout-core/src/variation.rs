//! Axis/value choices that identify one variant of a module.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known axis names. Each axis is owned by the pass of the same name.
pub mod axis {
    pub const ARCH: &str = "arch";
    pub const IMAGE: &str = "image";
    pub const LINK: &str = "link";
    pub const LTO: &str = "lto";

    pub const CORE: &str = "core";
    pub const VENDOR: &str = "vendor";
    pub const STATIC: &str = "static";
    pub const SHARED: &str = "shared";
    pub const LTO_FULL: &str = "lto-full";
    pub const LTO_THIN: &str = "lto-thin";
}

/// Ordered map from axis name to the chosen value.
///
/// Axes appear in the order the owning passes ran. An empty value is a real
/// choice (the unmodified variant of a split), distinct from the axis being
/// absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variation(IndexMap<String, String>);

impl Variation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used for pinned edge requests.
    pub fn with(mut self, axis: &str, value: &str) -> Self {
        self.set(axis, value);
        self
    }

    pub fn set(&mut self, axis: &str, value: &str) {
        self.0.insert(axis.to_owned(), value.to_owned());
    }

    pub fn get(&self, axis: &str) -> Option<&str> {
        self.0.get(axis).map(String::as_str)
    }

    pub fn has_axis(&self, axis: &str) -> bool {
        self.0.contains_key(axis)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Variant name: non-empty values joined with `_`.
    ///
    /// A module that was never split, or only split into `""` choices,
    /// has the empty name.
    pub fn name(&self) -> String {
        let parts: Vec<&str> = self
            .0
            .values()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        parts.join("_")
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (axis, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{axis}:{value:?}")?;
        }
        write!(f, "}}")
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Variation {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }
}
