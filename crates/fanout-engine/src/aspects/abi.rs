use std::fmt;

use fanout_core::Properties;

use super::AspectHooks;

/// ABI stability class of a vendor-image shared library.
///
/// Declaration order is the dependency matrix: a class may depend on
/// itself and on every class declared before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AbiClass {
    Llndk,
    VndkSp,
    Vndk,
    VendorAvailable,
    VendorOnly,
}

impl AbiClass {
    pub const ALL: [AbiClass; 5] = [
        Self::Llndk,
        Self::VndkSp,
        Self::Vndk,
        Self::VendorAvailable,
        Self::VendorOnly,
    ];

    pub fn classify(props: &Properties) -> Self {
        if props.llndk {
            Self::Llndk
        } else if props.vndk.enabled && props.vndk.support_system_process {
            Self::VndkSp
        } else if props.vndk.enabled {
            Self::Vndk
        } else if props.vendor_available {
            Self::VendorAvailable
        } else {
            Self::VendorOnly
        }
    }

    pub fn may_depend_on(self, target: AbiClass) -> bool {
        target <= self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Llndk => "llndk",
            Self::VndkSp => "vndk-sp",
            Self::Vndk => "vndk",
            Self::VendorAvailable => "vendor-available",
            Self::VendorOnly => "vendor-only",
        }
    }

    /// Registry list this class is recorded in.
    pub fn registry(self) -> &'static str {
        match self {
            Self::Llndk => "llndk_libraries",
            Self::VndkSp => "vndk_sp_libraries",
            Self::Vndk => "vndk_core_libraries",
            Self::VendorAvailable => "vendor_available_libraries",
            Self::VendorOnly => "vendor_only_libraries",
        }
    }
}

impl fmt::Display for AbiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Abi {
    pub class: Option<AbiClass>,
}

impl AspectHooks for Abi {
    fn name(&self) -> &'static str {
        "abi"
    }
}
