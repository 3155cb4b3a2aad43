/// Diagnostic kinds grouped by error class.
///
/// Declaration order is also report order within a module when the printer
/// sorts, and groups the kinds by the stage that raises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Malformed or contradictory per-module declarations
    InvalidDeclaration,
    DuplicateModule,
    UndefinedDependency,
    UnsupportedProperty,
    UnlistedExport,
    EmptyArchSet,
    ConflictingImage,
    ConflictingSanitizers,
    IgnoredVendorProperty,

    // Edge resolution after the pipeline settles
    MissingVariant,
    AmbiguousVariant,

    // Fan-out mutator policy
    ConflictingLto,
    AbiViolation,
}

/// Error taxonomy. All classes are module-scoped and non-aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Declaration,
    GraphResolution,
    PolicyViolation,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::IgnoredVendorProperty => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingVariant | Self::AmbiguousVariant => ErrorClass::GraphResolution,
            Self::ConflictingLto | Self::AbiViolation => ErrorClass::PolicyViolation,
            _ => ErrorClass::Declaration,
        }
    }

    /// Stable short code shown in rendered output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDeclaration => "invalid-declaration",
            Self::DuplicateModule => "duplicate-module",
            Self::UndefinedDependency => "undefined-dependency",
            Self::UnsupportedProperty => "unsupported-property",
            Self::UnlistedExport => "unlisted-export",
            Self::EmptyArchSet => "empty-arch-set",
            Self::ConflictingImage => "conflicting-image",
            Self::ConflictingSanitizers => "conflicting-sanitizers",
            Self::IgnoredVendorProperty => "ignored-vendor-property",
            Self::MissingVariant => "missing-variant",
            Self::AmbiguousVariant => "ambiguous-variant",
            Self::ConflictingLto => "conflicting-lto",
            Self::AbiViolation => "abi-violation",
        }
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ConflictingImage => Some("`vendor_available` already builds a vendor variant"),
            Self::ConflictingLto => Some("pick one of `lto.full` or `lto.thin`"),
            Self::EmptyArchSet => Some("check `compile_multilib` against the configured arches"),
            _ => None,
        }
    }

    /// Base message for this kind, used when no custom detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::InvalidDeclaration => "module declaration could not be read",
            Self::DuplicateModule => "module is defined more than once",
            Self::UndefinedDependency => "depends on an undefined module",
            Self::UnsupportedProperty => "property is not supported by this module type",
            Self::UnlistedExport => "exported dependency is not a dependency",
            Self::EmptyArchSet => "module builds for no configured arch",
            Self::ConflictingImage => "`vendor` and `vendor_available` are mutually exclusive",
            Self::ConflictingSanitizers => "sanitizers are mutually exclusive",
            Self::IgnoredVendorProperty => "vendor-only property on a module without a vendor variant",
            Self::MissingVariant => "dependency has no matching variant",
            Self::AmbiguousVariant => "dependency matches several variants",
            Self::ConflictingLto => "`lto.full` and `lto.thin` are mutually exclusive",
            Self::AbiViolation => "dependency crosses a disallowed ABI boundary",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::InvalidDeclaration => "{}".to_string(),
            Self::DuplicateModule => "module `{}` is defined more than once".to_string(),
            Self::UndefinedDependency => "depends on undefined module `{}`".to_string(),
            Self::UnsupportedProperty => "`{}` is not supported by this module type".to_string(),
            Self::UnlistedExport => "`{}` is exported but not listed as a dependency".to_string(),
            Self::MissingVariant => "dependency has no matching variant: {}".to_string(),
            Self::AmbiguousVariant => "dependency matches several variants: {}".to_string(),
            Self::AbiViolation => "{}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where in the graph a diagnostic points: module, optional variant,
/// optional property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub module: String,
    pub variant: Option<String>,
    pub property: Option<String>,
}

impl Location {
    pub fn module(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            variant: None,
            property: None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "module `{}`", self.module)?;
        if let Some(variant) = &self.variant {
            write!(f, " variant `{variant}`")?;
        }
        if let Some(property) = &self.property {
            write!(f, ", property `{property}`")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) location: Location,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) location: Location,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, location: Location) -> Self {
        let mut hints = Vec::new();
        if let Some(hint) = kind.default_hint() {
            hints.push(hint.to_string());
        }
        Self {
            kind,
            location,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity(),
            self.kind.code(),
            self.location,
            self.message
        )?;
        for related in &self.related {
            write!(f, " (related: {} in {})", related.message, related.location)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
