use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateModule, "libfoo")
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let msg = diagnostics.iter().next().unwrap();
    assert_eq!(msg.message(), "module is defined more than once");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedDependency, "libfoo")
        .property("static_libs")
        .message("libbar")
        .emit();

    let msg = diagnostics.iter().next().unwrap();
    assert_eq!(msg.message(), "depends on undefined module `libbar`");
    assert_eq!(msg.location().property.as_deref(), Some("static_libs"));
}

#[test]
fn warnings_do_not_count_as_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IgnoredVendorProperty, "libfoo")
        .property("target.vendor.srcs")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn error_classes() {
    assert_eq!(DiagnosticKind::EmptyArchSet.class(), ErrorClass::Declaration);
    assert_eq!(
        DiagnosticKind::MissingVariant.class(),
        ErrorClass::GraphResolution
    );
    assert_eq!(
        DiagnosticKind::AbiViolation.class(),
        ErrorClass::PolicyViolation
    );
    assert_eq!(
        DiagnosticKind::ConflictingLto.class(),
        ErrorClass::PolicyViolation
    );
}

#[test]
fn render_with_related_and_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingVariant, "app")
        .variant("arm64")
        .property("static_libs")
        .message("static -> `libfoo` {link:\"static\"}")
        .related_to("libfoo", None, "available: shared")
        .emit();
    diagnostics
        .report(DiagnosticKind::ConflictingLto, "libbar")
        .property("lto")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r#"
    error[missing-variant]: dependency has no matching variant: static -> `libfoo` {link:"static"}
      --> module `app` variant `arm64`, property `static_libs`
      note: available: shared (module `libfoo`)

    error[conflicting-lto]: `lto.full` and `lto.thin` are mutually exclusive
      --> module `libbar`, property `lto`
      = hint: pick one of `lto.full` or `lto.thin`
    "#);
}

#[test]
fn errors_only_printer_skips_warnings() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IgnoredVendorProperty, "libfoo")
        .emit();

    assert_eq!(diagnostics.printer().errors_only(true).render(), "");
}

#[test]
fn plain_display_is_single_line() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyArchSet, "libfoo")
        .property("compile_multilib")
        .message("32")
        .emit();

    let msg = diagnostics.iter().next().unwrap();
    insta::assert_snapshot!(msg.to_string(), @"error[empty-arch-set] module `libfoo`, property `compile_multilib`: module builds for no configured arch: 32 (hint: check `compile_multilib` against the configured arches)");
}
