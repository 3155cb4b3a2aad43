use fanout_core::SanitizerKind;
use indoc::indoc;

use crate::build::Build;

const ASAN_CHAIN: &str = indoc! {r#"
    {"modules": [
        {"name": "libb", "type": "cc_library_static"},
        {"name": "liba", "type": "cc_library", "static_libs": ["libb"]},
        {"name": "libc", "type": "cc_library_static", "sanitize": {"never": true}},
        {"name": "app", "type": "cc_binary", "static_libs": ["liba", "libc"],
         "sanitize": {"address": true}}
    ]}
"#};

#[test]
fn requested_dependencies_fan_out() {
    let build = Build::expect_valid(ASAN_CHAIN);

    insta::assert_snapshot!(build.dump_variants(), @r"
    libb (cc_library_static)
      arm64_core_static
      arm64_core_static_asan (hidden)
    liba (cc_library)
      arm64_core_static
      arm64_core_static_asan (hidden)
      arm64_core_shared
    libc (cc_library_static)
      arm64_core_static
    app (cc_binary)
      arm64_core (hidden)
      arm64_core_asan
    ");
}

#[test]
fn sanitized_variant_links_sanitized_dependencies() {
    let build = Build::expect_valid(ASAN_CHAIN);

    insta::assert_snapshot!(build.dump_link_order("app"), @r"
    app arm64_core
      all: liba/arm64_core_static/liba.a libb/arm64_core_static/libb.a libc/arm64_core_static/libc.a
      declared: liba/arm64_core_static/liba.a libc/arm64_core_static/libc.a
    app arm64_core_asan
      all: liba/arm64_core_static_asan/liba.a libb/arm64_core_static_asan/libb.a libc/arm64_core_static/libc.a
      declared: liba/arm64_core_static_asan/liba.a libc/arm64_core_static/libc.a
    ");
}

#[test]
fn split_clears_request_and_sets_flag() {
    let build = Build::expect_valid(ASAN_CHAIN);

    let libb = build.graph().module_by_name("libb").unwrap();
    let flags: Vec<(bool, bool)> = libb
        .variants()
        .iter()
        .map(|v| {
            let requested = v.sanitize().unwrap().is_requested(SanitizerKind::Address);
            (v.props.sanitize.enabled(SanitizerKind::Address), requested)
        })
        .collect();

    assert_eq!(flags, [(false, false), (true, false)]);
}

#[test]
fn address_sanitizer_disables_cfi() {
    let build = Build::expect_valid(indoc! {r#"
        {"modules": [
            {"name": "app", "type": "cc_binary", "sanitize": {"address": true, "cfi": true}}
        ]}
    "#});

    let app = build.graph().module_by_name("app").unwrap();
    let cfi: Vec<(String, bool)> = app
        .variants()
        .iter()
        .map(|v| (v.name(), v.props.sanitize.enabled(SanitizerKind::Cfi)))
        .collect();

    assert_eq!(
        cfi,
        [
            ("arm64_core".to_string(), false),
            ("arm64_core_cfi".to_string(), true),
            ("arm64_core_asan".to_string(), false),
        ]
    );
}

#[test]
fn runtime_linked_into_visible_sanitized_binary() {
    let build = Build::expect_valid(indoc! {r#"
        {"config": {"sanitizer_runtimes": {"asan": "libclang_rt.asan"}},
         "modules": [
            {"name": "libclang_rt.asan", "type": "cc_library_shared"},
            {"name": "app", "type": "cc_binary", "sanitize": {"address": true}}
        ]}
    "#});

    insta::assert_snapshot!(build.dump_deps("app"), @r"
    app arm64_core
    app arm64_core_asan
      runtime: libclang_rt.asan/arm64_core_shared/libclang_rt.asan.so
    ");
}

#[test]
fn missing_runtime_module() {
    let res = Build::expect_invalid(indoc! {r#"
        {"config": {"sanitizer_runtimes": {"asan": "libclang_rt.asan"}},
         "modules": [
            {"name": "app", "type": "cc_binary", "sanitize": {"address": true}}
        ]}
    "#});

    insta::assert_snapshot!(res, @r"
    error[undefined-dependency]: depends on undefined module `libclang_rt.asan`
      --> module `app` variant `arm64_core`, property `config.sanitizer_runtimes`
    ");
}

#[test]
fn exclusive_sanitizers() {
    let res = Build::expect_invalid(indoc! {r#"
        {"modules": [
            {"name": "app", "type": "cc_binary",
             "sanitize": {"address": true, "hwaddress": true}}
        ]}
    "#});

    insta::assert_snapshot!(res, @r"
    error[conflicting-sanitizers]: sanitizers are mutually exclusive
      --> module `app`, property `sanitize.hwaddress`
      = hint: `sanitize.address` and `sanitize.hwaddress` cannot be enabled together
    ");
}
