use fanout_core::{ModuleKind, Properties, Variation};

use super::{AbiClass, Compiler, aspects_for};
use crate::graph::Variant;

fn variant(kind: ModuleKind) -> Variant {
    Variant {
        variation: Variation::new(),
        props: Properties::default(),
        edges: Vec::new(),
        aspects: aspects_for(kind),
        dependency_variation: Variation::new(),
        in_vendor: false,
    }
}

#[test]
fn abi_matrix() {
    use AbiClass::*;

    let allowed = [
        (Llndk, vec![Llndk]),
        (VndkSp, vec![Llndk, VndkSp]),
        (Vndk, vec![Llndk, VndkSp, Vndk]),
        (VendorAvailable, vec![Llndk, VndkSp, Vndk, VendorAvailable]),
        (VendorOnly, AbiClass::ALL.to_vec()),
    ];

    for (from, targets) in allowed {
        for to in AbiClass::ALL {
            assert_eq!(
                from.may_depend_on(to),
                targets.contains(&to),
                "{from} -> {to}"
            );
        }
    }
}

#[test]
fn classify_by_declaration() {
    let mut props = Properties::default();
    assert_eq!(AbiClass::classify(&props), AbiClass::VendorOnly);

    props.vendor_available = true;
    assert_eq!(AbiClass::classify(&props), AbiClass::VendorAvailable);

    props.vndk.enabled = true;
    assert_eq!(AbiClass::classify(&props), AbiClass::Vndk);

    props.vndk.support_system_process = true;
    assert_eq!(AbiClass::classify(&props), AbiClass::VndkSp);

    props.llndk = true;
    assert_eq!(AbiClass::classify(&props), AbiClass::Llndk);
}

#[test]
fn registry_names() {
    let names: Vec<&str> = AbiClass::ALL.iter().map(|c| c.registry()).collect();
    assert_eq!(
        names,
        [
            "llndk_libraries",
            "vndk_sp_libraries",
            "vndk_core_libraries",
            "vendor_available_libraries",
            "vendor_only_libraries",
        ]
    );
}

#[test]
fn vendor_sources_spliced_before_compile() {
    let mut props = Properties {
        srcs: vec!["a.c".into(), "b.c".into()],
        ..Properties::default()
    };
    props.target.vendor.srcs = vec!["v.c".into()];
    props.target.vendor.exclude_srcs = vec!["b.c".into()];

    Compiler::apply_vendor_sources(&mut props);

    assert_eq!(props.srcs, ["a.c", "v.c"]);
    assert!(props.target.vendor.is_empty());
}

#[test]
fn accessors_find_owned_state() {
    let mut lib = variant(ModuleKind::CcLibraryShared);
    assert!(lib.abi().is_some());
    assert!(!lib.is_hidden());

    lib.installer_mut().unwrap().hidden = true;
    assert!(lib.is_hidden());

    let app = variant(ModuleKind::CcBinary);
    assert!(app.abi().is_none());
    assert!(app.sanitize().is_some());

    let hdr = variant(ModuleKind::CcLibraryHeaders);
    assert!(hdr.installer().is_none());
    assert!(!hdr.is_hidden());
}
