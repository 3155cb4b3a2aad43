use fanout_core::Arch;

use crate::build::{BuildBuilder, BuildResolved};

impl BuildResolved {
    #[track_caller]
    pub fn expect(json: &str) -> Self {
        BuildBuilder::from_json(json).unwrap().load().mutate().resolve()
    }

    /// Single-arch build, which keeps variant names short in assertions.
    #[track_caller]
    pub fn expect_arm64(json: &str) -> Self {
        BuildBuilder::from_json(json)
            .unwrap()
            .with_target_arches(vec![Arch::Arm64])
            .load()
            .mutate()
            .resolve()
    }

    #[track_caller]
    pub fn expect_valid(json: &str) -> Self {
        let build = Self::expect_arm64(json);
        if !build.is_valid() {
            panic!(
                "Expected valid build, got error:\n{}",
                build.dump_diagnostics()
            );
        }

        build
    }

    #[track_caller]
    pub fn expect_invalid(json: &str) -> String {
        let build = Self::expect_arm64(json);
        if build.is_valid() {
            panic!("Expected invalid build, got valid:\n{}", build.dump_variants());
        }

        build.dump_diagnostics()
    }
}
