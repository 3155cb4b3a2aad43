//! Test-only dump methods for build inspection.
