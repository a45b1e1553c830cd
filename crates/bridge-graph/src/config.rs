//! The slice of the sampled `Config` (SPEC_FULL.md §9.1) the traversal
//! itself needs; the CLI's environment/flag sampling lives in `bridge-cli`.

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphConfig {
    pub include_test_dependencies: bool,
    pub include_optional_dependencies: bool,
}
