//! Process-wide `Config`, sampled once at startup per SPEC_FULL.md §9.1 —
//! `SAVANT_BRIDGE_PROMPT` is read here and nowhere else in the codebase.

use bridge_graph::GraphConfig;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub prompts_enabled: bool,
    pub graph: GraphConfig,
}

impl Config {
    pub fn sample(include_test: bool, include_optional: bool) -> Self {
        let prompts_enabled = match std::env::var("SAVANT_BRIDGE_PROMPT") {
            Ok(value) => value.eq_ignore_ascii_case("true"),
            Err(_) => true,
        };
        Self {
            prompts_enabled,
            graph: GraphConfig {
                include_test_dependencies: include_test,
                include_optional_dependencies: include_optional,
            },
        }
    }
}
