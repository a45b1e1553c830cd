//! `dialoguer`-backed `Console`: the real, interactive implementation the
//! binary drives the traversal with when `SAVANT_BRIDGE_PROMPT` permits it.
//! Grounded on this codebase's own `dialoguer::Select` prompt in
//! `kargo-toolchain::sdk::jdk`, generalized from a fixed-choice selector to
//! a free-text question with a default and a retry-on-invalid loop.

use bridge_util::console::Console;
use bridge_util::errors::BridgeError;
use dialoguer::Input;

pub struct StdioConsole;

impl Console for StdioConsole {
    fn interactive(&self) -> bool {
        true
    }

    fn ask(
        &self,
        question: &str,
        default: &str,
        validator: &dyn Fn(&str) -> bool,
    ) -> miette::Result<String> {
        loop {
            let answer: String = Input::new()
                .with_prompt(question)
                .default(default.to_string())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| BridgeError::io_failure(format!("prompt failed: {e}")))?;
            let candidate = if answer.trim().is_empty() {
                default.to_string()
            } else {
                answer
            };
            if validator(&candidate) {
                return Ok(candidate);
            }
        }
    }
}
