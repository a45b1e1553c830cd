use std::collections::VecDeque;
use std::sync::Mutex;

/// A prompt as a pure function over an injected interface, per the Design
/// Notes: `(question, default, validator) -> answer`. Non-interactive
/// implementations answer `default` immediately; interactive ones re-issue
/// the question until `validator` accepts the trimmed line (or the line is
/// empty, in which case `default` is substituted before validation).
pub trait Console: Send + Sync {
    fn interactive(&self) -> bool;

    fn ask(&self, question: &str, default: &str, validator: &dyn Fn(&str) -> bool)
        -> miette::Result<String>;

    /// Convenience built on [`Console::ask`]: a yes/no prompt defaulting to
    /// `default_yes`, accepting an empty answer, `y`/`yes`, or `n`/`no`.
    fn confirm(&self, question: &str, default_yes: bool) -> miette::Result<bool> {
        let default = if default_yes { "y" } else { "n" };
        let prompt = format!("{question} [{default}]");
        let answer = self.ask(&prompt, default, &|s| {
            matches!(s.to_lowercase().as_str(), "y" | "yes" | "n" | "no")
        })?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}

/// A non-interactive `Console` that always answers the supplied default,
/// used when `SAVANT_BRIDGE_PROMPT` disables prompting.
pub struct SilentConsole;

impl Console for SilentConsole {
    fn interactive(&self) -> bool {
        false
    }

    fn ask(
        &self,
        _question: &str,
        default: &str,
        _validator: &dyn Fn(&str) -> bool,
    ) -> miette::Result<String> {
        Ok(default.to_string())
    }
}

/// A scripted `Console` for deterministic tests: answers are consumed in
/// order, falling back to `default` once the script is exhausted.
pub struct ScriptedConsole {
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedConsole {
    pub fn new(answers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
        }
    }
}

impl Console for ScriptedConsole {
    fn interactive(&self) -> bool {
        true
    }

    fn ask(
        &self,
        _question: &str,
        default: &str,
        validator: &dyn Fn(&str) -> bool,
    ) -> miette::Result<String> {
        loop {
            let next = self.answers.lock().unwrap().pop_front();
            let candidate = match next {
                Some(line) if line.is_empty() => default.to_string(),
                Some(line) => line,
                None => return Ok(default.to_string()),
            };
            if validator(&candidate) {
                return Ok(candidate);
            }
        }
    }
}
