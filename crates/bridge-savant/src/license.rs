//! The `License.parse` external interface: validates an SPDX short
//! identifier's shape. SPEC_FULL.md treats full SPDX registry membership as
//! a service the core calls through; this crate validates the identifier
//! grammar (letters, digits, `.`, `-`, `+`) rather than embedding a full
//! SPDX license list, consistent with keeping the registry itself external.

use std::sync::OnceLock;

use bridge_util::errors::BridgeError;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License(pub String);

fn spdx_shape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.+-]*$").expect("valid regex"))
}

impl License {
    pub fn parse(spdx_id: &str) -> miette::Result<Self> {
        let trimmed = spdx_id.trim();
        if trimmed.is_empty() || !spdx_shape_regex().is_match(trimmed) {
            return Err(BridgeError::resolution(format!(
                "'{spdx_id}' is not a valid SPDX license identifier"
            ))
            .into());
        }
        Ok(License(trimmed.to_string()))
    }
}

/// Parse a comma-separated list of SPDX identifiers, per C4's license
/// prompt ("comma-separated list of SPDX identifiers").
pub fn parse_list(input: &str) -> miette::Result<Vec<License>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(License::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_apache() {
        assert_eq!(License::parse("Apache-2.0").unwrap().0, "Apache-2.0");
    }

    #[test]
    fn rejects_empty() {
        assert!(License::parse("").is_err());
    }

    #[test]
    fn parses_comma_separated_list() {
        let licenses = parse_list("MIT, Apache-2.0").unwrap();
        assert_eq!(licenses.len(), 2);
        assert_eq!(licenses[1].0, "Apache-2.0");
    }
}
