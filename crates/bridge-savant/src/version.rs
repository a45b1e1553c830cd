//! The `SemanticVersion::parse` external interface and C4's strict
//! semantic-version grammar check, per SPEC_FULL.md §4.4 and §6. Distinct
//! from this codebase's Maven-range version comparator (`kargo-resolver`'s
//! `version.rs`), which solves a different problem (range containment);
//! here we only need parse + a stricter pre-acceptance regex.

use std::fmt;
use std::sync::OnceLock;

use bridge_util::errors::BridgeError;
use regex::Regex;

/// `MAJOR.[MINOR].[PATCH][-PRERELEASE][+BUILD]`, no leading zeros unless the
/// segment itself is `0`.
fn strict_semver_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(0|[1-9]\d*)(\.(0|[1-9]\d*))?(\.(0|[1-9]\d*))?(-[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?(\+[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?$",
        )
        .expect("valid regex")
    })
}

/// True when `input` matches the strict grammar C4 requires before
/// accepting a version without prompting.
pub fn is_strict_semver(input: &str) -> bool {
    strict_semver_regex().is_match(input)
}

/// Thin wrapper over `semver::Version` backing the `SemanticVersion.parse`
/// external interface. Versions missing a minor/patch segment (permitted by
/// the strict grammar above) are zero-filled before delegating to `semver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion(pub semver::Version);

impl SemanticVersion {
    pub fn parse(input: &str) -> miette::Result<Self> {
        let normalized = normalize_for_semver(input);
        semver::Version::parse(&normalized)
            .map(SemanticVersion)
            .map_err(|e| {
                BridgeError::validation(format!("'{input}' is not a valid semantic version: {e}"))
                    .into()
            })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn normalize_for_semver(input: &str) -> String {
    let (core, rest) = match input.find(['-', '+']) {
        Some(idx) => (&input[..idx], &input[idx..]),
        None => (input, ""),
    };
    let mut parts: Vec<&str> = core.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    format!("{}{}", parts.join("."), rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_semver() {
        assert!(is_strict_semver("1.2.3"));
        assert!(is_strict_semver("1.2.3-rc.1"));
        assert!(is_strict_semver("1.2.3+build.7"));
    }

    #[test]
    fn accepts_partial_segments() {
        assert!(is_strict_semver("1"));
        assert!(is_strict_semver("1.2"));
        assert!(is_strict_semver("0.0.1"));
    }

    #[test]
    fn rejects_leading_zeros() {
        assert!(!is_strict_semver("01.2.3"));
        assert!(!is_strict_semver("1.02.3"));
    }

    #[test]
    fn rejects_non_semver_legacy_maven_version() {
        assert!(!is_strict_semver("3.0.GA.1"));
    }

    #[test]
    fn parse_zero_fills_partial_version() {
        let v = SemanticVersion::parse("1.2").unwrap();
        assert_eq!(v.to_string(), "1.2.0");
    }
}
