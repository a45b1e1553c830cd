//! C4 Coordinate Mapper: turns a resolved Maven coordinate into a
//! `SavantArtifact`, per SPEC_FULL.md §4.4. Group, version, and license are
//! each resolved independently through the injected `Console`, which is
//! what makes this testable with `ScriptedConsole` without a real terminal.

use bridge_util::console::Console;
use bridge_util::errors::BridgeError;

use crate::artifact::{build_artifact_id, SavantArtifact};
use crate::cache::Cache;
use crate::group_mappings::GroupMappings;
use crate::license::{self, License};
use crate::license_cache::LicenseCache;
use crate::version::{self, SemanticVersion};

/// Everything C4 needs from a resolved Maven dependency; deliberately a
/// flat struct rather than a dependency on `bridge-maven::MavenCoord` so this
/// crate's public surface doesn't leak the caller's internal shape.
pub struct MapperInput<'a> {
    pub group: &'a str,
    pub id: &'a str,
    pub version: &'a str,
    pub classifier: Option<&'a str>,
    pub r#type: Option<&'a str>,
}

/// Maps one Maven coordinate to a `SavantArtifact`. Group and version are
/// resolved first so the would-be artifact file name can be pre-checked
/// against `cache`; a hit skips the license prompt entirely, per "license
/// lookup is skipped when the Savant artifact file already exists".
pub fn map_coordinate(
    input: MapperInput<'_>,
    group_mappings: &mut GroupMappings,
    license_cache: &mut LicenseCache,
    console: &dyn Console,
    cache: &dyn Cache,
) -> miette::Result<SavantArtifact> {
    let savant_group = resolve_group(input.group, group_mappings, console)?;
    let savant_version = resolve_version(input.version, console)?;
    let version = SemanticVersion::parse(&savant_version)?;
    let id = build_artifact_id(&savant_group, input.id, input.classifier, input.r#type);

    let provisional = SavantArtifact {
        id: id.clone(),
        version: version.clone(),
        licenses: Vec::new(),
    };
    let already_cached = cache.fetch(&provisional.file_name()).is_some();

    let licenses = if already_cached {
        Vec::new()
    } else {
        resolve_licenses(input.group, input.id, license_cache, console)?
    };

    Ok(SavantArtifact { id, version, licenses })
}

/// §4.4 step 1: a stored, non-identity mapping wins; otherwise a group that
/// already contains a `.` is used unchanged; otherwise prompt, persisting a
/// non-identity answer.
fn resolve_group(
    group: &str,
    group_mappings: &mut GroupMappings,
    console: &dyn Console,
) -> miette::Result<String> {
    if let Some(mapped) = group_mappings.get(group) {
        return Ok(mapped.to_string());
    }
    if group.contains('.') {
        return Ok(group.to_string());
    }

    let question =
        format!("That group looks weaksauce: '{group}'. Enter the group to use with Savant");
    let answer = console.ask(&question, group, &|s| !s.trim().is_empty())?;
    if answer != group {
        group_mappings.insert(group, answer.clone());
    }
    Ok(answer)
}

/// §4.4 step 2: a strict-semver version is kept once the console confirms it
/// (a `SilentConsole` confirms automatically by answering its own default);
/// anything else loops on a replacement prompt until one matches. A
/// non-interactive console can never produce a different answer than its
/// default, so a non-strict-semver version is a `ResolutionError` there
/// rather than an infinite loop (§7).
fn resolve_version(version: &str, console: &dyn Console) -> miette::Result<String> {
    if version::is_strict_semver(version) {
        let question = format!("Version '{version}' looks like a semantic version. Keep it?");
        if console.confirm(&question, true)? {
            return Ok(version.to_string());
        }
    }

    if !console.interactive() {
        return Err(BridgeError::resolution(format!(
            "'{version}' is not a semantic version and prompts are disabled"
        ))
        .into());
    }

    let mut candidate = version.to_string();
    loop {
        candidate = console.ask(
            &format!("Enter a semantic version for '{version}' (MAJOR[.MINOR[.PATCH]])"),
            &candidate,
            &|_| true,
        )?;
        if version::is_strict_semver(&candidate) {
            return Ok(candidate);
        }
    }
}

/// §4.4 step 3: cache lookup by `"group:id"`, else prompt for a
/// comma-separated SPDX list (default `Apache-2.0`), retrying until the
/// whole list parses, then populate the cache.
fn resolve_licenses(
    group: &str,
    id: &str,
    license_cache: &mut LicenseCache,
    console: &dyn Console,
) -> miette::Result<Vec<License>> {
    if let Some(cached) = license_cache.get(group, id) {
        return Ok(cached.clone());
    }

    loop {
        let answer = console.ask(
            &format!("Enter SPDX license identifiers for {group}:{id} (comma-separated)"),
            "Apache-2.0",
            &|_| true,
        )?;
        if let Ok(licenses) = license::parse_list(&answer) {
            license_cache.insert(group, id, licenses.clone());
            return Ok(licenses);
        }
        tracing::warn!(input = %answer, "rejected license list, reprompting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FsCache;
    use bridge_util::console::{ScriptedConsole, SilentConsole};

    #[test]
    fn keeps_dotted_group_unchanged_without_prompting() {
        let console = ScriptedConsole::new(Vec::<String>::new());
        let mut mappings = GroupMappings::default();
        let mut licenses = LicenseCache::default();
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let artifact = map_coordinate(
            MapperInput {
                group: "com.example",
                id: "widget",
                version: "1.2.3",
                classifier: None,
                r#type: None,
            },
            &mut mappings,
            &mut licenses,
            &console,
            &cache,
        )
        .unwrap();
        assert_eq!(artifact.id.group, "com.example");
        assert_eq!(artifact.version.to_string(), "1.2.3");
        assert_eq!(artifact.licenses[0].0, "Apache-2.0");
    }

    #[test]
    fn prompts_and_persists_a_weaksauce_group() {
        let console = ScriptedConsole::new(["com.mapped", "y", "MIT"]);
        let mut mappings = GroupMappings::default();
        let mut licenses = LicenseCache::default();
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let artifact = map_coordinate(
            MapperInput {
                group: "weaksauce",
                id: "widget",
                version: "1.0.0",
                classifier: None,
                r#type: None,
            },
            &mut mappings,
            &mut licenses,
            &console,
            &cache,
        )
        .unwrap();
        assert_eq!(artifact.id.group, "com.mapped");
        assert_eq!(mappings.get("weaksauce"), Some("com.mapped"));
        assert_eq!(artifact.licenses[0].0, "MIT");
    }

    #[test]
    fn loops_until_a_valid_version_is_entered() {
        let console = ScriptedConsole::new(["not-a-version", "2.0.0", "MIT"]);
        let mut mappings = GroupMappings::default();
        let mut licenses = LicenseCache::default();
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let artifact = map_coordinate(
            MapperInput {
                group: "com.example",
                id: "widget",
                version: "3.0.GA.1",
                classifier: None,
                r#type: None,
            },
            &mut mappings,
            &mut licenses,
            &console,
            &cache,
        )
        .unwrap();
        assert_eq!(artifact.version.to_string(), "2.0.0");
    }

    #[test]
    fn non_semver_version_fails_fast_under_silent_console() {
        let console = SilentConsole;
        let mut mappings = GroupMappings::default();
        let mut licenses = LicenseCache::default();
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let result = map_coordinate(
            MapperInput {
                group: "org.legacy",
                id: "thing",
                version: "3.0.GA.1",
                classifier: None,
                r#type: None,
            },
            &mut mappings,
            &mut licenses,
            &console,
            &cache,
        );
        assert!(result.is_err());
    }

    #[test]
    fn cached_artifact_skips_license_lookup() {
        let console = ScriptedConsole::new(Vec::<String>::new());
        let mut mappings = GroupMappings::default();
        let mut licenses = LicenseCache::default();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("widget-1.0.0.jar"), b"bytes").unwrap();
        let cache = FsCache::new(dir.path());
        let artifact = map_coordinate(
            MapperInput {
                group: "com.example",
                id: "widget",
                version: "1.0.0",
                classifier: None,
                r#type: None,
            },
            &mut mappings,
            &mut licenses,
            &console,
            &cache,
        )
        .unwrap();
        assert!(artifact.licenses.is_empty());
    }

    #[test]
    fn reuses_cached_license_without_prompting() {
        let console = ScriptedConsole::new(Vec::<String>::new());
        let mut mappings = GroupMappings::default();
        let mut licenses = LicenseCache::default();
        licenses.insert("com.example", "widget", vec![License("BSD-3-Clause".to_string())]);
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let artifact = map_coordinate(
            MapperInput {
                group: "com.example",
                id: "widget",
                version: "1.0.0",
                classifier: None,
                r#type: None,
            },
            &mut mappings,
            &mut licenses,
            &console,
            &cache,
        )
        .unwrap();
        assert_eq!(artifact.licenses[0].0, "BSD-3-Clause");
    }
}
