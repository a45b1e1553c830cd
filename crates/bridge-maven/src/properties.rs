//! C3 Property Resolver: parent-chain property merge, bounded-iteration
//! `${key}` substitution, and dependency field enrichment. Grounded on this
//! codebase's `properties.rs`/`pom.rs` interpolation idiom, generalized to
//! the parent-merge and enrichment rules of SPEC_FULL.md §4.3.

use bridge_util::console::Console;
use bridge_util::errors::BridgeError;

use crate::pom::{Pom, PomDependency};

/// Recommended bound from SPEC_FULL.md §4.3/§9: substitution MAY iterate to
/// a fixed point but MUST stop after this many passes.
pub const MAX_SUBSTITUTION_PASSES: usize = 10;

/// Merge a parent's property map into a child's using `putIfAbsent`
/// semantics, also inserting the `parent.k` and `project.parent.k` aliases
/// (invariant 5).
pub fn merge_parent_properties(
    child_props: &mut std::collections::BTreeMap<String, String>,
    parent_props: &std::collections::BTreeMap<String, String>,
) {
    for (k, v) in parent_props {
        child_props.entry(k.clone()).or_insert_with(|| v.clone());
        child_props
            .entry(format!("parent.{k}"))
            .or_insert_with(|| v.clone());
        child_props
            .entry(format!("project.parent.{k}"))
            .or_insert_with(|| v.clone());
    }
}

/// `replace(value, props)`, bounded-iteration variant: repeats the one-pass
/// substitution in [`Pom::resolve_one`] until it reaches a fixed point or
/// [`MAX_SUBSTITUTION_PASSES`] is hit, per the fixed-point note in §8 and
/// the "MUST bound iteration" requirement in §4.3.
pub fn substitute(pom: &Pom, value: &str) -> String {
    let mut result = value.to_string();
    for _ in 0..MAX_SUBSTITUTION_PASSES {
        let next = pom.resolve_one(&result);
        if next == result {
            break;
        }
        result = next;
    }
    result
}

/// Apply substitution to every nullable field, then fill `version`/`scope`/
/// `optional` from `dependencyManagement` (recursing into `parent`), and
/// finally prompt for a still-missing `version` (§4.3's "Dependency
/// enrichment").
pub fn enrich_dependency(
    pom: &Pom,
    dep: &mut PomDependency,
    console: &dyn Console,
) -> miette::Result<()> {
    dep.group_id = substitute(pom, &dep.group_id);
    dep.artifact_id = substitute(pom, &dep.artifact_id);
    if let Some(v) = dep.version.take() {
        dep.version = Some(substitute(pom, &v));
    }
    if let Some(s) = dep.scope.take() {
        dep.scope = Some(substitute(pom, &s));
    }
    if let Some(o) = dep.optional.take() {
        dep.optional = Some(substitute(pom, &o));
    }
    if let Some(c) = dep.classifier.take() {
        dep.classifier = Some(substitute(pom, &c));
    }

    if dep.version.is_none() {
        if let Some(managed) = pom.resolve_dependency_version(&dep.group_id, &dep.artifact_id) {
            dep.version = Some(substitute(pom, &managed));
        }
    }
    if dep.version.is_none() {
        if !console.interactive() {
            return Err(BridgeError::resolution(format!(
                "no version found for {}:{}",
                dep.group_id, dep.artifact_id
            ))
            .into());
        }
        let question = format!(
            "No version found for {}:{}. Enter one",
            dep.group_id, dep.artifact_id
        );
        let answer = console.ask(&question, "", &|s| !s.trim().is_empty())?;
        if answer.trim().is_empty() {
            return Err(BridgeError::resolution(format!(
                "no version found for {}:{}",
                dep.group_id, dep.artifact_id
            ))
            .into());
        }
        dep.version = Some(answer);
    }

    if dep.scope.is_none() {
        dep.scope = pom
            .resolve_dependency_scope(&dep.group_id, &dep.artifact_id)
            .map(|s| substitute(pom, &s))
            .or_else(|| Some("compile".to_string()));
    }

    if dep.optional.is_none() {
        dep.optional = pom
            .resolve_dependency_optional(&dep.group_id, &dep.artifact_id)
            .map(|o| substitute(pom, &o));
    }

    Ok(())
}
