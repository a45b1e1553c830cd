//! `ArtifactID` / `SavantArtifact`, the output of C4 (SPEC_FULL.md §3, §4.4).

use crate::license::License;
use crate::version::SemanticVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactID {
    pub group: String,
    pub project: String,
    pub name: String,
    pub r#type: String,
}

#[derive(Debug, Clone)]
pub struct SavantArtifact {
    pub id: ArtifactID,
    pub version: SemanticVersion,
    pub licenses: Vec<License>,
}

impl SavantArtifact {
    /// `<name>-<version>.<type>`, the Savant artifact file name the cache
    /// and publish-workflow pre-checks key on.
    pub fn file_name(&self) -> String {
        format!("{}-{}.{}", self.id.name, self.version, self.id.r#type)
    }

    pub fn sources_file_name(&self) -> String {
        format!("{}-{}-sources.{}", self.id.name, self.version, self.id.r#type)
    }
}

/// Build an `ArtifactID` per §4.4's Output rule:
/// `{savantGroup, mavenId, mavenId + classifierSuffix, type ?? "jar"}`.
pub fn build_artifact_id(
    savant_group: &str,
    maven_id: &str,
    classifier: Option<&str>,
    r#type: Option<&str>,
) -> ArtifactID {
    let name = match classifier {
        Some(c) if !c.is_empty() => format!("{maven_id}-{c}"),
        _ => maven_id.to_string(),
    };
    ArtifactID {
        group: savant_group.to_string(),
        project: maven_id.to_string(),
        name,
        r#type: r#type.unwrap_or("jar").to_string(),
    }
}
