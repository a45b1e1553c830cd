//! `MavenCoord`, the immutable identity used for dedup/cycle-checking
//! throughout the traversal. See SPEC_FULL.md §3 and the "Open questions"
//! note in §9 about classifier-excluded equality.

use std::fmt;
use std::hash::{Hash, Hasher};

/// `{group, id, version, type?, classifier?}`. `type` is stored as given by
/// the POM (often `None`) and only defaults to `"jar"` when rendering a
/// file name — the stored `None` is preserved so parent-resolution lookups
/// that compare raw `type` values still match.
#[derive(Debug, Clone)]
pub struct MavenCoord {
    pub group: String,
    pub id: String,
    pub version: String,
    pub r#type: Option<String>,
    pub classifier: Option<String>,
}

impl MavenCoord {
    pub fn new(group: impl Into<String>, id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            id: id.into(),
            version: version.into(),
            r#type: None,
            classifier: None,
        }
    }

    /// `type`, defaulted to `"jar"` — for file-name rendering only, per the
    /// data model's note that the stored value stays `None`.
    pub fn rendered_type(&self) -> &str {
        self.r#type.as_deref().unwrap_or("jar")
    }
}

impl fmt::Display for MavenCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

/// Equality and hashing deliberately ignore `classifier` — this is the
/// observed-behavior open question from SPEC_FULL.md §9: a graph containing
/// `a:b:1.0` and `a:b:1.0:sources` collapses to a single node. Preserved as
/// specified, not treated as a bug.
impl PartialEq for MavenCoord {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.id == other.id
            && self.r#type == other.r#type
            && self.version == other.version
    }
}

impl Eq for MavenCoord {}

impl Hash for MavenCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.id.hash(state);
        self.r#type.hash(state);
        self.version.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_classifier() {
        let a = MavenCoord::new("a", "b", "1.0");
        let mut with_classifier = MavenCoord::new("a", "b", "1.0");
        with_classifier.classifier = Some("sources".to_string());
        assert_eq!(a, with_classifier);
    }

    #[test]
    fn equality_considers_type() {
        let mut a = MavenCoord::new("a", "b", "1.0");
        let mut b = MavenCoord::new("a", "b", "1.0");
        b.r#type = Some("pom".to_string());
        assert_ne!(a, b);
        a.r#type = Some("pom".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn display_includes_classifier() {
        let mut c = MavenCoord::new("a", "b", "1.0");
        c.classifier = Some("sources".to_string());
        assert_eq!(c.to_string(), "a:b:1.0:sources");
    }
}
