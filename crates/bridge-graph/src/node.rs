//! `MavenNode`: the per-coordinate traversal record C5 builds and recurses
//! over, per SPEC_FULL.md §3's data model and §4.5's graph algorithm.

use bridge_maven::coord::MavenCoord;
use bridge_savant::artifact::SavantArtifact;

#[derive(Debug, Clone)]
pub struct MavenNode {
    pub coord: MavenCoord,
    pub scope: String,
    pub optional: bool,
    pub savant_artifact: Option<SavantArtifact>,
    pub children: Vec<MavenNode>,
}

impl MavenNode {
    pub fn new(coord: MavenCoord, scope: impl Into<String>, optional: bool) -> Self {
        Self {
            coord,
            scope: scope.into(),
            optional,
            savant_artifact: None,
            children: Vec::new(),
        }
    }

    pub fn root(coord: MavenCoord) -> Self {
        Self::new(coord, "compile", false)
    }

    /// The Savant dependency group this node is projected into, per §4.5:
    /// `scope + (optional ? "-optional" : "")`. `scope` already has that
    /// suffix baked in by the time it's stored here (see
    /// `walker::default_savant_scope` and the override prompt in
    /// `build_graph`), so this is just the stored value — applying the
    /// suffix again would double it.
    pub fn savant_group_name(&self) -> String {
        self.scope.clone()
    }
}
