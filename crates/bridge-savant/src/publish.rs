//! `PublishWorkflow.publish`, the external collaborator invoked in
//! `downloadAndProcess` step 5. This codebase's own `kargo-maven::publish`
//! is an unfinished stub ("Phase 8 feature"); this is the finished,
//! concrete counterpart the bridge actually runs against — a filesystem
//! publish into the same `FsCache` root.

use std::path::Path;

use bridge_util::errors::BridgeError;

use crate::amd::{self, Amd};
use crate::artifact::SavantArtifact;

pub struct Publication<'a> {
    pub savant_artifact: &'a SavantArtifact,
    pub amd: &'a Amd,
    pub main_file: &'a Path,
    pub sources_file: Option<&'a Path>,
}

/// Narrow interface the core consumes.
pub trait PublishWorkflow {
    fn publish(&self, publication: Publication<'_>) -> miette::Result<()>;
}

/// Writes the main file, the optional sources file, and the serialized AMD
/// document into the cache root, named after the Savant artifact's file
/// name (the same name `Cache::fetch` pre-checks against).
pub struct FsPublishWorkflow {
    root: std::path::PathBuf,
}

impl FsPublishWorkflow {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PublishWorkflow for FsPublishWorkflow {
    fn publish(&self, publication: Publication<'_>) -> miette::Result<()> {
        std::fs::create_dir_all(&self.root).map_err(BridgeError::Io)?;

        let main_name = publication.savant_artifact.file_name();
        std::fs::copy(publication.main_file, self.root.join(&main_name)).map_err(BridgeError::Io)?;

        if let Some(sources) = publication.sources_file {
            let sources_name = publication.savant_artifact.sources_file_name();
            std::fs::copy(sources, self.root.join(sources_name)).map_err(BridgeError::Io)?;
        }

        let amd_xml = amd::to_xml(publication.amd)?;
        let amd_name = format!("{main_name}.amd.xml");
        std::fs::write(self.root.join(amd_name), amd_xml).map_err(BridgeError::Io)?;

        tracing::info!(artifact = %main_name, "published");
        Ok(())
    }
}
