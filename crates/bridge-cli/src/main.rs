//! `bridge` binary: imports a Maven dependency tree into a Savant
//! repository. Initializes logging via `tracing`, parses arguments with
//! `clap`, then drives the C5 graph walker — mirroring the structure of
//! this codebase's other binaries' `main.rs` (`tracing_subscriber::fmt`
//! init, `miette::Result` return type), generalized from subcommand
//! dispatch to this tool's single linear flow.

mod cli;
mod config;
mod console;

use std::path::{Path, PathBuf};

use bridge_graph::{MavenNode, WalkerContext};
use bridge_maven::coord::MavenCoord;
use bridge_maven::fetch::Fetcher;
use bridge_savant::cache::FsCache;
use bridge_savant::group_mappings::GroupMappings;
use bridge_savant::license_cache::LicenseCache;
use bridge_savant::publish::FsPublishWorkflow;
use bridge_util::console::{Console, SilentConsole};
use bridge_util::errors::BridgeError;
use miette::Result;

const GROUP_MAPPINGS_FILE: &str = "maven-group-mappings.properties";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = config::Config::sample(cli.include_test, cli.include_optional);
    let directory = bootstrap_directory(Path::new(&cli.directory))?;

    let console: Box<dyn Console> = if config.prompts_enabled {
        Box::new(console::StdioConsole)
    } else {
        Box::new(SilentConsole)
    };

    let mappings_path = directory.join(GROUP_MAPPINGS_FILE);
    let mut group_mappings = GroupMappings::load(&mappings_path)?;
    let mut license_cache = LicenseCache::default();

    let root_coord = resolve_root_coordinate(cli.coordinate.as_deref(), console.as_ref())?;
    let mut root = MavenNode::root(root_coord);

    let fetcher = Fetcher::new()?;
    let cache = FsCache::new(&directory);
    let publisher = FsPublishWorkflow::new(&directory);

    let ctx = WalkerContext {
        fetcher: &fetcher,
        cache: &cache,
        publisher: &publisher,
        console: console.as_ref(),
        config: config.graph,
        quarantine_dir: directory.join("quarantine"),
        debug: cli.debug,
    };

    bridge_graph::import(&mut root, &ctx, &mut group_mappings, &mut license_cache).await?;

    group_mappings.save(&mappings_path)?;
    Ok(())
}

/// Creates `directory` if missing; exits (via `BridgeError::Argument`) if it
/// names an existing file, per §6's CLI contract.
fn bootstrap_directory(directory: &Path) -> Result<PathBuf> {
    if directory.is_file() {
        return Err(BridgeError::argument(format!(
            "'{}' is a file, not a directory",
            directory.display()
        ))
        .into());
    }
    std::fs::create_dir_all(directory).map_err(BridgeError::Io)?;
    Ok(directory.to_path_buf())
}

/// The root coordinate positional argument, or an interactive prompt when
/// omitted and prompts are enabled, per §6.
fn resolve_root_coordinate(arg: Option<&str>, console: &dyn Console) -> Result<MavenCoord> {
    let raw = match arg {
        Some(value) => value.to_string(),
        None => console.ask(
            "Enter the root coordinate to import (group:id:version)",
            "",
            &|s| parse_coordinate(s).is_some(),
        )?,
    };
    parse_coordinate(&raw)
        .ok_or_else(|| BridgeError::argument(format!("'{raw}' is not a group:id:version coordinate")).into())
}

fn parse_coordinate(raw: &str) -> Option<MavenCoord> {
    let mut parts = raw.splitn(3, ':');
    let group = parts.next()?.trim();
    let id = parts.next()?.trim();
    let version = parts.next()?.trim();
    if group.is_empty() || id.is_empty() || version.is_empty() {
        return None;
    }
    Some(MavenCoord::new(group, id, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_coordinate() {
        let coord = parse_coordinate("com.example:widget:1.2.3").unwrap();
        assert_eq!(coord.group, "com.example");
        assert_eq!(coord.id, "widget");
        assert_eq!(coord.version, "1.2.3");
    }

    #[test]
    fn rejects_coordinate_missing_a_segment() {
        assert!(parse_coordinate("com.example:widget").is_none());
    }

    #[test]
    fn bootstrap_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("repo");
        let created = bootstrap_directory(&target).unwrap();
        assert!(created.is_dir());
    }

    #[test]
    fn bootstrap_rejects_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("not-a-dir");
        std::fs::write(&file_path, b"x").unwrap();
        assert!(bootstrap_directory(&file_path).is_err());
    }
}
