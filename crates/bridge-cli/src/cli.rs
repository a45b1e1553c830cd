//! CLI argument definitions. A single flat command, unlike this codebase's
//! other binaries' subcommand surfaces — the bridge does one thing per
//! invocation — but built with the same `clap` derive style.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bridge",
    version,
    about = "Imports a Maven dependency tree into a Savant repository"
)]
pub struct Cli {
    /// The cache root / Savant repository directory. Created if missing.
    pub directory: String,

    /// Root coordinate to import (group:id:version). Prompted for
    /// interactively when omitted and prompts are enabled.
    pub coordinate: Option<String>,

    /// Verbose logging: POM contents, download URLs, and generated AMD XML.
    #[arg(long)]
    pub debug: bool,

    /// Include dependencies declared with `<scope>test</scope>`.
    #[arg(long)]
    pub include_test: bool,

    /// Include dependencies declared with `<optional>true</optional>`.
    #[arg(long)]
    pub include_optional: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directory_and_coordinate() {
        let cli = Cli::parse_from(["bridge", "./repo", "com.example:widget:1.0.0"]);
        assert_eq!(cli.directory, "./repo");
        assert_eq!(cli.coordinate.as_deref(), Some("com.example:widget:1.0.0"));
        assert!(!cli.debug);
    }

    #[test]
    fn flags_default_to_false() {
        let cli = Cli::parse_from(["bridge", "./repo"]);
        assert!(cli.coordinate.is_none());
        assert!(!cli.include_test);
        assert!(!cli.include_optional);
    }

    #[test]
    fn include_flags_parse() {
        let cli = Cli::parse_from(["bridge", "--include-test", "--include-optional", "./repo"]);
        assert!(cli.include_test);
        assert!(cli.include_optional);
    }
}
