use std::io::Write;

use console::Style;

/// Human-facing status lines, printed to stdout per the user-visible
/// reporting design — distinct from `tracing`'s machine-oriented logging.
/// Adapted from this codebase's Cargo-style status line convention, but
/// moved to stdout (the spec requires skip/remap/warning text on stdout).
pub fn status(label: &str, message: &str) {
    let green_bold = Style::new().green().bold();
    let _ = writeln!(std::io::stdout(), "{:>12} {message}", green_bold.apply_to(label));
}

pub fn status_info(label: &str, message: &str) {
    let cyan_bold = Style::new().cyan().bold();
    let _ = writeln!(std::io::stdout(), "{:>12} {message}", cyan_bold.apply_to(label));
}

pub fn status_warn(label: &str, message: &str) {
    let yellow_bold = Style::new().yellow().bold();
    let _ = writeln!(std::io::stdout(), "{:>12} {message}", yellow_bold.apply_to(label));
}

/// The divider + "Converting Maven artifact..." banner that precedes each
/// node in the traversal.
pub fn converting(coord_display: &str) {
    println!("{}", "-".repeat(60));
    println!("Converting Maven artifact {coord_display} to a Savant Artifact");
}
