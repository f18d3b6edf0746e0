//! Operator diagnostics printed when no entrypoint resolves
//!
//! The report names every candidate that was probed, the port the server
//! would have received, and the first few Python files present in the image.

use console::style;
use entrypoint_core::{CandidateList, PortSource, list_python_files};
use std::path::Path;

/// Port line shared by the diagnostic report and `check`
pub fn format_port(port: &str, source: PortSource) -> String {
    match source {
        PortSource::Environment => format!("{port} (from PORT)"),
        PortSource::Default => format!("{port} (default; PORT unset)"),
    }
}

/// Build the not-found report lines
pub fn not_found_report(
    candidates: &CandidateList,
    search_root: &Path,
    limit: usize,
    port: (&str, PortSource),
) -> Vec<String> {
    let mut lines = Vec::new();

    if candidates.is_empty() {
        lines.push("Candidates checked: (none configured)".to_string());
    } else {
        lines.push("Candidates checked:".to_string());
        for candidate in candidates {
            lines.push(format!(
                "  {}. {} {}",
                candidate.rank + 1,
                candidate.path.display(),
                style("(missing)").dim()
            ));
        }
    }

    lines.push(format!("PORT: {}", format_port(port.0, port.1)));

    let files = list_python_files(search_root, limit);
    if files.is_empty() {
        lines.push(format!("No .py files found under {}", search_root.display()));
    } else {
        lines.push(format!(
            "Python files under {} (first {}):",
            search_root.display(),
            limit
        ));
        for file in files {
            lines.push(format!("  {}", file.display()));
        }
    }

    lines
}

/// Print the not-found report to stderr
pub fn print_not_found_report(
    candidates: &CandidateList,
    search_root: &Path,
    limit: usize,
    port: (&str, PortSource),
) {
    eprintln!();
    for line in not_found_report(candidates, search_root, limit, port) {
        eprintln!("  {line}");
    }
    eprintln!();
}
