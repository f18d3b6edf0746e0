//! Color utilities for CLI output
//!
//! Provides consistent color styling for resolution outcomes and sources.

use console::{Style, StyledObject};
use entrypoint_core::ResolutionSource;

/// Style a resolution outcome label
///
/// - "found" -> green bold
/// - "not found" -> red bold
/// - "ambiguous" -> yellow bold
/// - other -> dim
pub fn outcome_style(outcome: &str) -> StyledObject<String> {
    let lowercase = outcome.to_lowercase();
    let style = match lowercase.as_str() {
        "found" => Style::new().green().bold(),
        "not found" => Style::new().red().bold(),
        "ambiguous" => Style::new().yellow().bold(),
        _ => Style::new().dim(),
    };
    style.apply_to(outcome.to_string())
}

/// Human label for how a script was found
///
/// Search hits are yellow: they work, but the image layout is not declared.
pub fn source_label(source: &ResolutionSource) -> StyledObject<String> {
    match source {
        ResolutionSource::Explicit => Style::new()
            .green()
            .apply_to("configured entrypoint".to_string()),
        ResolutionSource::Candidate { rank } => {
            Style::new().cyan().apply_to(format!("candidate #{}", rank + 1))
        }
        ResolutionSource::Search { matches } => Style::new()
            .yellow()
            .apply_to(format!("fallback search ({matches} match(es))")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_style_found() {
        let styled = outcome_style("found");
        assert_eq!(styled.to_string(), "found");
    }

    #[test]
    fn outcome_style_case_insensitive() {
        let styled = outcome_style("NOT FOUND");
        assert_eq!(styled.to_string(), "NOT FOUND");
    }

    #[test]
    fn source_label_candidate_is_one_based() {
        let styled = source_label(&ResolutionSource::Candidate { rank: 2 });
        assert_eq!(styled.to_string(), "candidate #3");
    }

    #[test]
    fn source_label_search_reports_match_count() {
        let styled = source_label(&ResolutionSource::Search { matches: 2 });
        assert!(styled.to_string().contains("2 match"));
    }
}
