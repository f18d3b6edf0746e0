//! Variants command implementation
//!
//! Lists the known build variants with their exposed port and candidate
//! layout, in probe order.

use clap::Args;
use console::style;
use entrypoint_core::BuildVariant;

/// Arguments for the variants command
#[derive(Args, Debug, Default)]
pub struct VariantsArgs {}

pub fn cmd_variants(_args: &VariantsArgs, active: BuildVariant) {
    for line in variant_lines(active) {
        println!("{line}");
    }
}

fn variant_lines(active: BuildVariant) -> Vec<String> {
    let mut lines = Vec::new();
    for variant in BuildVariant::ALL {
        let marker = if variant == active { "*" } else { " " };
        lines.push(format!(
            "{marker} {} {}",
            style(variant.name()).bold(),
            style(format!("(exposes {})", variant.exposed_port())).dim()
        ));
        for (rank, path) in variant.candidates().iter().enumerate() {
            lines.push(format!("    {}. {path}", rank + 1));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_variant_is_marked() {
        let lines = variant_lines(BuildVariant::Grpc);
        let grpc = lines.iter().find(|l| l.contains("grpc")).unwrap();
        let http = lines.iter().find(|l| l.contains("http")).unwrap();
        assert!(grpc.starts_with('*'));
        assert!(http.starts_with(' '));
        assert!(grpc.contains("50051"));
    }

    #[test]
    fn every_candidate_is_listed() {
        let lines = variant_lines(BuildVariant::Http);
        let candidates = lines.iter().filter(|l| l.ends_with("run_server.py")).count();
        assert_eq!(candidates, 6);
    }
}
