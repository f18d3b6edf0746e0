//! Build variants and the candidate layouts their images were packaged with
//!
//! The packaging layout drifted across revisions: the server script has lived
//! at the image root, inside `mcp_server/`, and inside `ava_bot/mcp_server/`.
//! Each variant records the order in which its recipe probed those layouts.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Port the server listens on when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8080;

/// Port exposed by the HTTP image
pub const HTTP_EXPOSED_PORT: u16 = 8080;

/// Port exposed by the gRPC image
pub const GRPC_EXPOSED_PORT: u16 = 50051;

const HTTP_CANDIDATES: &[&str] = &[
    "/app/mcp_server/run_server.py",
    "/app/ava_bot/mcp_server/run_server.py",
    "/app/run_server.py",
];

const GRPC_CANDIDATES: &[&str] = &[
    "/app/ava_bot/mcp_server/run_server.py",
    "/app/mcp_server/run_server.py",
    "/app/run_server.py",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    #[default]
    Http,
    Grpc,
}

impl BuildVariant {
    pub const ALL: [BuildVariant; 2] = [BuildVariant::Http, BuildVariant::Grpc];

    pub fn name(&self) -> &'static str {
        match self {
            BuildVariant::Http => "http",
            BuildVariant::Grpc => "grpc",
        }
    }

    /// Port declared with EXPOSE in the variant's image; informational only
    pub fn exposed_port(&self) -> u16 {
        match self {
            BuildVariant::Http => HTTP_EXPOSED_PORT,
            BuildVariant::Grpc => GRPC_EXPOSED_PORT,
        }
    }

    /// Candidate locations in probe order
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            BuildVariant::Http => HTTP_CANDIDATES,
            BuildVariant::Grpc => GRPC_CANDIDATES,
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(BuildVariant::Http),
            "grpc" => Ok(BuildVariant::Grpc),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_expose_their_ports() {
        assert_eq!(BuildVariant::Http.exposed_port(), 8080);
        assert_eq!(BuildVariant::Grpc.exposed_port(), 50051);
    }

    #[test]
    fn variant_candidates_are_absolute_and_unique() {
        for variant in BuildVariant::ALL {
            let candidates = variant.candidates();
            assert!(candidates.iter().all(|c| c.starts_with('/')));
            let mut sorted = candidates.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), candidates.len());
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("GRPC".parse::<BuildVariant>().unwrap(), BuildVariant::Grpc);
        assert_eq!(" http ".parse::<BuildVariant>().unwrap(), BuildVariant::Http);
        assert!(matches!(
            "websocket".parse::<BuildVariant>(),
            Err(ConfigError::UnknownVariant(_))
        ));
    }
}
