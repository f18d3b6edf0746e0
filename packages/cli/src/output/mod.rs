//! Output utilities for CLI commands
//!
//! Terminal output helpers: styled error rendering, the operator diagnostic
//! report printed when nothing resolves, and color utilities. Everything here
//! writes to stderr except the `check` summary.

pub mod colors;
pub mod diagnostics;
pub mod errors;

pub use colors::{outcome_style, source_label};
pub use diagnostics::{format_port, print_not_found_report};
pub use errors::{format_resolve_error, show_config_error, show_resolve_error};
