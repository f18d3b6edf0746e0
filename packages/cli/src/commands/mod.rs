//! CLI command implementations
//!
//! Each command receives the fully merged configuration and returns the
//! process exit code it wants.

mod check;
mod run;
mod variants;

pub use check::{CheckArgs, cmd_check};
pub use run::{RunArgs, cmd_run};
pub use variants::{VariantsArgs, cmd_variants};

/// Exit code when no script could be selected
pub const EXIT_UNRESOLVED: i32 = 1;
