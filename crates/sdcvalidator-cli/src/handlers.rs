//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.
//! Handlers return the process exit code for the run they performed.

mod check;
mod classify;
mod completions;
mod config;
mod validate;

pub use check::handle_check_schema;
pub use classify::handle_classify;
pub use completions::handle_completions;
pub use config::handle_config;
pub use validate::handle_validate;

use crate::config::Config;
use sdcvalidator_core::ComplianceScope;

/// Compliance scope from the `--all-namespaces` flag, falling back to config
fn resolve_scope(all_namespaces: bool, config: &Config) -> ComplianceScope {
    if all_namespaces {
        ComplianceScope::AllSchemas
    } else {
        config.compliance.scope
    }
}
