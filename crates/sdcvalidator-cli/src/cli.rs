//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// sdcvalidate - two-tier validation for SDC4 data model instances
///
/// Sorts validation errors into structural (Tier 1) and semantic (Tier 2)
/// errors and rejects data model schemas that use xsd:extension.
#[derive(Parser, Debug)]
#[command(
    name = "sdcvalidate",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SDCVALIDATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate XML instances against an SDC4 data model schema
    Validate(ValidateArgs),

    /// Classify a recorded engine error stream (JSON or YAML)
    Classify(ClassifyArgs),

    /// Check schemas for xsd:extension
    CheckSchema(CheckSchemaArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the data model schema (XSD)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// XML instance documents to validate
    #[arg(value_name = "INSTANCE", required = true)]
    pub instances: Vec<PathBuf>,

    /// Instance engine command; {schema} and {instance} are substituted
    #[arg(long, value_name = "CMD")]
    pub engine: Option<String>,

    /// Skip the xsd:extension check on the schema
    #[arg(long)]
    pub no_compliance_check: bool,

    /// Check schemas in any target namespace, not only SDC4
    #[arg(long)]
    pub all_namespaces: bool,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Error stream file (.json, .yaml or .yml)
    #[arg(value_name = "ERRORS_FILE")]
    pub errors_file: PathBuf,
}

/// Arguments for the check-schema command
#[derive(Parser, Debug)]
pub struct CheckSchemaArgs {
    /// Schemas to check
    #[arg(value_name = "SCHEMA", required = true)]
    pub schemas: Vec<PathBuf>,

    /// Check schemas in any target namespace, not only SDC4
    #[arg(long)]
    pub all_namespaces: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Write to the user config directory instead of the current directory
    #[arg(long)]
    pub user: bool,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::parse_from([
            "sdcvalidate",
            "-vv",
            "validate",
            "dm.xsd",
            "a.xml",
            "b.xml",
            "--engine",
            "xmllint --schema {schema} {instance}",
            "--all-namespaces",
        ]);
        assert_eq!(cli.verbosity_level(), 2);

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.schema, PathBuf::from("dm.xsd"));
        assert_eq!(args.instances.len(), 2);
        assert_eq!(args.engine.as_deref(), Some("xmllint --schema {schema} {instance}"));
        assert!(args.all_namespaces);
        assert!(!args.no_compliance_check);
    }

    #[test]
    fn test_validate_requires_an_instance() {
        assert!(Cli::try_parse_from(["sdcvalidate", "validate", "dm.xsd"]).is_err());
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        let cli = Cli::parse_from(["sdcvalidate", "--quiet", "-o", "json", "classify", "errors.json"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_check_schema_and_config_commands() {
        let cli = Cli::parse_from(["sdcvalidate", "check-schema", "a.xsd", "b.xsd"]);
        assert!(matches!(cli.command, Commands::CheckSchema(ref a) if a.schemas.len() == 2));

        let cli = Cli::parse_from(["sdcvalidate", "config", "show", "--format", "yaml"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs { action: ConfigAction::Show(ConfigShowArgs { format: ConfigFormat::Yaml }) })
        ));
    }
}
