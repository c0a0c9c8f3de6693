//! Output formatting and writing utilities
//!
//! This module formats validation runs and compliance checks as JSON, YAML
//! or human-readable text, and provides progress indicators for runs over
//! several instances.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sdcvalidator_core::{ComplianceResult, ValidationOutcome, ValidationReport};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use tracing::trace;

/// Who produced an output document, and when
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl RunMetadata {
    pub fn now() -> Self {
        Self {
            tool: "sdcvalidate",
            version: env!("CARGO_PKG_VERSION"),
            generated_at: chrono::Utc::now().to_rfc3339(),
            request_id: logging::current_request_id().map(str::to_string),
        }
    }
}

/// Report for one validated instance, or the failure that prevented one
#[derive(Debug, Clone, Serialize)]
pub struct InstanceReport {
    pub instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ValidationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub report: Option<ValidationReport>,
}

impl InstanceReport {
    pub fn new(instance: impl Into<String>, report: ValidationReport) -> Self {
        Self {
            instance: instance.into(),
            outcome: Some(report.outcome()),
            error: None,
            report: Some(report),
        }
    }

    /// An instance that could not be validated
    pub fn failed(instance: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            outcome: None,
            error: Some(error.into()),
            report: None,
        }
    }

    /// 0/1/2 for a classified report, 2 for a failure
    pub fn exit_code(&self) -> i32 {
        self.outcome.map(|o| o.exit_code()).unwrap_or(2)
    }
}

/// Result of a `validate` or `classify` run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRun {
    pub metadata: RunMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub reports: Vec<InstanceReport>,
    pub exit_code: i32,
}

impl ValidationRun {
    pub fn new(schema: Option<String>, reports: Vec<InstanceReport>) -> Self {
        let exit_code = reports
            .iter()
            .map(InstanceReport::exit_code)
            .max()
            .unwrap_or(0);
        Self {
            metadata: RunMetadata::now(),
            schema,
            reports,
            exit_code,
        }
    }
}

/// Compliance result for one schema file
#[derive(Debug, Clone, Serialize)]
pub struct SchemaCheck {
    pub schema: String,
    #[serde(flatten)]
    pub result: ComplianceResult,
}

/// Result of a `check-schema` run
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceRun {
    pub metadata: RunMetadata,
    pub schemas: Vec<SchemaCheck>,
    pub exit_code: i32,
}

impl ComplianceRun {
    pub fn new(schemas: Vec<SchemaCheck>) -> Self {
        let exit_code = if schemas.iter().all(|s| s.result.is_compliant) { 0 } else { 2 };
        Self {
            metadata: RunMetadata::now(),
            schemas,
            exit_code,
        }
    }
}

/// Failure document for machine-readable formats
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub error: String,
    pub exit_code: i32,
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the reports of a validation run
    fn format_validation_run(&self, run: &ValidationRun) -> Result<String>;

    /// Format the results of a compliance check run
    fn format_compliance_run(&self, run: &ComplianceRun) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output falls back to pretty JSON for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_validation_run(&self, run: &ValidationRun) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_run_human(run)),
            _ => self.format(run),
        }
    }

    fn format_compliance_run(&self, run: &ComplianceRun) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_compliance_run_human(run)),
            _ => self.format(run),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            verbose,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            verbose,
            writer,
        }
    }

    /// Turn progress indicators off regardless of the terminal
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = self.show_progress && enabled;
        self
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write debug information if verbose mode is enabled
    pub fn debug(&mut self, message: &str) -> Result<()> {
        if self.verbose == 0 || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "DEBUG:".dimmed(), message.dimmed()))
        } else {
            self.writeln(&format!("DEBUG: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a validation run
    pub fn validation_run(&mut self, run: &ValidationRun) -> Result<()> {
        trace!(reports = run.reports.len(), exit_code = run.exit_code, "Writing validation run");
        let formatted = self.format.format_validation_run(run)?;
        let formatted = self.colorize_status(&formatted);
        self.writeln(formatted.trim_end())
    }

    /// Write a compliance check run
    pub fn compliance_run(&mut self, run: &ComplianceRun) -> Result<()> {
        trace!(schemas = run.schemas.len(), exit_code = run.exit_code, "Writing compliance run");
        let formatted = self.format.format_compliance_run(run)?;
        let formatted = self.colorize_status(&formatted);
        self.writeln(formatted.trim_end())
    }

    /// Write a failure in machine formats; human failures go to stderr from main
    pub fn failure(&mut self, failure: &FailureReport) -> Result<bool> {
        if self.format == OutputFormat::Human {
            return Ok(false);
        }
        self.data(failure)?;
        Ok(true)
    }

    /// Create a progress bar for runs over several inputs
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress || length < 2 {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    fn colorize_status(&self, text: &str) -> String {
        if !self.use_color || self.format != OutputFormat::Human {
            return text.to_string();
        }
        text.lines()
            .map(|line| {
                let trimmed = line.trim_start();
                if trimmed.starts_with("Valid.") || trimmed.ends_with(": compliant") {
                    line.green().to_string()
                } else if trimmed.starts_with("Invalid:")
                    || trimmed.starts_with("Error:")
                    || trimmed.contains("violation(s)")
                {
                    line.red().bold().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn format_instance_human(instance: &InstanceReport) -> String {
    match (&instance.report, &instance.error) {
        (Some(report), _) => format_report_human(report),
        (None, Some(error)) => format!("Error: {}\n", error),
        (None, None) => String::new(),
    }
}

/// Format one report the way `sdcvalidate` always has
fn format_report_human(report: &ValidationReport) -> String {
    let mut output = String::new();

    if report.valid {
        output.push_str("Valid.\n");
        return output;
    }

    output.push_str(&format!("Invalid: {} error(s)\n", report.error_count));

    if report.structural_error_count > 0 {
        output.push_str(&format!(
            "\n  Structural errors (Tier 1): {}\n",
            report.structural_error_count
        ));
        for error in &report.structural_errors {
            output.push_str(&format!("    - [{}] {}\n", error.xpath, error.reason));
        }
    }

    if report.semantic_error_count > 0 {
        output.push_str(&format!(
            "\n  Semantic errors (Tier 2): {}\n",
            report.semantic_error_count
        ));
        for error in &report.semantic_errors {
            output.push_str(&format!("    - [{}] {}\n", error.xpath, error.reason));
        }
    }

    output
}

fn format_validation_run_human(run: &ValidationRun) -> String {
    if let [single] = run.reports.as_slice() {
        return format_instance_human(single);
    }

    let mut output = String::new();
    for (i, instance) in run.reports.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{}:\n", instance.instance));
        for line in format_instance_human(instance).lines() {
            if line.is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("  {}\n", line));
            }
        }
    }
    output
}

fn format_compliance_run_human(run: &ComplianceRun) -> String {
    let mut output = String::new();

    for check in &run.schemas {
        if check.result.is_compliant {
            output.push_str(&format!("{}: compliant\n", check.schema));
            continue;
        }

        output.push_str(&format!(
            "{}: {} violation(s)\n",
            check.schema,
            check.result.violations.len()
        ));
        for violation in &check.result.violations {
            output.push_str(&format!("  - {}\n", violation));
        }
    }

    if run.exit_code != 0 {
        output.push_str(
            "\nSDC4 Principle: Data models must use xsd:restriction (not xsd:extension) \
             to guarantee global interoperability and enforce separation of structure and semantics.\n",
        );
    }

    output
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
