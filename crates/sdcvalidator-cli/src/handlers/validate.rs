//! Validate command handler

use super::resolve_scope;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{InstanceReport, OutputWriter, ValidationRun};
use sdcvalidator_core::{CommandEngine, Sdc4Validator, ValidatorOptions};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(args, config, output), fields(schema = %args.schema.display(), instances = args.instances.len()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<i32> {
    let _timer = Timer::with_details("validate_command", &format!("schema: {}", args.schema.display()));

    let engine = resolve_engine(args.engine.as_deref(), config)?;
    debug!(program = engine.program(), "Using instance engine");

    let options = ValidatorOptions::new()
        .check_compliance(config.compliance.enabled && !args.no_compliance_check)
        .compliance_scope(resolve_scope(args.all_namespaces, config));

    let validator = Sdc4Validator::with_options(&args.schema, engine, options)?;
    output.debug(&format!("Schema loaded: {}", args.schema.display()))?;

    let progress = output.progress_bar(args.instances.len() as u64, "validating");
    let mut reports = Vec::with_capacity(args.instances.len());

    for instance in &args.instances {
        let name = instance.display().to_string();
        match validator.validate_and_report(instance) {
            Ok(report) => {
                info!(
                    instance = %name,
                    structural = report.structural_error_count,
                    semantic = report.semantic_error_count,
                    "Instance validated"
                );
                reports.push(InstanceReport::new(name, report));
            }
            Err(e) => {
                warn!(instance = %name, error = %e, "Instance could not be validated");
                reports.push(InstanceReport::failed(name, e.to_string()));
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let run = ValidationRun::new(Some(args.schema.display().to_string()), reports);
    output.validation_run(&run)?;
    Ok(run.exit_code)
}

/// The `--engine` flag wins over `engine.command` from config and environment
fn resolve_engine(flag: Option<&str>, config: &Config) -> Result<CommandEngine> {
    match flag {
        Some(line) => Ok(CommandEngine::from_command_line(line)?),
        None if !config.engine.command.is_empty() => Ok(CommandEngine::new(config.engine.command.iter().cloned())?),
        None => Err(Error::invalid_args(
            "no instance engine configured; pass --engine or set engine.command",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config_engine() {
        let mut config = Config::default();
        config.engine.command = vec!["configured".to_string(), "{instance}".to_string()];

        let engine = resolve_engine(Some("flagged --json {schema} {instance}"), &config).unwrap();
        assert_eq!(engine.program(), "flagged");

        let engine = resolve_engine(None, &config).unwrap();
        assert_eq!(engine.program(), "configured");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_instance_does_not_stop_the_run() {
        let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../sdcvalidator-core/tests/fixtures");
        let args = ValidateArgs {
            schema: fixtures.join("valid_sdc4_schema.xsd"),
            instances: vec![fixtures.join("missing.xml"), fixtures.join("instance.xml")],
            engine: Some("true".to_string()),
            no_compliance_check: false,
            all_namespaces: false,
        };
        let mut output = OutputWriter::with_writer(
            crate::cli::OutputFormat::Json,
            false,
            true,
            0,
            Box::new(std::io::sink()),
        );

        let code = handle_validate(args, &Config::default(), &mut output).unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_missing_engine_is_an_argument_error() {
        let err = resolve_engine(None, &Config::default()).unwrap_err();
        assert!(err.should_show_help());

        let err = resolve_engine(Some("   "), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
    }
}
