//! Classify command handler

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{InstanceReport, OutputWriter, ValidationRun};
use sdcvalidator_core::engine::recorded::load_error_stream;
use sdcvalidator_core::ErrorClassifier;
use tracing::{info, instrument};

/// Handle the classify command
#[instrument(skip(args, _config, output), fields(file = %args.errors_file.display()))]
pub fn handle_classify(args: ClassifyArgs, _config: &Config, output: &mut OutputWriter) -> Result<i32> {
    if !args.errors_file.exists() {
        return Err(Error::FileNotFound {
            path: args.errors_file.clone(),
        });
    }

    let errors = load_error_stream(&args.errors_file)?;
    info!(count = errors.len(), "Loaded error stream");

    let result = ErrorClassifier::new().classify_all(errors);
    let run = ValidationRun::new(
        None,
        vec![InstanceReport::new(args.errors_file.display().to_string(), result.report())],
    );
    output.validation_run(&run)?;
    Ok(run.exit_code)
}
