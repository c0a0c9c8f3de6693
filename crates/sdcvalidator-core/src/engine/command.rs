//! Engine adapter that shells out to an external validator
//!
//! The command is an argv template. `{schema}` and `{instance}` in any
//! argument are replaced with the respective paths. The command must print
//! a JSON error stream on stdout; an empty stdout means no errors.

use super::stream::parse_json_stream;
use super::{EngineError, InstanceValidator};
use crate::classification::RawValidationError;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEngine {
    argv: Vec<String>,
}

impl CommandEngine {
    pub fn new<I, S>(argv: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() || argv[0].trim().is_empty() {
            return Err(EngineError::EmptyCommand);
        }
        Ok(Self { argv })
    }

    /// Split a command line on whitespace. Quoting is not interpreted.
    pub fn from_command_line(line: &str) -> Result<Self, EngineError> {
        Self::new(line.split_whitespace())
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments with placeholders substituted
    pub fn render_args(&self, schema: &Path, instance: &Path) -> Vec<String> {
        let schema = schema.to_string_lossy();
        let instance = instance.to_string_lossy();
        self.argv[1..]
            .iter()
            .map(|arg| arg.replace("{schema}", &schema).replace("{instance}", &instance))
            .collect()
    }
}

impl InstanceValidator for CommandEngine {
    fn validate_instance(
        &self,
        schema: &Path,
        instance: &Path,
    ) -> Result<Vec<RawValidationError>, EngineError> {
        let args = self.render_args(schema, instance);
        debug!(program = self.program(), ?args, "Running instance engine");

        let output = Command::new(self.program())
            .args(&args)
            .output()
            .map_err(|source| EngineError::Spawn {
                program: self.program().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if stdout.trim().is_empty() {
            if output.status.success() {
                return Ok(Vec::new());
            }
            return Err(EngineError::Failed {
                program: self.program().to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        match parse_json_stream(&stdout) {
            Ok(errors) => {
                // Many validators exit non-zero when they found errors; the
                // stream is what counts.
                if !output.status.success() {
                    debug!(status = ?output.status.code(), "Engine reported failures via exit status");
                }
                Ok(errors)
            }
            Err(source) if output.status.success() => Err(EngineError::InvalidOutput { source }),
            Err(_) => {
                warn!(program = self.program(), %stderr, "Engine failed without an error stream");
                Err(EngineError::Failed {
                    program: self.program().to_string(),
                    status: output.status.code().unwrap_or(-1),
                    stderr,
                })
            }
        }
    }
}
