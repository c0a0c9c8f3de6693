//! Engine adapter that replays an error stream captured earlier

use super::stream::{parse_json_stream, parse_yaml_stream};
use super::{EngineError, InstanceValidator};
use crate::classification::RawValidationError;
use std::path::{Path, PathBuf};

/// Replays the errors stored in a JSON or YAML file, whatever the instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedErrors {
    path: PathBuf,
}

impl RecordedErrors {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InstanceValidator for RecordedErrors {
    fn validate_instance(
        &self,
        _schema: &Path,
        _instance: &Path,
    ) -> Result<Vec<RawValidationError>, EngineError> {
        load_error_stream(&self.path)
    }
}

/// Load an error stream file; `.yaml`/`.yml` are read as YAML, anything else as JSON
pub fn load_error_stream(path: &Path) -> Result<Vec<RawValidationError>, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|source| EngineError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let parsed = if is_yaml {
        parse_yaml_stream(&content).map_err(|e| e.to_string())
    } else {
        parse_json_stream(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| EngineError::InvalidStream {
        path: path.to_path_buf(),
        message,
    })
}
