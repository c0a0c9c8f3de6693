//! Boundary to the external instance validation engine
//!
//! The engine compiles the schema, validates an instance and hands back an
//! ordered error stream. Nothing here depends on how a given engine names
//! its exceptions; adapters only have to produce [`RawValidationError`]s.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

pub mod command;
pub mod recorded;
pub mod stream;

pub use command::CommandEngine;
pub use recorded::RecordedErrors;
pub use stream::{infer_validator_kind, parse_json_stream, parse_yaml_stream, ErrorRecord};

use crate::classification::RawValidationError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by instance engines and their adapters
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine command is empty")]
    EmptyCommand,

    #[error("Failed to run engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine '{program}' exited with status {status}: {stderr}")]
    Failed {
        program: String,
        status: i32,
        stderr: String,
    },

    #[error("Engine output is not a valid error stream: {source}")]
    InvalidOutput {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read error stream {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid error stream in {}: {message}", path.display())]
    InvalidStream { path: PathBuf, message: String },
}

/// An engine that validates one instance against one schema
pub trait InstanceValidator {
    /// Validate `instance` against `schema`, returning errors in document order
    fn validate_instance(
        &self,
        schema: &Path,
        instance: &Path,
    ) -> Result<Vec<RawValidationError>, EngineError>;
}

impl<T: InstanceValidator + ?Sized> InstanceValidator for &T {
    fn validate_instance(
        &self,
        schema: &Path,
        instance: &Path,
    ) -> Result<Vec<RawValidationError>, EngineError> {
        (**self).validate_instance(schema, instance)
    }
}

impl<T: InstanceValidator + ?Sized> InstanceValidator for Box<T> {
    fn validate_instance(
        &self,
        schema: &Path,
        instance: &Path,
    ) -> Result<Vec<RawValidationError>, EngineError> {
        (**self).validate_instance(schema, instance)
    }
}
