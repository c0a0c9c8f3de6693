//! Crate-level error type
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use crate::compliance::SchemaComplianceError;
use crate::engine::EngineError;
use crate::xsd::XsdError;
use thiserror::Error;

/// Failures before a classified validation result exists
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    SchemaLoad(#[from] XsdError),

    #[error(transparent)]
    Compliance(#[from] SchemaComplianceError),

    #[error("Instance engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure is a schema compliance rejection
    pub fn is_compliance(&self) -> bool {
        matches!(self, Error::Compliance(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
