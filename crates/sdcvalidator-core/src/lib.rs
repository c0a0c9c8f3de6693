//! SDC4 Validator Core - two-tier error classification and schema compliance
//!
//! This crate sits between an XML Schema 1.1 validation engine and the
//! application deciding what to do with an instance document:
//! - **ErrorClassifier**: sorts engine errors into structural (Tier 1) and
//!   semantic (Tier 2) tiers
//! - **ComplianceChecker**: rejects SDC4 data model schemas that derive any
//!   complex type by `xsd:extension`
//!
//! ## Features
//!
//! - **Total classification**: every error gets exactly one tier, unknown
//!   kinds fall back to semantic
//! - **Order preserving**: each tier keeps the engine's document order
//! - **Full violation lists**: a non-compliant schema reports every offending
//!   type, anonymous ones included
//! - **Pluggable engines**: any validator that can emit an error stream plugs
//!   in through [`InstanceValidator`]
//!
//! ## Quick Start
//!
//! ```rust
//! use sdcvalidator_core::{classify_all, RawValidationError, ValidationOutcome};
//!
//! let errors = vec![
//!     RawValidationError::new("unexpected-element").with_path("/Root/Foo"),
//!     RawValidationError::new("type").with_path("/Root/Count"),
//! ];
//!
//! let result = classify_all(errors);
//! assert_eq!(result.structural_errors().len(), 1);
//! assert_eq!(result.semantic_errors().len(), 1);
//! assert_eq!(result.outcome(), ValidationOutcome::Structural);
//! ```
//!
//! ## Tiers
//!
//! - **Structural**: undeclared elements or attributes, cardinality and
//!   content-model violations. The instance should be rejected.
//! - **Semantic**: value-level problems (type, facet, enumeration). The
//!   structure is sound and the instance may be kept for downstream handling.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

pub mod classification;
pub mod compliance;
pub mod constants;
pub mod engine;
pub mod error;
pub mod validator;
pub mod xsd;

// Re-export commonly used types for convenience
pub use classification::{
    classify, classify_all, ClassifiedError, ErrorCategory, ErrorClassifier, ErrorSummary,
    ErrorTier, RawValidationError, ValidationOutcome, ValidationReport, ValidationResult,
};
pub use compliance::{
    assert_schema_compliance, check_schema_compliance, CompiledSchema, ComplexTypeDefinition,
    ComplianceChecker, ComplianceResult, ComplianceScope, ComplianceViolation, DerivationMethod,
    SchemaComplianceError,
};
pub use constants::{SDC4_NAMESPACE, XSD_NAMESPACE};
pub use engine::{CommandEngine, EngineError, InstanceValidator, RecordedErrors};
pub use error::{Error, Result};
pub use validator::{assert_schema_file, check_schema_file, Sdc4Validator, ValidatorOptions};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
