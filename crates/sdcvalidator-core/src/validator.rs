//! Validation pipeline: compliance gate, instance engine, classifier
//!
//! An [`Sdc4Validator`] is bound to one schema. Construction runs the
//! compliance gate once; each `validate*` call then asks the instance engine
//! for the ordered error stream and classifies it.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use crate::classification::{
    ErrorClassifier, ErrorSummary, RawValidationError, ValidationReport, ValidationResult,
};
use crate::compliance::{CompiledSchema, ComplianceChecker, ComplianceResult, ComplianceScope};
use crate::engine::InstanceValidator;
use crate::error::Result;
use crate::xsd::{read_schema_file, XsdError};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for building an [`Sdc4Validator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    pub check_compliance: bool,
    pub compliance_scope: ComplianceScope,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            check_compliance: true,
            compliance_scope: ComplianceScope::default(),
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_compliance(mut self, enabled: bool) -> Self {
        self.check_compliance = enabled;
        self
    }

    pub fn compliance_scope(mut self, scope: ComplianceScope) -> Self {
        self.compliance_scope = scope;
        self
    }
}

/// Validates instances against one SDC4 data model schema
#[derive(Debug)]
pub struct Sdc4Validator<E> {
    schema_path: PathBuf,
    schema: Option<CompiledSchema>,
    engine: E,
    classifier: ErrorClassifier,
    options: ValidatorOptions,
}

impl<E: InstanceValidator> Sdc4Validator<E> {
    /// Bind `engine` to the schema at `schema_path` with default options.
    ///
    /// Fails with [`Error::Compliance`](crate::Error::Compliance) when the
    /// schema derives any complex type by extension.
    pub fn new(schema_path: impl AsRef<Path>, engine: E) -> Result<Self> {
        Self::with_options(schema_path, engine, ValidatorOptions::default())
    }

    pub fn with_options(
        schema_path: impl AsRef<Path>,
        engine: E,
        options: ValidatorOptions,
    ) -> Result<Self> {
        let schema_path = schema_path.as_ref().to_path_buf();

        let schema = if options.check_compliance {
            let schema = read_schema_file(&schema_path)?;
            ComplianceChecker::new(options.compliance_scope)
                .assert_schema(&schema, Some(&schema_path.to_string_lossy()))?;
            info!(schema = %schema_path.display(), "Schema passed compliance check");
            Some(schema)
        } else {
            if !schema_path.exists() {
                return Err(XsdError::NotFound { path: schema_path }.into());
            }
            debug!(schema = %schema_path.display(), "Compliance check disabled");
            None
        };

        Ok(Self {
            schema_path,
            schema,
            engine,
            classifier: ErrorClassifier::new(),
            options,
        })
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Type graph read during the compliance gate, if it ran
    pub fn compiled_schema(&self) -> Option<&CompiledSchema> {
        self.schema.as_ref()
    }

    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Raw engine errors for `instance`, in document order
    fn raw_errors(&self, instance: &Path) -> Result<Vec<RawValidationError>> {
        if !instance.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Instance file not found: {}", instance.display()),
            )
            .into());
        }

        let errors = self.engine.validate_instance(&self.schema_path, instance)?;
        debug!(instance = %instance.display(), errors = errors.len(), "Instance engine finished");
        Ok(errors)
    }

    /// Validate an instance and classify every error
    pub fn validate(&self, instance: impl AsRef<Path>) -> Result<ValidationResult> {
        let errors = self.raw_errors(instance.as_ref())?;
        Ok(self.classifier.classify_all(errors))
    }

    /// Structural errors only; an empty list means the structure is valid
    pub fn validate_structure(
        &self,
        instance: impl AsRef<Path>,
    ) -> Result<Vec<RawValidationError>> {
        let errors = self.raw_errors(instance.as_ref())?;
        Ok(errors
            .into_iter()
            .filter(|e| self.classifier.is_structural_error(e))
            .collect())
    }

    pub fn validate_and_report(&self, instance: impl AsRef<Path>) -> Result<ValidationReport> {
        Ok(self.validate(instance)?.report())
    }

    /// Summaries of all errors in document order, tiers interleaved
    pub fn iter_errors(&self, instance: impl AsRef<Path>) -> Result<Vec<ErrorSummary>> {
        let errors = self.raw_errors(instance.as_ref())?;
        Ok(errors.iter().map(|e| self.classifier.summarize(e)).collect())
    }
}

/// Read a schema file and scan it for `xsd:extension`
pub fn check_schema_file(path: &Path, scope: ComplianceScope) -> Result<ComplianceResult> {
    let schema = read_schema_file(path)?;
    Ok(ComplianceChecker::new(scope).check_schema(&schema))
}

/// Read a schema file and fail when it derives any type by extension
pub fn assert_schema_file(path: &Path, scope: ComplianceScope) -> Result<()> {
    let schema = read_schema_file(path)?;
    ComplianceChecker::new(scope).assert_schema(&schema, Some(&path.to_string_lossy()))?;
    Ok(())
}
