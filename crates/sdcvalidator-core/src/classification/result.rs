//! Classified errors and the per-run validation result
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use super::raw::RawValidationError;
use super::tier::{ErrorCategory, ErrorTier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw error together with the tier and rule that classified it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub error: RawValidationError,
    pub tier: ErrorTier,
    pub category: ErrorCategory,
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.tier)
    }
}

/// Tri-state outcome a caller can map to exit codes or rejection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// No errors at all
    Valid,
    /// Only semantic (Tier 2) errors
    SemanticOnly,
    /// At least one structural (Tier 1) error
    Structural,
}

impl ValidationOutcome {
    /// Conventional process exit code: 0 valid, 1 semantic only, 2 structural
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidationOutcome::Valid => 0,
            ValidationOutcome::SemanticOnly => 1,
            ValidationOutcome::Structural => 2,
        }
    }
}

/// All classified errors for one validation run, partitioned by tier.
///
/// Built once by the classifier and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    structural_errors: Vec<ClassifiedError>,
    semantic_errors: Vec<ClassifiedError>,
}

impl ValidationResult {
    pub(crate) fn from_partitions(
        structural_errors: Vec<ClassifiedError>,
        semantic_errors: Vec<ClassifiedError>,
    ) -> Self {
        Self {
            structural_errors,
            semantic_errors,
        }
    }

    /// Structural errors in document order
    pub fn structural_errors(&self) -> &[ClassifiedError] {
        &self.structural_errors
    }

    /// Semantic errors in document order
    pub fn semantic_errors(&self) -> &[ClassifiedError] {
        &self.semantic_errors
    }

    pub fn is_valid(&self) -> bool {
        self.structural_errors.is_empty() && self.semantic_errors.is_empty()
    }

    pub fn has_structural_errors(&self) -> bool {
        !self.structural_errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.structural_errors.len() + self.semantic_errors.len()
    }

    /// Structural errors first, then semantic errors
    pub fn errors(&self) -> impl Iterator<Item = &ClassifiedError> {
        self.structural_errors.iter().chain(self.semantic_errors.iter())
    }

    pub fn outcome(&self) -> ValidationOutcome {
        if self.has_structural_errors() {
            ValidationOutcome::Structural
        } else if !self.semantic_errors.is_empty() {
            ValidationOutcome::SemanticOnly
        } else {
            ValidationOutcome::Valid
        }
    }

    /// Serializable report of this result
    pub fn report(&self) -> ValidationReport {
        ValidationReport::from(self)
    }

    /// Consume the result, returning `(structural, semantic)`
    pub fn into_partitions(self) -> (Vec<ClassifiedError>, Vec<ClassifiedError>) {
        (self.structural_errors, self.semantic_errors)
    }
}

/// Flattened view of one error for reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Element path, `"unknown"` when the engine gave none
    pub xpath: String,
    /// Local name of the offending element, when derivable from the path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Validator kind as reported by the engine
    pub error_type: String,
    pub reason: String,
    pub tier: ErrorTier,
    pub category: ErrorCategory,
}

impl ErrorSummary {
    pub(crate) fn new(error: &RawValidationError, category: ErrorCategory) -> Self {
        Self {
            xpath: error.path.clone().unwrap_or_else(|| "unknown".to_string()),
            element: error.element_name().map(str::to_string),
            error_type: error.validator_kind.clone(),
            reason: error
                .reason
                .clone()
                .unwrap_or_else(|| "No reason provided".to_string()),
            tier: category.tier(),
            category,
        }
    }
}

impl From<&ClassifiedError> for ErrorSummary {
    fn from(classified: &ClassifiedError) -> Self {
        Self::new(&classified.error, classified.category)
    }
}

/// Detailed, serializable report of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub error_count: usize,
    pub structural_error_count: usize,
    pub semantic_error_count: usize,
    pub structural_errors: Vec<ErrorSummary>,
    pub semantic_errors: Vec<ErrorSummary>,
}

impl ValidationReport {
    pub fn outcome(&self) -> ValidationOutcome {
        if self.structural_error_count > 0 {
            ValidationOutcome::Structural
        } else if self.semantic_error_count > 0 {
            ValidationOutcome::SemanticOnly
        } else {
            ValidationOutcome::Valid
        }
    }
}

impl From<&ValidationResult> for ValidationReport {
    fn from(result: &ValidationResult) -> Self {
        Self {
            valid: result.is_valid(),
            error_count: result.error_count(),
            structural_error_count: result.structural_errors.len(),
            semantic_error_count: result.semantic_errors.len(),
            structural_errors: result.structural_errors.iter().map(ErrorSummary::from).collect(),
            semantic_errors: result.semantic_errors.iter().map(ErrorSummary::from).collect(),
        }
    }
}
