//! Two-tier classification of validation errors
//!
//! - **Structural** (Tier 1): unknown elements, wrong nesting, cardinality. Reject.
//! - **Semantic** (Tier 2): type errors, facet and enumeration violations. Report.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

pub mod classifier;
pub mod raw;
pub mod result;
pub mod tier;

pub use classifier::{classify, classify_all, ErrorClassifier};
pub use raw::{normalize_kind, RawValidationError};
pub use result::{ClassifiedError, ErrorSummary, ValidationOutcome, ValidationReport, ValidationResult};
pub use tier::{ErrorCategory, ErrorTier};
