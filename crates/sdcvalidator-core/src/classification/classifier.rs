//! Rule-based classifier for raw validation errors
//!
//! Each raw error is matched against an ordered rule table. The three
//! structural rules look at the validator kind only; the semantic rules may
//! also use the schema component kind to pick a sub-category. Anything left
//! over falls through to [`ErrorCategory::Unrecognized`], which is semantic.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use super::raw::RawValidationError;
use super::result::{ClassifiedError, ErrorSummary, ValidationResult};
use super::tier::{ErrorCategory, ErrorTier};
use tracing::debug;

/// Document constructs a structural rule can be about
const CONSTRUCTS: &[&str] = &["element", "attribute", "child", "tag", "particle"];

/// Conditions that make a construct undeclared at its position
const UNDECLARED_CONDITIONS: &[&str] = &[
    "unexpected",
    "unknown",
    "undeclared",
    "prohibited",
    "not-allowed",
    "notallowed",
    "not-permitted",
    "notpermitted",
    "invalid-child",
    "invalid-tag",
];

/// Conditions that report a construct absent or repeated too often
const OCCURRENCE_CONDITIONS: &[&str] = &["missing", "required", "too-many", "toomany", "too-few", "toofew"];

/// Markers that are structural without naming a construct
const WILDCARD_MARKERS: &[&str] = &["wildcard"];

const CARDINALITY_MARKERS: &[&str] = &[
    "occur",
    "cardinality",
    "incomplete",
    "not-complete",
    "notcomplete",
    "missing-required",
];

/// Validator-kind markers for ordering and grouping against the content model
const CONTENT_MODEL_MARKERS: &[&str] = &[
    "content-model",
    "group",
    "sequence",
    "choice",
    "order",
    "nesting",
    "misplaced",
];

const VALUE_TYPE_MARKERS: &[&str] = &[
    "type",
    "decode",
    "datatype",
    "value-space",
    "conversion",
    "invalid-value",
    "not-a-valid",
];

const FACET_MARKERS: &[&str] = &[
    "facet",
    "pattern",
    "length",
    "inclusive",
    "exclusive",
    "range",
    "digits",
    "whitespace",
    "assertion",
];

const ENUMERATION_MARKERS: &[&str] = &["enum"];

/// Normalized kind fields of one error, computed once per classification
struct KindView {
    validator: String,
    component: String,
}

impl KindView {
    fn of(error: &RawValidationError) -> Self {
        Self {
            validator: error.normalized_validator_kind(),
            component: error.normalized_component_kind(),
        }
    }

    fn validator_has(&self, markers: &[&str]) -> bool {
        markers.iter().any(|m| self.validator.contains(m))
    }

    /// A condition marker together with the construct it applies to
    fn validator_pairs(&self, conditions: &[&str]) -> bool {
        self.validator_has(conditions) && self.validator_has(CONSTRUCTS)
    }

    fn component_has(&self, markers: &[&str]) -> bool {
        markers.iter().any(|m| self.component.contains(m))
    }
}

/// A predicate paired with the category it assigns
struct Rule {
    category: ErrorCategory,
    matches: fn(&KindView) -> bool,
}

/// Evaluation order is part of the contract: first match wins.
const RULES: &[Rule] = &[
    Rule {
        category: ErrorCategory::UnexpectedConstruct,
        matches: |k| k.validator_pairs(UNDECLARED_CONDITIONS) || k.validator_has(WILDCARD_MARKERS),
    },
    Rule {
        category: ErrorCategory::Cardinality,
        matches: |k| k.validator_has(CARDINALITY_MARKERS) || k.validator_pairs(OCCURRENCE_CONDITIONS),
    },
    Rule {
        category: ErrorCategory::ContentModel,
        matches: |k| k.validator_has(CONTENT_MODEL_MARKERS),
    },
    Rule {
        category: ErrorCategory::ValueType,
        matches: |k| k.validator_has(VALUE_TYPE_MARKERS),
    },
    Rule {
        category: ErrorCategory::Facet,
        matches: |k| k.validator_has(FACET_MARKERS),
    },
    Rule {
        category: ErrorCategory::Enumeration,
        matches: |k| k.validator_has(ENUMERATION_MARKERS),
    },
    // Validator kind was not descriptive; let the component kind pick a
    // semantic sub-category.
    Rule {
        category: ErrorCategory::Enumeration,
        matches: |k| k.component_has(ENUMERATION_MARKERS),
    },
    Rule {
        category: ErrorCategory::Facet,
        matches: |k| k.component_has(FACET_MARKERS),
    },
    Rule {
        category: ErrorCategory::ValueType,
        matches: |k| k.component_has(&["simple-type", "datatype", "builtin"]),
    },
];

/// Classifies validation errors into structural (Tier 1) and semantic
/// (Tier 2) errors.
///
/// Structural errors are grounds for rejection:
/// - unknown or unexpected elements, attributes and wildcard matches
/// - occurrence violations and missing required content
/// - children out of order for the content model
///
/// Semantic errors are reported but do not reject on their own:
/// - base type value-space failures
/// - pattern, length, range and other facet violations
/// - enumeration mismatches
/// - anything the rules do not recognize
///
/// The classifier holds no state and can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Category of the first rule matching `error`
    pub fn categorize(&self, error: &RawValidationError) -> ErrorCategory {
        let kinds = KindView::of(error);
        RULES
            .iter()
            .find(|rule| (rule.matches)(&kinds))
            .map(|rule| rule.category)
            .unwrap_or(ErrorCategory::Unrecognized)
    }

    /// Tier for a single error. Never fails.
    pub fn classify(&self, error: &RawValidationError) -> ErrorTier {
        self.categorize(error).tier()
    }

    /// True when `error` should cause rejection
    pub fn is_structural_error(&self, error: &RawValidationError) -> bool {
        self.classify(error).is_structural()
    }

    /// Attach tier and category to one error
    pub fn classify_one(&self, error: RawValidationError) -> ClassifiedError {
        let category = self.categorize(&error);
        ClassifiedError {
            tier: category.tier(),
            category,
            error,
        }
    }

    /// Classify every error independently and partition them by tier.
    ///
    /// Each input error lands in exactly one partition, and input order is
    /// kept within each partition.
    pub fn classify_all<I>(&self, errors: I) -> ValidationResult
    where
        I: IntoIterator<Item = RawValidationError>,
    {
        let mut structural_errors = Vec::new();
        let mut semantic_errors = Vec::new();

        for error in errors {
            let classified = self.classify_one(error);
            match classified.tier {
                ErrorTier::Structural => structural_errors.push(classified),
                ErrorTier::Semantic => semantic_errors.push(classified),
            }
        }

        debug!(
            structural = structural_errors.len(),
            semantic = semantic_errors.len(),
            "Classified validation errors"
        );

        ValidationResult::from_partitions(structural_errors, semantic_errors)
    }

    /// Report-friendly summary of one error including its tier
    pub fn summarize(&self, error: &RawValidationError) -> ErrorSummary {
        ErrorSummary::new(error, self.categorize(error))
    }
}

/// Classify a single error with the default classifier
pub fn classify(error: &RawValidationError) -> ErrorTier {
    ErrorClassifier.classify(error)
}

/// Classify an ordered error stream with the default classifier
pub fn classify_all<I>(errors: I) -> ValidationResult
where
    I: IntoIterator<Item = RawValidationError>,
{
    ErrorClassifier.classify_all(errors)
}
