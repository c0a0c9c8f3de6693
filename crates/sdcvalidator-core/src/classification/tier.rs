//! Error tiers and the categories that feed them
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-tier classification of validation failures.
///
/// Variants are declared in ascending severity so the derived `Ord` gives
/// `Structural > Semantic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorTier {
    /// Tier 2: a value constraint failed. Reported, not rejected.
    Semantic,
    /// Tier 1: the document shape is wrong. Rejected.
    Structural,
}

impl ErrorTier {
    /// Lowercase label used in reports (`"structural"` / `"semantic"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorTier::Structural => "structural",
            ErrorTier::Semantic => "semantic",
        }
    }

    /// Human label used by the CLI ("Tier 1" / "Tier 2")
    pub fn label(&self) -> &'static str {
        match self {
            ErrorTier::Structural => "Tier 1",
            ErrorTier::Semantic => "Tier 2",
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, ErrorTier::Structural)
    }
}

impl fmt::Display for ErrorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification rule that matched a raw error.
///
/// Rules are evaluated in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// An element, attribute or wildcard match the schema does not declare here
    UnexpectedConstruct,
    /// Too few or too many occurrences, or a required item missing entirely
    Cardinality,
    /// Children out of order or grouped against the sequence/choice/all model
    ContentModel,
    /// The value is outside its base type's value space
    ValueType,
    /// A pattern, length, range or other facet failed
    Facet,
    /// The value is not one of the declared literals
    Enumeration,
    /// No rule matched
    Unrecognized,
}

impl ErrorCategory {
    /// Tier assigned to errors in this category
    pub fn tier(&self) -> ErrorTier {
        match self {
            ErrorCategory::UnexpectedConstruct
            | ErrorCategory::Cardinality
            | ErrorCategory::ContentModel => ErrorTier::Structural,
            ErrorCategory::ValueType
            | ErrorCategory::Facet
            | ErrorCategory::Enumeration
            | ErrorCategory::Unrecognized => ErrorTier::Semantic,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::UnexpectedConstruct => "unexpected construct",
            ErrorCategory::Cardinality => "cardinality",
            ErrorCategory::ContentModel => "content model",
            ErrorCategory::ValueType => "value type",
            ErrorCategory::Facet => "facet",
            ErrorCategory::Enumeration => "enumeration",
            ErrorCategory::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_outranks_semantic() {
        assert!(ErrorTier::Structural > ErrorTier::Semantic);
        assert_eq!(
            [ErrorTier::Semantic, ErrorTier::Structural].iter().max(),
            Some(&ErrorTier::Structural)
        );
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ErrorTier::Structural).unwrap(), "\"structural\"");
        assert_eq!(ErrorTier::Semantic.to_string(), "semantic");
    }

    #[test]
    fn test_only_shape_categories_are_structural() {
        let structural: Vec<_> = [
            ErrorCategory::UnexpectedConstruct,
            ErrorCategory::Cardinality,
            ErrorCategory::ContentModel,
            ErrorCategory::ValueType,
            ErrorCategory::Facet,
            ErrorCategory::Enumeration,
            ErrorCategory::Unrecognized,
        ]
        .into_iter()
        .filter(|c| c.tier().is_structural())
        .collect();

        assert_eq!(
            structural,
            vec![
                ErrorCategory::UnexpectedConstruct,
                ErrorCategory::Cardinality,
                ErrorCategory::ContentModel,
            ]
        );
    }
}
