//! Compliance violation and failure types
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One complex type that derives by extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceViolation {
    /// `None` for anonymous types
    pub type_name: Option<String>,
    pub base_type: Option<String>,
    /// Element path of the offending type definition
    pub location: String,
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for ComplianceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        match self.line {
            Some(line) => write!(f, " (at {}, line {})", self.location, line),
            None => write!(f, " (at {})", self.location),
        }
    }
}

/// Outcome of a compliance scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub is_compliant: bool,
    /// Violations in type declaration order
    pub violations: Vec<ComplianceViolation>,
}

impl ComplianceResult {
    pub fn from_violations(violations: Vec<ComplianceViolation>) -> Self {
        Self {
            is_compliant: violations.is_empty(),
            violations,
        }
    }

    /// A passing result with nothing to report
    pub fn compliant() -> Self {
        Self::from_violations(Vec::new())
    }

    /// Convert a failing result into [`SchemaComplianceError`]
    pub fn into_result(self, schema: Option<String>) -> Result<(), SchemaComplianceError> {
        if self.is_compliant {
            Ok(())
        } else {
            Err(SchemaComplianceError {
                schema,
                violations: self.violations,
            })
        }
    }
}

/// A schema uses `xsd:extension`.
///
/// Carries every violation so callers can report them all at once.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaComplianceError {
    /// Path or identifier of the offending schema, when known
    pub schema: Option<String>,
    pub violations: Vec<ComplianceViolation>,
}

impl fmt::Display for SchemaComplianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => writeln!(f, "Schema '{}' violates SDC4 compliance:", schema)?,
            None => writeln!(f, "Schema violates SDC4 compliance:")?,
        }
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        write!(
            f,
            "\n\nSDC4 Principle: Data models must use xsd:restriction (not xsd:extension) \
             to guarantee global interoperability and enforce separation of structure and semantics."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(name: &str) -> ComplianceViolation {
        ComplianceViolation {
            type_name: Some(name.to_string()),
            base_type: Some("sdc4:XdStringType".to_string()),
            location: format!("/schema/complexType[@name='{}']", name),
            line: Some(3),
            message: format!("xsd:extension found in type '{}'", name),
        }
    }

    #[test]
    fn test_error_lists_violations_after_header_line() {
        let err = SchemaComplianceError {
            schema: Some("dm.xsd".to_string()),
            violations: vec![violation("A"), violation("B")],
        };

        let message = err.to_string();
        assert!(message.starts_with(
            "Schema 'dm.xsd' violates SDC4 compliance:\n\n  - xsd:extension found in type 'A' \
             (at /schema/complexType[@name='A'], line 3)\n  - xsd:extension found in type 'B'"
        ));
        assert!(message.ends_with("separation of structure and semantics."));
    }

    #[test]
    fn test_error_without_schema_identifier() {
        let err = ComplianceResult::from_violations(vec![violation("A")])
            .into_result(None)
            .unwrap_err();
        assert!(err.to_string().starts_with("Schema violates SDC4 compliance:\n\n  - "));
    }
}
