//! SDC4 schema compliance: restriction only, never extension
//!
//! SDC4 data models narrow reference-model types by `xsd:restriction`. A
//! type that derives by `xsd:extension` adds structure in the data model,
//! which breaks the separation of structure (reference model) and semantics
//! (data model). The checker reports every such type, named or anonymous.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use super::error::{ComplianceResult, ComplianceViolation, SchemaComplianceError};
use super::types::{CompiledSchema, ComplexTypeDefinition, DerivationMethod, TypeWalk};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Which schemas a schema-level check applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceScope {
    /// Only schemas targeting the SDC4 namespace; others pass unscanned
    #[default]
    Sdc4Only,
    /// Every schema regardless of target namespace
    AllSchemas,
}

/// Read-only scanner over a compiled type graph
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceChecker {
    scope: ComplianceScope,
}

impl ComplianceChecker {
    pub fn new(scope: ComplianceScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> ComplianceScope {
        self.scope
    }

    /// Scan `types` and every nested anonymous type for extension.
    ///
    /// Violations follow declaration order. Never fails.
    pub fn check(&self, types: &[ComplexTypeDefinition]) -> ComplianceResult {
        let mut scanned = 0usize;
        let violations: Vec<_> = TypeWalk::over(types)
            .inspect(|_| scanned += 1)
            .filter(|t| t.derivation == DerivationMethod::Extension)
            .map(violation_for)
            .collect();

        debug!(scanned, violations = violations.len(), "Scanned complex types for xsd:extension");
        ComplianceResult::from_violations(violations)
    }

    /// [`check`](Self::check), turning a non-compliant result into an error
    pub fn assert_compliant(
        &self,
        types: &[ComplexTypeDefinition],
    ) -> Result<(), SchemaComplianceError> {
        self.check(types).into_result(None)
    }

    /// Check a whole schema, honouring the configured scope
    pub fn check_schema(&self, schema: &CompiledSchema) -> ComplianceResult {
        if self.scope == ComplianceScope::Sdc4Only && !schema.is_sdc4() {
            info!(
                target_namespace = schema.target_namespace.as_deref().unwrap_or(""),
                "Schema is not an SDC4 schema, skipping compliance scan"
            );
            return ComplianceResult::compliant();
        }
        self.check(&schema.complex_types)
    }

    /// [`check_schema`](Self::check_schema), failing with the schema identifier attached
    pub fn assert_schema(
        &self,
        schema: &CompiledSchema,
        identifier: Option<&str>,
    ) -> Result<(), SchemaComplianceError> {
        self.check_schema(schema)
            .into_result(identifier.map(str::to_string))
    }
}

fn violation_for(definition: &ComplexTypeDefinition) -> ComplianceViolation {
    let base = definition.base_type.as_deref().unwrap_or("unknown");
    ComplianceViolation {
        type_name: definition.name.clone(),
        base_type: definition.base_type.clone(),
        location: definition.location.clone(),
        line: definition.line,
        message: format!(
            "xsd:extension found in type '{}' extending '{}'. \
             SDC4 data models must use xsd:restriction only, never xsd:extension.",
            definition.display_name(),
            base
        ),
    }
}

/// Scan a set of complex types for extension, regardless of namespace
pub fn check_schema_compliance(types: &[ComplexTypeDefinition]) -> ComplianceResult {
    ComplianceChecker::new(ComplianceScope::AllSchemas).check(types)
}

/// Fail with every violation when any complex type derives by extension
pub fn assert_schema_compliance(types: &[ComplexTypeDefinition]) -> Result<(), SchemaComplianceError> {
    ComplianceChecker::new(ComplianceScope::AllSchemas).assert_compliant(types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SDC4_NAMESPACE;

    #[test]
    fn test_single_extension_is_reported() {
        let types = vec![
            ComplexTypeDefinition::named("XdStringType"),
            ComplexTypeDefinition::named("PatientNameExtended").extending("sdc4:XdStringType"),
        ];

        let result = check_schema_compliance(&types);
        assert!(!result.is_compliant);
        assert_eq!(result.violations.len(), 1);

        let violation = &result.violations[0];
        assert_eq!(violation.type_name.as_deref(), Some("PatientNameExtended"));
        assert!(violation.message.contains("xsd:extension"));
        assert!(violation.message.contains("XdStringType"));
        assert!(violation.message.contains("xsd:restriction"));
    }

    #[test]
    fn test_restriction_and_none_pass() {
        let types = vec![
            ComplexTypeDefinition::named("Base"),
            ComplexTypeDefinition::named("Narrowed").restricting("Base"),
        ];
        let result = check_schema_compliance(&types);
        assert!(result.is_compliant);
        assert!(result.violations.is_empty());
        assert!(assert_schema_compliance(&types).is_ok());
    }

    #[test]
    fn test_nested_anonymous_extension_is_reported() {
        let types = vec![ComplexTypeDefinition::named("Outer").with_nested(
            ComplexTypeDefinition::anonymous("/schema/complexType[@name='Outer']/sequence/element[@name='inner']/complexType")
                .extending("Base"),
        )];

        let result = check_schema_compliance(&types);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].type_name, None);
        assert!(result.violations[0].message.contains("anonymous type"));
    }

    #[test]
    fn test_violations_follow_declaration_order() {
        let types = vec![
            ComplexTypeDefinition::named("B").extending("X"),
            ComplexTypeDefinition::named("A")
                .with_nested(ComplexTypeDefinition::anonymous("/inner").extending("Y")),
            ComplexTypeDefinition::named("C").extending("Z"),
        ];

        let bases: Vec<_> = check_schema_compliance(&types)
            .violations
            .into_iter()
            .map(|v| v.base_type.unwrap())
            .collect();
        assert_eq!(bases, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_assert_carries_all_violations() {
        let types = vec![
            ComplexTypeDefinition::named("A").extending("X"),
            ComplexTypeDefinition::named("B").extending("Y"),
        ];
        let err = assert_schema_compliance(&types).unwrap_err();
        assert_eq!(err.violations, check_schema_compliance(&types).violations);

        let message = err.to_string();
        assert!(message.contains("violates SDC4 compliance"));
        assert!(message.contains("SDC4 Principle:"));
        assert!(message.contains("separation of structure and semantics"));
    }

    #[test]
    fn test_scope_skips_foreign_namespaces() {
        let schema = CompiledSchema {
            target_namespace: Some("http://example.com/other".to_string()),
            complex_types: vec![ComplexTypeDefinition::named("A").extending("X")],
        };

        assert!(ComplianceChecker::default().check_schema(&schema).is_compliant);
        assert!(!ComplianceChecker::new(ComplianceScope::AllSchemas)
            .check_schema(&schema)
            .is_compliant);

        let sdc4 = CompiledSchema {
            target_namespace: Some(SDC4_NAMESPACE.to_string()),
            ..schema
        };
        let err = ComplianceChecker::default()
            .assert_schema(&sdc4, Some("dm.xsd"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Schema 'dm.xsd' violates SDC4 compliance"));
    }
}
