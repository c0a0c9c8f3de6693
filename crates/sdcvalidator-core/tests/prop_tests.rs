//! Property-based tests for classification and compliance checking
//!
//! These tests verify that the classifier and the compliance checker hold
//! their guarantees across a wide range of inputs.

use proptest::prelude::*;
use sdcvalidator_core::{
    assert_schema_compliance, check_schema_compliance, classify, classify_all, ComplexTypeDefinition,
    DerivationMethod, ErrorClassifier, ErrorTier, RawValidationError,
};

/// Validator kinds that match a structural rule
const STRUCTURAL_KINDS: &[&str] = &[
    "unexpected-element",
    "unexpected-attribute",
    "undeclared-wildcard",
    "prohibited-attribute",
    "min-occurs",
    "max-occurs",
    "occurrence",
    "max-occurrence",
    "missing-required",
    "missing-element",
    "incomplete-content",
    "sequence-order",
    "choice",
    "group",
];

/// Value-level failures whose kinds share words with structural conditions
const VALUE_LEVEL_KINDS: &[&str] = &[
    "value-not-allowed",
    "fixed-value-not-allowed",
    "nil-not-allowed",
    "missing-value",
    "required-value",
];

fn structural_kind_strategy() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(STRUCTURAL_KINDS)
}

/// Validator kinds that match a semantic rule
fn semantic_kind_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("type"),
        Just("decode"),
        Just("pattern"),
        Just("max-length"),
        Just("min-inclusive"),
        Just("total-digits"),
        Just("enumeration"),
    ]
}

/// Arbitrary validator kind, recognized or not
fn any_kind_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        structural_kind_strategy().prop_map(str::to_string),
        semantic_kind_strategy().prop_map(str::to_string),
        "[a-zA-Z_ .-]{0,30}",
    ]
}

/// Kinds built from letters that cannot spell any structural marker
fn unrecognized_kind_strategy() -> impl Strategy<Value = String> {
    "[vwxyzbhjk]{0,20}"
}

fn raw_error_strategy() -> impl Strategy<Value = RawValidationError> {
    (
        any_kind_strategy(),
        any_kind_strategy(),
        proptest::option::of("(/[a-z]{1,8}){1,4}"),
        proptest::option::of("[a-zA-Z0-9 ]{0,40}"),
    )
        .prop_map(|(kind, component, path, reason)| RawValidationError {
            reason,
            path,
            schema_component_kind: component,
            validator_kind: kind,
        })
}

/// Named or anonymous types nested up to three levels, each with a random derivation
fn type_tree_strategy() -> impl Strategy<Value = ComplexTypeDefinition> {
    let leaf = (proptest::option::of("[A-Z][a-zA-Z]{0,10}"), 0u8..3).prop_map(|(name, derivation)| {
        let definition = match name {
            Some(name) => ComplexTypeDefinition::named(name),
            None => ComplexTypeDefinition::anonymous("/schema/element/complexType"),
        };
        match derivation {
            0 => definition,
            1 => definition.restricting("sdc4:XdStringType"),
            _ => definition.extending("sdc4:XdStringType"),
        }
    });

    leaf.prop_recursive(3, 20, 4, |inner| {
        (inner.clone(), proptest::collection::vec(inner, 0..4)).prop_map(|(mut parent, children)| {
            parent.nested.extend(children);
            parent
        })
    })
}

proptest! {
    #[test]
    fn classification_is_total(error in raw_error_strategy()) {
        let tier = classify(&error);
        prop_assert!(tier == ErrorTier::Structural || tier == ErrorTier::Semantic);
        prop_assert_eq!(ErrorClassifier::new().categorize(&error).tier(), tier);
    }

    #[test]
    fn partition_is_complete_and_ordered(errors in proptest::collection::vec(raw_error_strategy(), 0..30)) {
        let result = classify_all(errors.clone());

        prop_assert_eq!(
            result.structural_errors().len() + result.semantic_errors().len(),
            errors.len()
        );

        let expected_structural: Vec<_> = errors
            .iter()
            .filter(|e| classify(e) == ErrorTier::Structural)
            .cloned()
            .collect();
        let expected_semantic: Vec<_> = errors
            .iter()
            .filter(|e| classify(e) == ErrorTier::Semantic)
            .cloned()
            .collect();

        let structural: Vec<_> = result.structural_errors().iter().map(|c| c.error.clone()).collect();
        let semantic: Vec<_> = result.semantic_errors().iter().map(|c| c.error.clone()).collect();

        prop_assert_eq!(structural, expected_structural);
        prop_assert_eq!(semantic, expected_semantic);
        prop_assert_eq!(result.is_valid(), errors.is_empty());
    }

    #[test]
    fn structural_kinds_win_over_any_component(
        kind in structural_kind_strategy(),
        component in any_kind_strategy(),
    ) {
        let error = RawValidationError::new(kind).with_component(component);
        prop_assert_eq!(classify(&error), ErrorTier::Structural);
    }

    #[test]
    fn semantic_kinds_stay_semantic(kind in semantic_kind_strategy()) {
        prop_assert_eq!(classify(&RawValidationError::new(kind)), ErrorTier::Semantic);
    }

    #[test]
    fn value_level_kinds_are_semantic(
        kind in proptest::sample::select(VALUE_LEVEL_KINDS),
        component in any_kind_strategy(),
    ) {
        let error = RawValidationError::new(kind).with_component(component);
        prop_assert_eq!(classify(&error), ErrorTier::Semantic);
    }

    #[test]
    fn unrecognized_kinds_are_semantic(
        kind in unrecognized_kind_strategy(),
        component in any_kind_strategy(),
    ) {
        let error = RawValidationError::new(kind).with_component(component);
        prop_assert_eq!(classify(&error), ErrorTier::Semantic);
    }

    #[test]
    fn assert_agrees_with_check(types in proptest::collection::vec(type_tree_strategy(), 0..5)) {
        let checked = check_schema_compliance(&types);
        let extending = types
            .iter()
            .flat_map(|t| t.walk())
            .filter(|t| t.derivation == DerivationMethod::Extension)
            .count();

        prop_assert_eq!(checked.violations.len(), extending);
        prop_assert_eq!(checked.is_compliant, extending == 0);

        match assert_schema_compliance(&types) {
            Ok(()) => prop_assert!(checked.is_compliant),
            Err(err) => {
                prop_assert!(!checked.is_compliant);
                prop_assert_eq!(err.violations, checked.violations);
            }
        }
    }
}

#[test]
fn single_extension_yields_one_violation() {
    let types = vec![
        ComplexTypeDefinition::named("Restricted").restricting("sdc4:XdStringType"),
        ComplexTypeDefinition::named("PatientNameExtended").extending("sdc4:XdStringType"),
        ComplexTypeDefinition::named("Plain"),
    ];

    let result = check_schema_compliance(&types);
    assert!(!result.is_compliant);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].type_name.as_deref(), Some("PatientNameExtended"));
}

#[test]
fn restriction_only_schema_is_compliant() {
    let types = vec![
        ComplexTypeDefinition::named("A").restricting("sdc4:XdStringType"),
        ComplexTypeDefinition::named("B")
            .with_nested(ComplexTypeDefinition::anonymous("/schema/complexType[@name='B']/sequence/element/complexType")),
    ];

    let result = check_schema_compliance(&types);
    assert!(result.is_compliant);
    assert!(result.violations.is_empty());
    assert!(assert_schema_compliance(&types).is_ok());
}
