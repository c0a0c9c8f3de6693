//! Error stream format emitted by external instance engines
//!
//! An error stream is either a JSON/YAML array of records or an object with
//! an `errors` array. Records that lack a `validator_kind` get one inferred
//! here from the engine's other descriptive data, so the classifier only
//! ever has to look at the two kind fields.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use crate::classification::RawValidationError;
use serde::{Deserialize, Serialize};

/// One failure as written by an engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub validator_kind: Option<String>,
    #[serde(default)]
    pub schema_component_kind: Option<String>,
    /// Tag of an element the content model did not accept
    #[serde(default)]
    pub invalid_tag: Option<String>,
    /// The engine's own name for the failure class
    #[serde(default)]
    pub error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorStream {
    List(Vec<ErrorRecord>),
    Wrapped { errors: Vec<ErrorRecord> },
}

impl ErrorStream {
    fn into_records(self) -> Vec<ErrorRecord> {
        match self {
            ErrorStream::List(records) => records,
            ErrorStream::Wrapped { errors } => errors,
        }
    }
}

/// Parse a JSON error stream, keeping record order
pub fn parse_json_stream(input: &str) -> Result<Vec<RawValidationError>, serde_json::Error> {
    let stream: ErrorStream = serde_json::from_str(input)?;
    Ok(stream.into_records().into_iter().map(RawValidationError::from).collect())
}

/// Parse a YAML error stream, keeping record order
pub fn parse_yaml_stream(input: &str) -> Result<Vec<RawValidationError>, serde_yaml::Error> {
    let stream: ErrorStream = serde_yaml::from_str(input)?;
    Ok(stream.into_records().into_iter().map(RawValidationError::from).collect())
}

impl From<ErrorRecord> for RawValidationError {
    fn from(record: ErrorRecord) -> Self {
        let validator_kind = match record.validator_kind.as_deref().map(str::trim) {
            Some(kind) if !kind.is_empty() => kind.to_string(),
            _ => infer_validator_kind(&record).to_string(),
        };

        RawValidationError {
            reason: record.reason,
            path: record.path,
            schema_component_kind: record.schema_component_kind.unwrap_or_default(),
            validator_kind,
        }
    }
}

/// Reason phrases engines use for undeclared children
const UNEXPECTED_PHRASES: &[&str] = &[
    "unexpected child",
    "element not allowed",
    "not permitted here",
    "unknown element",
    "invalid child",
];

const FACET_PHRASES: &[&str] = &[
    "length",
    "mininclusive",
    "maxinclusive",
    "minexclusive",
    "maxexclusive",
    "totaldigits",
    "fractiondigits",
    "out of range",
    "too long",
    "too short",
    "constraint violated",
];

const TYPE_PHRASES: &[&str] = &[
    "not a valid value",
    "cannot be converted",
    "invalid literal",
    "decode",
];

/// Best-effort validator kind for a record that did not state one
pub fn infer_validator_kind(record: &ErrorRecord) -> &'static str {
    if record.invalid_tag.is_some() {
        return "unexpected-element";
    }

    let reason = record.reason.as_deref().unwrap_or("").to_lowercase();
    let error_type = record.error_type.as_deref().unwrap_or("").to_lowercase();

    if reason.contains("not complete") {
        return "incomplete-content";
    }
    if reason.contains("occurs") {
        if reason.contains("minimum") {
            return "min-occurs";
        }
        if reason.contains("maximum") {
            return "max-occurs";
        }
    }
    if UNEXPECTED_PHRASES.iter().any(|p| reason.contains(p)) {
        return "unexpected-element";
    }
    if reason.contains("enumeration") {
        return "enumeration";
    }
    if reason.contains("pattern") {
        return "pattern";
    }
    if FACET_PHRASES.iter().any(|p| reason.contains(p)) {
        return "facet";
    }
    if TYPE_PHRASES.iter().any(|p| reason.contains(p)) || error_type.contains("decode") {
        return "type";
    }
    "unrecognized"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{classify, ErrorTier};

    fn record(reason: &str) -> ErrorRecord {
        ErrorRecord {
            reason: Some(reason.to_string()),
            ..ErrorRecord::default()
        }
    }

    #[test]
    fn test_explicit_kind_is_kept() {
        let raw = RawValidationError::from(ErrorRecord {
            validator_kind: Some("Enumeration".to_string()),
            invalid_tag: Some("{urn:x}Bad".to_string()),
            ..ErrorRecord::default()
        });
        assert_eq!(raw.validator_kind, "Enumeration");
    }

    #[test]
    fn test_inference_from_engine_data() {
        let with_tag = ErrorRecord {
            invalid_tag: Some("{http://example.com}UnknownTag".to_string()),
            ..record("Unexpected child with tag 'UnknownTag'")
        };
        assert_eq!(infer_validator_kind(&with_tag), "unexpected-element");

        let cases = [
            ("The content of element 'Root' is not complete", "incomplete-content"),
            ("The particle 'element' occurs 0 times but the minimum is 1", "min-occurs"),
            ("The particle 'element' occurs 3 times but the maximum is 2", "max-occurs"),
            ("value not in enumeration ['option1', 'option2']", "enumeration"),
            ("does not match pattern '[0-9]+'", "pattern"),
            ("length constraint violated: maxLength is 10", "facet"),
            ("not a valid value for type xs:integer", "type"),
            ("cannot be converted to integer", "type"),
            ("something odd happened", "unrecognized"),
        ];
        for (reason, kind) in cases {
            assert_eq!(infer_validator_kind(&record(reason)), kind, "{reason}");
        }

        assert_eq!(infer_validator_kind(&ErrorRecord::default()), "unrecognized");
    }

    #[test]
    fn test_inferred_kinds_classify_like_engine_intent() {
        let structural = RawValidationError::from(record("The particle 'x' occurs 0 times but the minimum is 1"));
        assert_eq!(classify(&structural), ErrorTier::Structural);

        let semantic = RawValidationError::from(record("not a valid value for type xs:integer"));
        assert_eq!(classify(&semantic), ErrorTier::Semantic);

        let unknown = RawValidationError::from(ErrorRecord::default());
        assert_eq!(classify(&unknown), ErrorTier::Semantic);
    }

    #[test]
    fn test_parse_json_list_and_wrapped() {
        let list = r#"[
            {"validator_kind": "unexpected-element", "path": "/Root/Foo"},
            {"reason": "value not in enumeration", "path": "/Root/Bar"}
        ]"#;
        let errors = parse_json_stream(list).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].validator_kind, "enumeration");
        assert_eq!(errors[1].path.as_deref(), Some("/Root/Bar"));

        let wrapped = r#"{"errors": [{"validator_kind": "min-occurs"}]}"#;
        let errors = parse_json_stream(wrapped).unwrap();
        assert_eq!(errors[0].validator_kind, "min-occurs");

        assert!(parse_json_stream("{\"nope\": 1}").is_err());
    }

    #[test]
    fn test_parse_yaml_stream() {
        let yaml = "- validator_kind: pattern\n  path: /Root/Code\n  schema_component_kind: facet\n";
        let errors = parse_yaml_stream(yaml).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].schema_component_kind, "facet");
    }
}
