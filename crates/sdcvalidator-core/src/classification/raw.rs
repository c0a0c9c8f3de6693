//! Raw validation failures as handed over by an external schema engine
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// One schema-rule violation reported by the instance engine.
///
/// Only the two descriptive kind fields drive classification; `reason` and
/// `path` are carried through to reports untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawValidationError {
    /// Human-readable message from the engine
    #[serde(default)]
    pub reason: Option<String>,
    /// Location of the violation in the document (element path)
    #[serde(default)]
    pub path: Option<String>,
    /// Schema construct that triggered the failure, e.g. `element`, `facet`
    #[serde(default)]
    pub schema_component_kind: String,
    /// Class of schema rule that fired, e.g. `unexpected-element`, `min-occurs`
    #[serde(default)]
    pub validator_kind: String,
}

impl RawValidationError {
    /// Create an error from its validator kind, with every other field empty
    pub fn new<K: Into<String>>(validator_kind: K) -> Self {
        Self {
            reason: None,
            path: None,
            schema_component_kind: String::new(),
            validator_kind: validator_kind.into(),
        }
    }

    pub fn with_reason<R: Into<String>>(mut self, reason: R) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_component<C: Into<String>>(mut self, component: C) -> Self {
        self.schema_component_kind = component.into();
        self
    }

    /// Validator kind in canonical form, see [`normalize_kind`]
    pub fn normalized_validator_kind(&self) -> String {
        normalize_kind(&self.validator_kind)
    }

    /// Component kind in canonical form, see [`normalize_kind`]
    pub fn normalized_component_kind(&self) -> String {
        normalize_kind(&self.schema_component_kind)
    }

    /// Local name of the element the path points at.
    ///
    /// `/ns:DataModel/ns:xdstring-value[1]` yields `xdstring-value`.
    pub fn element_name(&self) -> Option<&str> {
        let path = self.path.as_deref()?;
        let last = path.trim_matches('/').rsplit('/').next()?;
        let local = last.rsplit(':').next().unwrap_or(last);
        let name = match local.find('[') {
            Some(idx) => &local[..idx],
            None => local,
        };
        (!name.is_empty()).then_some(name)
    }
}

impl fmt::Display for RawValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.path.as_deref().unwrap_or("unknown"),
            self.reason.as_deref().unwrap_or("No reason provided")
        )
    }
}

/// Canonical spelling for engine-supplied kind strings.
///
/// ASCII-lowercases and maps `_`, `.` and whitespace to `-`, so
/// `MinOccurs`, `min_occurs` and `min occurs` compare the same way.
pub fn normalize_kind(kind: &str) -> String {
    kind.trim()
        .chars()
        .map(|c| match c {
            '_' | '.' => '-',
            c if c.is_whitespace() => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
