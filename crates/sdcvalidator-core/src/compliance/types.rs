//! Compiled type graph consumed by the compliance checker
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use crate::constants::SDC4_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a complex type relates to its base type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationMethod {
    /// No base type
    #[default]
    None,
    /// Adds content or attributes to the base type
    Extension,
    /// Narrows the base type
    Restriction,
}

impl fmt::Display for DerivationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DerivationMethod::None => "none",
            DerivationMethod::Extension => "extension",
            DerivationMethod::Restriction => "restriction",
        };
        f.write_str(name)
    }
}

/// One complex type definition, named or anonymous.
///
/// Anonymous types declared inside this one are kept in `nested`, in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexTypeDefinition {
    /// `None` for anonymous (inline) types
    pub name: Option<String>,
    pub derivation: DerivationMethod,
    /// QName of the base type when derived
    pub base_type: Option<String>,
    /// Element path of the definition within the schema document
    pub location: String,
    /// 1-based line of the definition, when known
    pub line: Option<usize>,
    #[serde(default)]
    pub nested: Vec<ComplexTypeDefinition>,
}

impl ComplexTypeDefinition {
    /// A named type with no derivation
    pub fn named<N: Into<String>>(name: N) -> Self {
        let name = name.into();
        Self {
            location: format!("/schema/complexType[@name='{}']", name),
            name: Some(name),
            derivation: DerivationMethod::None,
            base_type: None,
            line: None,
            nested: Vec::new(),
        }
    }

    /// An anonymous type at `location` with no derivation
    pub fn anonymous<L: Into<String>>(location: L) -> Self {
        Self {
            name: None,
            derivation: DerivationMethod::None,
            base_type: None,
            location: location.into(),
            line: None,
            nested: Vec::new(),
        }
    }

    pub fn extending<B: Into<String>>(mut self, base: B) -> Self {
        self.derivation = DerivationMethod::Extension;
        self.base_type = Some(base.into());
        self
    }

    pub fn restricting<B: Into<String>>(mut self, base: B) -> Self {
        self.derivation = DerivationMethod::Restriction;
        self.base_type = Some(base.into());
        self
    }

    pub fn with_nested(mut self, nested: ComplexTypeDefinition) -> Self {
        self.nested.push(nested);
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Name for messages, `"anonymous type"` when unnamed
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous type")
    }

    /// This definition followed by every nested definition, pre-order
    pub fn walk(&self) -> TypeWalk<'_> {
        TypeWalk { stack: vec![self] }
    }
}

/// Pre-order, declaration-order traversal over a type and its nested types
pub struct TypeWalk<'a> {
    stack: Vec<&'a ComplexTypeDefinition>,
}

impl<'a> TypeWalk<'a> {
    /// Walk a whole list of top-level definitions in order
    pub fn over(types: &'a [ComplexTypeDefinition]) -> Self {
        Self {
            stack: types.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for TypeWalk<'a> {
    type Item = &'a ComplexTypeDefinition;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack.extend(current.nested.iter().rev());
        Some(current)
    }
}

/// The part of a compiled schema the compliance checker needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSchema {
    pub target_namespace: Option<String>,
    /// Top-level complex types in declaration order, including anonymous
    /// types of global elements
    pub complex_types: Vec<ComplexTypeDefinition>,
}

impl CompiledSchema {
    pub fn is_sdc4(&self) -> bool {
        self.target_namespace.as_deref() == Some(SDC4_NAMESPACE)
    }

    /// Every complex type in declaration order
    pub fn all_types(&self) -> TypeWalk<'_> {
        TypeWalk::over(&self.complex_types)
    }
}
