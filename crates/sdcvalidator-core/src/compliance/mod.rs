//! SDC4 schema compliance checking
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

pub mod checker;
pub mod error;
pub mod types;

pub use checker::{assert_schema_compliance, check_schema_compliance, ComplianceChecker, ComplianceScope};
pub use error::{ComplianceResult, ComplianceViolation, SchemaComplianceError};
pub use types::{CompiledSchema, ComplexTypeDefinition, DerivationMethod, TypeWalk};
