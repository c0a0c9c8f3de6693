//! Namespace URIs used across SDC4 validation

/// Target namespace of SDC4 reference and data models
pub const SDC4_NAMESPACE: &str = "https://semanticdatacharter.com/ns/sdc4/";

/// W3C XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
