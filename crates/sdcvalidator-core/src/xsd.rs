//! XSD reader producing the compiled type graph for compliance checks
//!
//! Only the parts of a schema document the compliance checker needs are
//! read: the target namespace and every `complexType` with its derivation
//! method and nested anonymous types. Elements outside the XML Schema
//! namespace (for example `xs:appinfo` payloads) are skipped.
//!
//! Copyright (c) 2025 Semantic Data Charter Foundation
//! Licensed under the Apache-2.0 license

use crate::compliance::{CompiledSchema, ComplexTypeDefinition, DerivationMethod};
use crate::constants::XSD_NAMESPACE;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a schema document
#[derive(Debug, Error)]
pub enum XsdError {
    #[error("Schema file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse schema: {message} at byte {position}")]
    Syntax { message: String, position: u64 },

    #[error("Failed to parse schema: root element <{root}> is not xs:schema")]
    NotASchema { root: String },

    #[error("Failed to parse schema: document has no root element")]
    EmptyDocument,
}

/// Read a schema document from a file
pub fn read_schema_file(path: &Path) -> Result<CompiledSchema, XsdError> {
    let source = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            XsdError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            XsdError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    debug!(path = %path.display(), bytes = source.len(), "Reading schema");
    read_schema_str(&source)
}

/// Read a schema document from a string
pub fn read_schema_str(source: &str) -> Result<CompiledSchema, XsdError> {
    SchemaReader::new(source).read()
}

/// An open element on the reader stack
struct Frame {
    local: String,
    is_xsd: bool,
    /// Path step, e.g. `element[@name='Root']`
    step: String,
    /// Whether this element pushed onto the type stack
    opens_type: bool,
}

/// Attributes of a start tag relevant to the reader
#[derive(Default)]
struct StartTag {
    prefix: Option<String>,
    local: String,
    name: Option<String>,
    base: Option<String>,
    target_namespace: Option<String>,
}

struct SchemaReader<'a> {
    reader: NsReader<&'a [u8]>,
    lines: LineIndex,
    frames: Vec<Frame>,
    open_types: Vec<ComplexTypeDefinition>,
    schema: CompiledSchema,
    saw_root: bool,
}

impl<'a> SchemaReader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            reader: NsReader::from_str(source),
            lines: LineIndex::new(source),
            frames: Vec::new(),
            open_types: Vec::new(),
            schema: CompiledSchema::default(),
            saw_root: false,
        }
    }

    fn read(mut self) -> Result<CompiledSchema, XsdError> {
        loop {
            let event_start = self.reader.buffer_position() as usize;

            let next = self
                .reader
                .read_resolved_event()
                .map(|(resolved, event)| (in_xsd_namespace(resolved), event));
            let (namespace, event) = match next {
                Ok(pair) => pair,
                Err(e) => {
                    return Err(XsdError::Syntax {
                        message: e.to_string(),
                        position: self.reader.error_position(),
                    });
                }
            };

            match event {
                Event::Start(e) => self.open(&e, namespace, event_start)?,
                Event::Empty(e) => {
                    self.open(&e, namespace, event_start)?;
                    self.close();
                }
                Event::End(_) => self.close(),
                Event::Eof => break,
                // Text, comments, PIs, declarations and doctype carry no type information
                _ => {}
            }
        }

        if !self.saw_root {
            return Err(XsdError::EmptyDocument);
        }
        if let Some(frame) = self.frames.last() {
            return Err(XsdError::Syntax {
                message: format!("unclosed element <{}>", frame.local),
                position: self.reader.buffer_position(),
            });
        }

        debug!(
            target_namespace = self.schema.target_namespace.as_deref().unwrap_or(""),
            top_level_types = self.schema.complex_types.len(),
            "Read schema type graph"
        );
        Ok(self.schema)
    }

    /// `namespace` is whether the tag resolved to the XSD namespace, or the unbound prefix
    fn open(
        &mut self,
        e: &BytesStart<'_>,
        namespace: Result<bool, String>,
        event_start: usize,
    ) -> Result<(), XsdError> {
        let is_xsd = namespace.map_err(|prefix| XsdError::Syntax {
            message: format!("unbound namespace prefix '{}'", prefix),
            position: event_start as u64,
        })?;
        let tag = parse_start(e, event_start)?;

        if self.frames.is_empty() {
            if self.saw_root {
                return Err(XsdError::Syntax {
                    message: "multiple root elements".to_string(),
                    position: event_start as u64,
                });
            }
            if !(is_xsd && tag.local == "schema") {
                let root = match &tag.prefix {
                    Some(prefix) => format!("{}:{}", prefix, tag.local),
                    None => tag.local.clone(),
                };
                return Err(XsdError::NotASchema { root });
            }
            self.saw_root = true;
            self.schema.target_namespace = tag.target_namespace.clone();
        }

        let step = match &tag.name {
            Some(name) => format!("{}[@name='{}']", tag.local, name),
            None => tag.local.clone(),
        };

        let mut opens_type = false;
        if is_xsd {
            match tag.local.as_str() {
                "complexType" => {
                    let location = self.path_with(&step);
                    let line = self.lines.line_of(event_start);
                    self.open_types.push(ComplexTypeDefinition {
                        name: tag.name.clone(),
                        derivation: DerivationMethod::None,
                        base_type: None,
                        location,
                        line: Some(line),
                        nested: Vec::new(),
                    });
                    opens_type = true;
                }
                "extension" | "restriction" if self.in_type_content() => {
                    if let Some(current) = self.open_types.last_mut() {
                        current.derivation = if tag.local == "extension" {
                            DerivationMethod::Extension
                        } else {
                            DerivationMethod::Restriction
                        };
                        current.base_type = tag.base.clone();
                    }
                }
                _ => {}
            }
        }

        self.frames.push(Frame {
            local: tag.local,
            is_xsd,
            step,
            opens_type,
        });
        Ok(())
    }

    fn close(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        if !frame.opens_type {
            return;
        }
        if let Some(finished) = self.open_types.pop() {
            match self.open_types.last_mut() {
                Some(parent) => parent.nested.push(finished),
                None => self.schema.complex_types.push(finished),
            }
        }
    }

    /// Parent is `complexContent`/`simpleContent` directly inside a `complexType`
    fn in_type_content(&self) -> bool {
        let n = self.frames.len();
        if n < 2 {
            return false;
        }
        let parent = &self.frames[n - 1];
        let grandparent = &self.frames[n - 2];
        parent.is_xsd
            && matches!(parent.local.as_str(), "complexContent" | "simpleContent")
            && grandparent.is_xsd
            && grandparent.local == "complexType"
    }

    fn path_with(&self, step: &str) -> String {
        let mut path = String::new();
        for frame in &self.frames {
            path.push('/');
            path.push_str(&frame.step);
        }
        path.push('/');
        path.push_str(step);
        path
    }
}

fn in_xsd_namespace(resolved: ResolveResult<'_>) -> Result<bool, String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(uri == XSD_NAMESPACE.as_bytes()),
        ResolveResult::Unbound => Ok(false),
        ResolveResult::Unknown(prefix) => Err(String::from_utf8_lossy(&prefix).into_owned()),
    }
}

fn parse_start(e: &BytesStart<'_>, event_start: usize) -> Result<StartTag, XsdError> {
    let syntax = |message: String| XsdError::Syntax {
        message,
        position: event_start as u64,
    };

    let full_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let (prefix, local) = split_qname(&full_name);
    let mut tag = StartTag {
        prefix: prefix.map(str::to_string),
        local: local.to_string(),
        ..StartTag::default()
    };

    for attr in e.attributes() {
        let attr = attr.map_err(|err| syntax(format!("invalid attribute: {}", err)))?;
        let slot = match attr.key.as_ref() {
            b"name" => &mut tag.name,
            b"base" => &mut tag.base,
            b"targetNamespace" => &mut tag.target_namespace,
            _ => continue,
        };
        let value = attr
            .unescape_value()
            .map_err(|err| syntax(format!("invalid attribute value: {}", err)))?;
        *slot = Some(value.into_owned());
    }

    Ok(tag)
}

fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// Byte offset to 1-based line lookup
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SDC4_NAMESPACE;

    const SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:sdc4="https://semanticdatacharter.com/ns/sdc4/"
           targetNamespace="https://semanticdatacharter.com/ns/sdc4/">
  <xs:complexType name="XdStringType">
    <xs:sequence>
      <xs:element name="xdstring-value" type="xs:string"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="PatientName">
    <xs:complexContent>
      <xs:restriction base="sdc4:XdStringType">
        <xs:sequence>
          <xs:element name="xdstring-value">
            <xs:simpleType>
              <xs:restriction base="xs:string"/>
            </xs:simpleType>
          </xs:element>
        </xs:sequence>
      </xs:restriction>
    </xs:complexContent>
  </xs:complexType>
  <xs:element name="Root">
    <xs:complexType>
      <xs:complexContent>
        <xs:extension base="sdc4:XdStringType"/>
      </xs:complexContent>
    </xs:complexType>
  </xs:element>
</xs:schema>
"#;

    #[test]
    fn test_reads_types_in_declaration_order() {
        let schema = read_schema_str(SCHEMA).unwrap();
        assert_eq!(schema.target_namespace.as_deref(), Some(SDC4_NAMESPACE));
        assert!(schema.is_sdc4());

        let types: Vec<_> = schema.all_types().collect();
        assert_eq!(types.len(), 3);

        assert_eq!(types[0].name.as_deref(), Some("XdStringType"));
        assert_eq!(types[0].derivation, DerivationMethod::None);
        assert_eq!(types[0].line, Some(5));

        assert_eq!(types[1].name.as_deref(), Some("PatientName"));
        assert_eq!(types[1].derivation, DerivationMethod::Restriction);
        assert_eq!(types[1].base_type.as_deref(), Some("sdc4:XdStringType"));

        assert_eq!(types[2].name, None);
        assert_eq!(types[2].derivation, DerivationMethod::Extension);
        assert_eq!(types[2].location, "/schema/element[@name='Root']/complexType");
    }

    #[test]
    fn test_simple_type_restriction_does_not_mark_enclosing_type() {
        let schema = read_schema_str(
            r#"<schema xmlns="http://www.w3.org/2001/XMLSchema">
                 <complexType name="Holder">
                   <attribute name="code">
                     <simpleType><restriction base="string"/></simpleType>
                   </attribute>
                 </complexType>
               </schema>"#,
        )
        .unwrap();

        let holder = &schema.complex_types[0];
        assert_eq!(holder.derivation, DerivationMethod::None);
        assert_eq!(schema.target_namespace, None);
    }

    #[test]
    fn test_nested_anonymous_types_attach_to_parent() {
        let schema = read_schema_str(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                 <xs:complexType name="Outer">
                   <xs:sequence>
                     <xs:element name="inner">
                       <xs:complexType>
                         <xs:simpleContent><xs:extension base="xs:string"/></xs:simpleContent>
                       </xs:complexType>
                     </xs:element>
                   </xs:sequence>
                 </xs:complexType>
               </xs:schema>"#,
        )
        .unwrap();

        assert_eq!(schema.complex_types.len(), 1);
        let outer = &schema.complex_types[0];
        assert_eq!(outer.derivation, DerivationMethod::None);
        assert_eq!(outer.nested.len(), 1);
        assert_eq!(outer.nested[0].derivation, DerivationMethod::Extension);
        assert_eq!(
            outer.nested[0].location,
            "/schema/complexType[@name='Outer']/sequence/element[@name='inner']/complexType"
        );
    }

    #[test]
    fn test_foreign_namespace_elements_are_ignored() {
        let schema = read_schema_str(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:x="urn:other">
                 <xs:annotation><xs:appinfo><x:complexType name="NotAType"/></xs:appinfo></xs:annotation>
               </xs:schema>"#,
        )
        .unwrap();
        assert!(schema.complex_types.is_empty());
    }

    #[test]
    fn test_prefix_rebinding_is_scoped() {
        let schema = read_schema_str(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                 <xs:annotation>
                   <xs:appinfo>
                     <xs:complexType xmlns:xs="urn:not-xsd" name="Shadowed"/>
                   </xs:appinfo>
                 </xs:annotation>
                 <xs:complexType name="Real"/>
               </xs:schema>"#,
        )
        .unwrap();

        assert_eq!(schema.complex_types.len(), 1);
        assert_eq!(schema.complex_types[0].name.as_deref(), Some("Real"));
    }

    #[test]
    fn test_unbound_prefix_is_a_syntax_error() {
        let err = read_schema_str(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"><ex:complexType/></xs:schema>"#,
        )
        .unwrap_err();
        assert!(matches!(err, XsdError::Syntax { ref message, .. } if message.contains("'ex'")));
    }

    #[test]
    fn test_rejects_non_schema_root() {
        let err = read_schema_str("<invalid/>").unwrap_err();
        assert!(matches!(err, XsdError::NotASchema { ref root } if root == "invalid"));
    }

    #[test]
    fn test_rejects_malformed_xml() {
        let err = read_schema_str(r#"<?xml version="1.0"?><invalid><unclosed>"#).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("parse"));

        assert!(matches!(read_schema_str("").unwrap_err(), XsdError::EmptyDocument));
    }

    #[test]
    fn test_missing_file() {
        let err = read_schema_file(Path::new("/path/to/nonexistent.xsd")).unwrap_err();
        assert!(matches!(err, XsdError::NotFound { .. }));
        assert!(err.to_string().to_lowercase().contains("not found"));
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 2);
        assert_eq!(index.line_of(3), 2);
        assert_eq!(index.line_of(5), 3);
        assert_eq!(index.line_of(6), 4);
    }
}
