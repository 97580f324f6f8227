//! Minimal XML element tree built on quick-xml
//!
//! Manifests are small, so the pull events are folded into an owned tree that
//! the schema parsers can query. Element and attribute names are stored as
//! local names (namespace prefixes dropped); the default `xmlns` declaration is
//! kept so parsers can tell MSBuild 2003 projects from SDK-style ones.

use crate::error::ManifestError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// An XML element with its attributes, child elements and text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    fn from_start(path: &Path, start: &BytesStart<'_>) -> Result<Self, ManifestError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| ManifestError::xml_parse_error(path, e.to_string()))?;
            let key = if attr.key.as_ref() == b"xmlns" {
                "xmlns".to_string()
            } else {
                String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned()
            };
            let value = attr
                .unescape_value()
                .map_err(|e| ManifestError::xml_parse_error(path, e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Returns true if the element has the given local name (case-insensitive)
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns an attribute value by local name (case-insensitive, like MSBuild)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the default namespace declared on this element
    pub fn namespace(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == "xmlns")
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first direct child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(name))
    }

    /// Returns all descendants with the given name, in document order
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.is(name) {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }
}

/// Parse an XML document into its root element
pub fn parse_document(path: &Path, content: &str) -> Result<XmlElement, ManifestError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ManifestError::xml_parse_error(
                path,
                format!("{} at position {}", e, reader.error_position()),
            )
        })?;

        match event {
            Event::Start(start) => stack.push(XmlElement::from_start(path, &start)?),
            Event::Empty(start) => {
                let element = XmlElement::from_start(path, &start)?;
                attach(path, element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ManifestError::xml_parse_error(path, "unexpected end tag"))?;
                attach(path, element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| ManifestError::xml_parse_error(path, e.to_string()))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ManifestError::xml_parse_error(path, "unclosed element"));
    }
    root.ok_or_else(|| ManifestError::xml_parse_error(path, "document has no root element"))
}

fn attach(
    path: &Path,
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<(), ManifestError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ManifestError::xml_parse_error(
                path,
                "multiple root elements",
            ))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<XmlElement, ManifestError> {
        parse_document(Path::new("test.xml"), content)
    }

    #[test]
    fn test_parse_nested_elements() {
        let root = parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="Serilog" Version="2.10.0" />
    <PackageReference Include="xunit">
      <Version>2.4.1</Version>
    </PackageReference>
  </ItemGroup>
</Project>"#,
        )
        .unwrap();

        assert!(root.is("Project"));
        assert_eq!(root.attr("Sdk"), Some("Microsoft.NET.Sdk"));
        let refs = root.descendants("PackageReference");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].attr("include"), Some("Serilog"));
        assert_eq!(refs[1].child("Version").unwrap().text, "2.4.1");
    }

    #[test]
    fn test_namespace_and_prefixed_names() {
        let root = parse(
            r#"<Project ToolsVersion="15.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <x:Item xmlns:x="urn:x" x:Name="a" />
</Project>"#,
        )
        .unwrap();
        assert_eq!(
            root.namespace(),
            Some("http://schemas.microsoft.com/developer/msbuild/2003")
        );
        let item = root.child("Item").unwrap();
        assert_eq!(item.attr("Name"), Some("a"));
    }

    #[test]
    fn test_unescapes_entities() {
        let root = parse(r#"<packages><package id="A&amp;B" version="1.0" /></packages>"#).unwrap();
        assert_eq!(root.children[0].attr("id"), Some("A&B"));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let root = parse("\u{feff}<packages />").unwrap();
        assert!(root.is("packages"));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            parse("<Project><ItemGroup></Project>"),
            Err(ManifestError::XmlParseError { .. })
        ));
        assert!(parse("<Project>").is_err());
        assert!(parse("").is_err());
        assert!(parse("not xml at all").is_err());
    }
}
