//! Support for Android `strings.xml`.
//!
//! Top-level `<string>` elements and comments are kept in document order,
//! together with the empty lines between them. `<plurals>` and other
//! elements are skipped.

use std::io::{BufRead, Write};

use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::{
    error::Error,
    formats::xml::{self, ResourceAttributes, ResourcesWriter, TopLevel},
    traits::Parser,
    types::{ResourceRecord, ResourceSet},
};

/// Default indentation unit for generated files.
pub const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Format {
    /// Indentation unit used by [`Parser::to_writer`].
    #[serde(skip)]
    pub indent: String,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    /// Comment text without the surrounding spaces.
    Comment(String),
    /// A run of empty lines.
    Blank(usize),
    String(StringResource),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringResource {
    pub name: String,
    /// Raw inner XML.
    pub value: String,
    pub formatted: bool,
    pub translatable: bool,
    pub documentation: Option<String>,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            nodes: Vec::new(),
        }
    }
}

impl Format {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn strings(&self) -> impl Iterator<Item = &StringResource> {
        self.nodes.iter().filter_map(|node| match node {
            Node::String(s) => Some(s),
            _ => None,
        })
    }

    /// Fails on the first comment or value that would not be well-formed XML.
    pub fn check_markup(&self, locale: &str) -> Result<(), Error> {
        for node in &self.nodes {
            match node {
                Node::Comment(text) => xml::check_comment(text)
                    .map_err(|e| xml::ill_formed(&format!("comment `{}`", text), locale, e))?,
                Node::String(s) => xml::check_fragment(&s.value)
                    .map_err(|e| xml::ill_formed(&format!("string `{}`", s.name), locale, e))?,
                Node::Blank(_) => {}
            }
        }
        Ok(())
    }

    /// Builds the `strings.xml` content for one locale.
    ///
    /// Array records are left to `arrays.xml`. Strings without text are
    /// skipped, and so are untranslatable strings outside the default locale.
    /// With `keep_empty_rows` blank records become empty lines; without it an
    /// empty line separates each comment from what precedes it.
    pub fn from_resource_set(set: &ResourceSet, keep_empty_rows: bool) -> Self {
        let mut nodes = Vec::new();
        for record in set.iter().filter(|r| !r.is_array_item()) {
            if record.is_comment() {
                if !keep_empty_rows {
                    nodes.push(Node::Blank(1));
                }
                nodes.push(Node::Comment(record.name.clone()));
            } else if record.is_blank() {
                if keep_empty_rows {
                    push_blank(&mut nodes);
                }
            } else if let Some(resource) = StringResource::from_record(record, set.is_default()) {
                nodes.push(Node::String(resource));
            }
        }
        Self {
            indent: DEFAULT_INDENT.to_string(),
            nodes,
        }
    }
}

fn push_blank(nodes: &mut Vec<Node>) {
    if let Some(Node::Blank(count)) = nodes.last_mut() {
        *count += 1;
    } else {
        nodes.push(Node::Blank(1));
    }
}

impl StringResource {
    fn from_record(record: &ResourceRecord, is_default: bool) -> Option<Self> {
        let value = record.non_blank_value()?;
        if !record.flags.translatable && !is_default {
            return None;
        }
        Some(StringResource {
            name: record.name.clone(),
            value: value.to_string(),
            formatted: record.flags.formatted,
            translatable: record.flags.translatable,
            documentation: record
                .documentation
                .clone()
                .filter(|d| !d.trim().is_empty()),
        })
    }

    fn start_tag(&self) -> BytesStart<'_> {
        let mut elem = BytesStart::new("string");
        elem.push_attribute(("name", self.name.as_str()));
        if !self.formatted {
            elem.push_attribute(("formatted", "false"));
        }
        if !self.translatable {
            elem.push_attribute(("translatable", "false"));
        }
        if let Some(documentation) = &self.documentation {
            elem.push_attribute(("documentation", documentation.as_str()));
        }
        elem
    }
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let mut nodes = Vec::new();
        xml::for_each_top_level(&content, |node, xml_reader| {
            match node {
                TopLevel::Comment(text) => nodes.push(Node::Comment(text)),
                TopLevel::Blank(count) => nodes.push(Node::Blank(count)),
                TopLevel::Element { start, empty } if start.name().as_ref() == b"string" => {
                    let mut attrs = ResourceAttributes::parse(&start)?;
                    let name = attrs.require_name("string")?;
                    let value = xml::read_inner(xml_reader, &start, empty)?;
                    nodes.push(Node::String(StringResource {
                        name,
                        value,
                        formatted: xml::flag(attrs.formatted.as_deref()),
                        translatable: xml::flag(attrs.translatable.as_deref()),
                        documentation: attrs.documentation,
                    }));
                }
                TopLevel::Element { start, empty } => xml::skip(xml_reader, &start, empty)?,
            }
            Ok(())
        })?;

        Ok(Format {
            indent: DEFAULT_INDENT.to_string(),
            nodes,
        })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut out = ResourcesWriter::begin(writer, &self.indent)?;
        for node in &self.nodes {
            match node {
                Node::Comment(text) => out.comment(text)?,
                Node::Blank(count) => out.blank_lines(*count)?,
                Node::String(resource) => out.element(1, resource.start_tag(), &resource.value)?,
            }
        }
        out.finish()
    }
}
