//! Support for Android `arrays.xml`.
//!
//! Top-level `<string-array>` elements and comments are kept in document
//! order, together with the empty lines between them. Other array kinds
//! (`<integer-array>`, `<array>`) are skipped.

use std::{
    collections::HashMap,
    io::{BufRead, Write},
};

use quick_xml::{Reader, events::BytesStart, events::Event};
use serde::Serialize;

use crate::{
    error::Error,
    formats::xml::{self, ResourceAttributes, ResourcesWriter, TopLevel},
    traits::Parser,
    types::{ResourceRecord, ResourceSet},
};

use super::android_strings::DEFAULT_INDENT;

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
    Array(StringArray),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringArray {
    pub name: String,
    pub translatable: bool,
    /// Raw inner XML of each `<item>`.
    pub items: Vec<String>,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            nodes: Vec::new(),
        }
    }
}

enum Group<'a> {
    Comment(&'a str),
    Blank,
    Items(&'a str, Vec<&'a ResourceRecord>),
}

impl Format {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn arrays(&self) -> impl Iterator<Item = &StringArray> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Array(a) => Some(a),
            _ => None,
        })
    }

    /// Fails on the first comment or item that would not be well-formed XML.
    pub fn check_markup(&self, locale: &str) -> Result<(), Error> {
        for node in &self.nodes {
            match node {
                Node::Comment(text) => xml::check_comment(text)
                    .map_err(|e| xml::ill_formed(&format!("comment `{}`", text), locale, e))?,
                Node::Array(array) => {
                    for item in &array.items {
                        xml::check_fragment(item).map_err(|e| {
                            xml::ill_formed(&format!("array `{}`", array.name), locale, e)
                        })?;
                    }
                }
                Node::Blank(_) => {}
            }
        }
        Ok(())
    }

    /// Builds the `arrays.xml` content for one locale.
    ///
    /// Array records are grouped by name in first-seen order; every comment
    /// forms its own group. A group is translatable only if all of its items
    /// are. Untranslatable groups are skipped outside the default locale, and
    /// groups whose items are all blank are skipped everywhere.
    pub fn from_resource_set(set: &ResourceSet, keep_empty_rows: bool) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut by_name: HashMap<&str, usize> = HashMap::new();
        for record in set.iter().filter(|r| r.is_array_item()) {
            if record.is_comment() {
                groups.push(Group::Comment(&record.name));
            } else if record.is_blank() {
                groups.push(Group::Blank);
            } else if let Some(&index) = by_name.get(record.name.as_str()) {
                if let Group::Items(_, items) = &mut groups[index] {
                    items.push(record);
                }
            } else {
                by_name.insert(&record.name, groups.len());
                groups.push(Group::Items(&record.name, vec![record]));
            }
        }

        let mut nodes = Vec::new();
        for group in groups {
            match group {
                Group::Comment(text) => {
                    if !keep_empty_rows {
                        nodes.push(Node::Blank(1));
                    }
                    nodes.push(Node::Comment(text.to_string()));
                }
                Group::Blank => {
                    if keep_empty_rows {
                        match nodes.last_mut() {
                            Some(Node::Blank(count)) => *count += 1,
                            _ => nodes.push(Node::Blank(1)),
                        }
                    }
                }
                Group::Items(name, items) => {
                    let translatable = items.iter().all(|r| r.flags.translatable);
                    if !translatable && !set.is_default() {
                        continue;
                    }
                    if items.iter().all(|r| r.non_blank_value().is_none()) {
                        continue;
                    }
                    nodes.push(Node::Array(StringArray {
                        name: name.to_string(),
                        translatable,
                        items: items
                            .iter()
                            .map(|r| r.value.clone().unwrap_or_default())
                            .collect(),
                    }));
                }
            }
        }

        Self {
            indent: DEFAULT_INDENT.to_string(),
            nodes,
        }
    }
}

impl StringArray {
    fn start_tag(&self) -> BytesStart<'_> {
        let mut elem = BytesStart::new("string-array");
        elem.push_attribute(("name", self.name.as_str()));
        if !self.translatable {
            elem.push_attribute(("translatable", "false"));
        }
        elem
    }
}

fn parse_items<'i>(
    reader: &mut Reader<&'i [u8]>,
    start: &BytesStart<'i>,
    empty: bool,
) -> Result<Vec<String>, Error> {
    let mut items = Vec::new();
    if empty {
        return Ok(items);
    }
    loop {
        match reader.read_event()? {
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                items.push(xml::read_inner(reader, e, false)?);
            }
            Event::Empty(ref e) if e.name().as_ref() == b"item" => items.push(String::new()),
            Event::Start(ref e) => xml::skip(reader, e, false)?,
            Event::End(ref e) if e.name() == start.name() => break,
            Event::Eof => {
                return Err(Error::InvalidResource(
                    "unexpected end of file inside <string-array>".to_string(),
                ));
            }
            _ => {}
        }
    }
    Ok(items)
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
                TopLevel::Element { start, empty }
                    if start.name().as_ref() == b"string-array" =>
                {
                    let mut attrs = ResourceAttributes::parse(&start)?;
                    let name = attrs.require_name("string-array")?;
                    let items = parse_items(xml_reader, &start, empty)?;
                    nodes.push(Node::Array(StringArray {
                        name,
                        translatable: xml::flag(attrs.translatable.as_deref()),
                        items,
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
                Node::Array(array) => {
                    out.open(1, array.start_tag())?;
                    for item in &array.items {
                        out.element(2, BytesStart::new("item"), item)?;
                    }
                    out.close(1, "string-array")?;
                }
            }
        }
        out.finish()
    }
}
