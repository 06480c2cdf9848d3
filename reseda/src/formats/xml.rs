//! Shared quick-xml plumbing for the `<resources>` files.
//!
//! Values are kept as raw inner XML, so markup such as `<b>` or
//! `<xliff:g>` and entity references survive a round trip untouched.

use std::{borrow::Cow, io::Write};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

pub(crate) const ROOT: &[u8] = b"resources";

/// A direct child of `<resources>`.
pub(crate) enum TopLevel<'i> {
    Comment(String),
    /// Number of empty lines in the whitespace before the next node.
    Blank(usize),
    Element { start: BytesStart<'i>, empty: bool },
}

/// Walks the children of the `<resources>` root, calling `visit` for each one.
///
/// `visit` must consume the content of non-empty elements (see [`read_inner`]
/// and [`skip`]). Whitespace after the last child is not reported.
pub(crate) fn for_each_top_level<'i, F>(content: &'i str, mut visit: F) -> Result<(), Error>
where
    F: FnMut(TopLevel<'i>, &mut Reader<&'i [u8]>) -> Result<(), Error>,
{
    let mut reader = Reader::from_str(content);
    let mut in_root = false;
    let mut pending_newlines = 0usize;

    loop {
        let event = reader.read_event()?;
        if !in_root {
            match event {
                Event::Start(ref e) if e.name().as_ref() == ROOT => in_root = true,
                Event::Empty(ref e) if e.name().as_ref() == ROOT => return Ok(()),
                Event::Eof => return Err(Error::MissingRoot(Default::default())),
                _ => {}
            }
            continue;
        }

        match event {
            Event::Text(text) => {
                let raw = utf8(&text)?;
                if raw.trim().is_empty() {
                    pending_newlines += raw.matches('\n').count();
                }
            }
            Event::Comment(text) => {
                flush_blanks(&mut pending_newlines, &mut reader, &mut visit)?;
                let comment = utf8(&text)?.trim().to_string();
                visit(TopLevel::Comment(comment), &mut reader)?;
            }
            Event::Start(start) => {
                flush_blanks(&mut pending_newlines, &mut reader, &mut visit)?;
                visit(TopLevel::Element { start, empty: false }, &mut reader)?;
            }
            Event::Empty(start) => {
                flush_blanks(&mut pending_newlines, &mut reader, &mut visit)?;
                visit(TopLevel::Element { start, empty: true }, &mut reader)?;
            }
            Event::End(ref e) if e.name().as_ref() == ROOT => return Ok(()),
            Event::Eof => {
                return Err(Error::InvalidResource(
                    "unexpected end of file inside <resources>".to_string(),
                ));
            }
            _ => {}
        }
    }
}

fn flush_blanks<'i, F>(
    pending_newlines: &mut usize,
    reader: &mut Reader<&'i [u8]>,
    visit: &mut F,
) -> Result<(), Error>
where
    F: FnMut(TopLevel<'i>, &mut Reader<&'i [u8]>) -> Result<(), Error>,
{
    let blanks = pending_newlines.saturating_sub(1);
    *pending_newlines = 0;
    if blanks > 0 {
        visit(TopLevel::Blank(blanks), reader)?;
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|e| Error::DataMismatch(e.to_string()))
}

/// Reads the raw inner XML of an element whose start tag was just read.
pub(crate) fn read_inner<'i>(
    reader: &mut Reader<&'i [u8]>,
    start: &BytesStart<'i>,
    empty: bool,
) -> Result<String, Error> {
    if empty {
        return Ok(String::new());
    }
    let inner: Cow<'i, str> = reader.read_text(start.name())?;
    Ok(inner.into_owned())
}

/// Skips the content of an element whose start tag was just read.
pub(crate) fn skip<'i>(
    reader: &mut Reader<&'i [u8]>,
    start: &BytesStart<'i>,
    empty: bool,
) -> Result<(), Error> {
    if !empty {
        reader.read_to_end(start.name())?;
    }
    Ok(())
}

/// Attributes of a resource element that reseda cares about.
#[derive(Debug, Default)]
pub(crate) struct ResourceAttributes {
    pub name: Option<String>,
    pub formatted: Option<String>,
    pub translatable: Option<String>,
    pub documentation: Option<String>,
}

impl ResourceAttributes {
    pub fn parse(start: &BytesStart) -> Result<Self, Error> {
        let mut attrs = ResourceAttributes::default();
        for attr in start.attributes().with_checks(false) {
            let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
            let value = attr.unescape_value()?.to_string();
            match attr.key.as_ref() {
                b"name" => attrs.name = Some(value),
                b"formatted" => attrs.formatted = Some(value),
                b"translatable" => attrs.translatable = Some(value),
                b"documentation" => attrs.documentation = Some(value),
                _ => {}
            }
        }
        Ok(attrs)
    }

    pub fn require_name(&mut self, tag: &str) -> Result<String, Error> {
        self.name
            .take()
            .ok_or_else(|| Error::InvalidResource(format!("{} tag missing 'name'", tag)))
    }
}

/// Checks that `raw` is well-formed element content: balanced tags, valid
/// tag names, and no bare `&` or unknown entity.
pub(crate) fn check_fragment(raw: &str) -> Result<(), String> {
    let wrapped = format!("<fragment>{}</fragment>", raw);
    let mut reader = Reader::from_str(&wrapped);
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                check_tag(&start)?;
                depth += 1;
            }
            Event::Empty(start) => check_tag(&start)?,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return match reader.read_event() {
                        Ok(Event::Eof) => Ok(()),
                        _ => Err("unbalanced closing tag".to_string()),
                    };
                }
            }
            Event::Text(text) => {
                text.unescape().map_err(|e| e.to_string())?;
            }
            Event::Eof => return Err("unclosed tag".to_string()),
            _ => {}
        }
    }
}

fn check_tag(start: &BytesStart) -> Result<(), String> {
    let name = start.name();
    let valid = name
        .as_ref()
        .first()
        .is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'_' | b':') || !b.is_ascii());
    if !valid {
        return Err(format!(
            "invalid tag name `{}`",
            String::from_utf8_lossy(name.as_ref())
        ));
    }
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        attr.unescape_value().map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// `--` may not appear inside an XML comment.
pub(crate) fn check_comment(text: &str) -> Result<(), String> {
    if text.contains("--") {
        Err("comment contains `--`".to_string())
    } else {
        Ok(())
    }
}

/// Error for a value or comment that would make the file ill-formed.
pub(crate) fn ill_formed(subject: &str, locale: &str, reason: String) -> Error {
    Error::InvalidResource(format!(
        "{} in locale `{}` is not well-formed XML: {}",
        subject, locale, reason
    ))
}

/// Only an explicit `"false"` switches an attribute flag off.
pub(crate) fn flag(value: Option<&str>) -> bool {
    !value.is_some_and(|v| v.trim().eq_ignore_ascii_case("false"))
}

/// Thin wrapper over quick-xml's writer that knows the indentation unit.
pub(crate) struct ResourcesWriter<'a, W: Write> {
    writer: Writer<W>,
    indent: &'a str,
}

impl<'a, W: Write> ResourcesWriter<'a, W> {
    /// Writes the declaration and opens `<resources>`.
    pub fn begin(writer: W, indent: &'a str) -> Result<Self, Error> {
        let mut writer = Writer::new(writer);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;
        writer.write_event(Event::Start(BytesStart::new("resources")))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(Self { writer, indent })
    }

    pub fn indent(&mut self, depth: usize) -> Result<(), Error> {
        let indent = self.indent.repeat(depth);
        if !indent.is_empty() {
            self.writer
                .write_event(Event::Text(BytesText::from_escaped(indent)))?;
        }
        Ok(())
    }

    pub fn newline(&mut self) -> Result<(), Error> {
        self.writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }

    pub fn blank_lines(&mut self, count: usize) -> Result<(), Error> {
        for _ in 0..count {
            self.newline()?;
        }
        Ok(())
    }

    /// `<!-- text -->` on its own line at depth 1.
    pub fn comment(&mut self, text: &str) -> Result<(), Error> {
        check_comment(text).map_err(Error::InvalidResource)?;
        self.indent(1)?;
        self.writer
            .write_event(Event::Comment(BytesText::from_escaped(format!(" {} ", text))))?;
        self.newline()
    }

    /// An element with raw inner XML on its own line.
    pub fn element(&mut self, depth: usize, start: BytesStart<'_>, raw: &str) -> Result<(), Error> {
        check_fragment(raw).map_err(Error::InvalidResource)?;
        let end = start.to_end().into_owned();
        self.indent(depth)?;
        self.writer.write_event(Event::Start(start))?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(raw)))?;
        self.writer.write_event(Event::End(end))?;
        self.newline()
    }

    pub fn open(&mut self, depth: usize, start: BytesStart<'_>) -> Result<(), Error> {
        self.indent(depth)?;
        self.writer.write_event(Event::Start(start))?;
        self.newline()
    }

    pub fn close(&mut self, depth: usize, name: &str) -> Result<(), Error> {
        self.indent(depth)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        self.newline()
    }

    /// Closes `<resources>`.
    pub fn finish(mut self) -> Result<(), Error> {
        self.writer
            .write_event(Event::End(BytesEnd::new("resources")))?;
        self.newline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fragment_accepts_markup_and_entities() {
        assert!(check_fragment("").is_ok());
        assert!(check_fragment("Tap <b>here</b> &amp; go").is_ok());
        assert!(check_fragment(r#"<xliff:g id="count">%d</xliff:g> files"#).is_ok());
        assert!(check_fragment("&lt;3 &#160; \"quoted\"").is_ok());
        assert!(check_fragment("<br/>").is_ok());
    }

    #[test]
    fn test_check_fragment_rejects_ill_formed_values() {
        assert!(check_fragment("Tom & Jerry").is_err());
        assert!(check_fragment("I <3 you").is_err());
        assert!(check_fragment("<b>open").is_err());
        assert!(check_fragment("close</b>").is_err());
        assert!(check_fragment("<b>crossed<i></b></i>").is_err());
        assert!(check_fragment("&nbsp;").is_err());
    }

    #[test]
    fn test_check_comment() {
        assert!(check_comment("Section - main -").is_ok());
        assert!(check_comment("Section -- main").is_err());
    }

    #[test]
    fn test_writer_refuses_ill_formed_content() {
        let mut out = ResourcesWriter::begin(Vec::new(), "  ").unwrap();
        let err = out
            .element(1, BytesStart::new("string"), "Tom & Jerry")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResource(_)));
        assert!(out.comment("a -- b").is_err());
    }
}
