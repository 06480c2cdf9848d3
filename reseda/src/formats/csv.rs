//! Support for the translator-facing table.
//!
//! ```text
//! "META","NAME","","fr","de","DOCS"
//! "","hello","Hello","Bonjour","Hallo","Greeting on the main screen"
//! "-","","","","",""
//! "a#","Planets","","","",""
//! "a","planets","Mercury","Mercure","Merkur",""
//! ```
//!
//! The column with an empty header holds the default locale. Every field is
//! quoted on output; line breaks inside values are dropped.

use std::{
    borrow::Cow,
    collections::HashMap,
    fs::File,
    io::{Read, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::{
    error::{Error, UntranslatedEntry},
    meta,
    options::TableOptions,
    traits::persist_with,
    types::{LocalizedRecord, ResourceRecord, ResourceSet, project_sets},
};

pub const META_COLUMN: &str = "META";
pub const NAME_COLUMN: &str = "NAME";
pub const DOCS_COLUMN: &str = "DOCS";
const DOCS_ALIAS: &str = "COMMENTS";

/// The whole table, one [`Row`] per data line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Locale code of every value column, in column order.
    pub locales: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// Raw `META` cell, see [`crate::meta`].
    pub meta: String,
    pub name: String,
    /// One value per entry of [`Format::locales`].
    pub values: Vec<String>,
    pub documentation: String,
    /// 1-based line in the source file, 0 for generated rows.
    pub line: u64,
}

impl Row {
    fn separator(width: usize) -> Self {
        Row {
            meta: meta::UNUSED.to_string(),
            values: vec![String::new(); width],
            ..Row::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.documentation.trim().is_empty()
            && self.values.iter().all(|v| v.trim().is_empty())
    }
}

struct Header {
    meta: usize,
    name: usize,
    docs: Option<usize>,
    locales: Vec<(usize, String)>,
}

impl Header {
    fn parse(fields: &csv::StringRecord) -> Result<Self, Error> {
        let mut meta = None;
        let mut name = None;
        let mut docs = None;
        let mut locales: Vec<(usize, String)> = Vec::new();

        for (index, field) in fields.iter().enumerate() {
            let field = field.trim_start_matches('\u{feff}').trim();
            let slot = if field.eq_ignore_ascii_case(META_COLUMN) {
                &mut meta
            } else if field.eq_ignore_ascii_case(NAME_COLUMN) {
                &mut name
            } else if field.eq_ignore_ascii_case(DOCS_COLUMN)
                || field.eq_ignore_ascii_case(DOCS_ALIAS)
            {
                &mut docs
            } else {
                if locales.iter().any(|(_, l)| l == field) {
                    return Err(Error::DuplicateColumn(field.to_string()));
                }
                locales.push((index, field.to_string()));
                continue;
            };
            if slot.replace(index).is_some() {
                return Err(Error::DuplicateColumn(field.to_ascii_uppercase()));
            }
        }

        let meta = meta.ok_or_else(|| Error::MissingColumn(META_COLUMN.to_string()))?;
        let name = name.ok_or_else(|| Error::MissingColumn(NAME_COLUMN.to_string()))?;
        if !locales.iter().any(|(_, l)| l.is_empty()) {
            return Err(Error::MissingColumn(
                "default locale (empty header)".to_string(),
            ));
        }
        Ok(Header {
            meta,
            name,
            docs,
            locales,
        })
    }
}

/// Removes line breaks; the writer quotes and doubles embedded quotes.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(['\r', '\n']) {
        Cow::Owned(field.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(field)
    }
}

impl Format {
    /// Parse a table from any reader.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);
        let mut records = rdr.records();

        let header = match records.next() {
            Some(first) => Header::parse(&first?)?,
            None => return Err(Error::MissingColumn(META_COLUMN.to_string())),
        };

        let cell = |record: &csv::StringRecord, index: usize| {
            record.get(index).unwrap_or_default().to_string()
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            rows.push(Row {
                meta: cell(&record, header.meta),
                name: cell(&record, header.name),
                values: header
                    .locales
                    .iter()
                    .map(|(index, _)| cell(&record, *index))
                    .collect(),
                documentation: header
                    .docs
                    .map(|index| cell(&record, index))
                    .unwrap_or_default(),
                line: record.position().map(|p| p.line()).unwrap_or_default(),
            });
        }

        Ok(Format {
            locales: header.locales.into_iter().map(|(_, l)| l).collect(),
            rows,
        })
    }

    /// Parse a table from a file. A leading byte order mark is ignored.
    pub fn read_from<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file_io(path, e))?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        Self::from_reader(decoder, delimiter).map_err(|e| e.in_file(path))
    }

    /// Write the table to any writer.
    pub fn to_writer<W: Write>(&self, writer: W, delimiter: u8) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(writer);

        let mut header = vec![META_COLUMN, NAME_COLUMN];
        header.extend(self.locales.iter().map(String::as_str));
        header.push(DOCS_COLUMN);
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut fields = Vec::with_capacity(self.locales.len() + 3);
            fields.push(escape(&row.meta));
            fields.push(escape(&row.name));
            for index in 0..self.locales.len() {
                fields.push(escape(row.values.get(index).map_or("", String::as_str)));
            }
            fields.push(escape(&row.documentation));
            wtr.write_record(fields.iter().map(|f| f.as_bytes()))?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the table to a file, replacing it atomically.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, delimiter: u8) -> Result<(), Error> {
        persist_with(path.as_ref(), |writer| self.to_writer(writer, delimiter))
    }

    /// Splits the table into one [`ResourceSet`] per kept locale.
    ///
    /// Unused rows are dropped, locales outside the allow-list are discarded,
    /// and the default locale comes first. Every set holds the same rows in
    /// the same order, so array items line up by position.
    ///
    /// A translatable row whose default value is present but whose value is
    /// blank in some kept locale is either filled from the default
    /// (`force_untranslated`) or reported; any report fails the whole read
    /// with [`Error::Untranslated`].
    pub fn into_resource_sets(self, options: &TableOptions) -> Result<Vec<ResourceSet>, Error> {
        let mut kept: Vec<(usize, String)> = self
            .locales
            .iter()
            .cloned()
            .enumerate()
            .filter(|(_, locale)| options.keeps_locale(locale))
            .collect();
        kept.sort_by_key(|(_, locale)| !locale.is_empty());

        let mut records = Vec::new();
        for row in self.rows {
            let decoded = meta::decode(&row.meta);
            if decoded.unused {
                continue;
            }
            let flags = decoded.flags;
            let name = row.name.trim();

            if flags.comment {
                records.push(LocalizedRecord::new(
                    ResourceRecord::comment(name).with_flags(flags),
                ));
                continue;
            }
            if name.is_empty() {
                if row.is_empty() {
                    records.push(LocalizedRecord::new(ResourceRecord::blank(
                        flags.array_item,
                    )));
                    continue;
                }
                return Err(Error::InvalidResource(format!(
                    "row at line {} has values but no name",
                    row.line
                )));
            }

            let documentation =
                Some(row.documentation.trim().to_string()).filter(|d| !d.is_empty());
            let mut localized = LocalizedRecord::new(
                ResourceRecord::string(name, "")
                    .with_flags(flags)
                    .with_documentation(documentation),
            );
            for (index, locale) in &kept {
                let value = row.values.get(*index).cloned().unwrap_or_default();
                localized.set_value(locale, value);
            }
            records.push(localized);
        }

        let untranslated = reconcile_untranslated(&mut records, &kept, options.force_untranslated);
        if !untranslated.is_empty() {
            return Err(Error::Untranslated(untranslated));
        }

        let locales: Vec<String> = kept.into_iter().map(|(_, l)| l).collect();
        let sets = project_sets(&records, &locales);
        if let Some(default) = sets.first() {
            info!(
                "Read {} strings and {} arrays in {} locale(s) from table",
                default.strings_count(),
                default.arrays_count(),
                locales.len()
            );
        }
        Ok(sets)
    }

    /// Flattens resource sets into a table anchored on the first set.
    ///
    /// Each record of the first set becomes one row. Values of the other
    /// sets are looked up by name; array items are matched by their ordinal
    /// among same-named items, so a locale with fewer items leaves the
    /// remaining cells blank. Comments are preceded by an unused separator row.
    pub fn from_resource_sets(sets: &[ResourceSet]) -> Self {
        let locales: Vec<String> = sets.iter().map(|s| s.locale.clone()).collect();
        let Some((base, others)) = sets.split_first() else {
            return Format::default();
        };

        let indexes: Vec<HashMap<(&str, bool), Vec<&ResourceRecord>>> =
            others.iter().map(index_by_name).collect();
        let mut ordinals: HashMap<&str, usize> = HashMap::new();
        let mut rows = Vec::with_capacity(base.len());

        for record in base.iter() {
            let meta = meta::encode(&record.flags);
            if record.is_comment() {
                rows.push(Row::separator(locales.len()));
                rows.push(Row {
                    meta,
                    name: record.name.clone(),
                    values: vec![String::new(); locales.len()],
                    ..Row::default()
                });
                continue;
            }
            if record.is_blank() {
                rows.push(Row {
                    meta,
                    values: vec![String::new(); locales.len()],
                    ..Row::default()
                });
                continue;
            }

            let ordinal = if record.is_array_item() {
                let next = ordinals.entry(record.name.as_str()).or_default();
                let current = *next;
                *next += 1;
                current
            } else {
                0
            };

            let mut values = Vec::with_capacity(locales.len());
            values.push(record.value.clone().unwrap_or_default());
            for index in &indexes {
                let value = index
                    .get(&(record.name.as_str(), record.is_array_item()))
                    .and_then(|matches| matches.get(ordinal))
                    .and_then(|r| r.value.clone())
                    .unwrap_or_default();
                values.push(value);
            }

            rows.push(Row {
                meta,
                name: record.name.clone(),
                values,
                documentation: record.documentation.clone().unwrap_or_default(),
                line: 0,
            });
        }

        Format { locales, rows }
    }
}

fn index_by_name(set: &ResourceSet) -> HashMap<(&str, bool), Vec<&ResourceRecord>> {
    let mut index: HashMap<(&str, bool), Vec<&ResourceRecord>> = HashMap::new();
    for record in set.iter().filter(|r| r.is_resource()) {
        index
            .entry((record.name.as_str(), record.is_array_item()))
            .or_default()
            .push(record);
    }
    index
}

/// Applies the missing-translation policy, returning the rows that failed it.
fn reconcile_untranslated(
    records: &mut [LocalizedRecord],
    locales: &[(usize, String)],
    force: bool,
) -> Vec<UntranslatedEntry> {
    let mut untranslated = Vec::new();
    for localized in records.iter_mut() {
        if !localized.record.is_resource() || !localized.record.flags.translatable {
            continue;
        }
        let Some(default) = localized
            .default_value()
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
        else {
            continue;
        };

        let missing: Vec<String> = locales
            .iter()
            .map(|(_, locale)| locale)
            .filter(|locale| !locale.is_empty())
            .filter(|locale| localized.value(locale).is_none_or(|v| v.trim().is_empty()))
            .cloned()
            .collect();
        if missing.is_empty() {
            continue;
        }

        if force {
            for locale in &missing {
                localized.set_value(locale, default.clone());
            }
        } else {
            let entry = UntranslatedEntry {
                name: localized.record.name.clone(),
                locales: missing,
            };
            warn!("{}", entry);
            untranslated.push(entry);
        }
    }
    untranslated
}
