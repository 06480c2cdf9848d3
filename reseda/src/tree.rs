//! Reading and writing a multi-locale Android resource tree.
//!
//! ```text
//! res/
//!   values/strings.xml        default locale, authoritative for keys
//!   values/arrays.xml         optional
//!   values-fr/strings.xml
//!   values-fr/arrays.xml
//! ```

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    error::Error,
    formats::{
        AndroidArraysFormat, AndroidStringsFormat, ResourceFile, android_arrays, android_strings,
    },
    meta::Flags,
    options::{TreeReadOptions, TreeWriteOptions},
    traits::Parser,
    types::{LocaleSummary, LocalizedRecord, ResourceRecord, ResourceSet, project_sets, values_folder},
};

fn resource_path(root: &Path, locale: &str, file: ResourceFile) -> PathBuf {
    root.join(values_folder(locale)).join(file.file_name())
}

/// Reads one file of a `values*` folder. A missing file is an error only
/// when [`ResourceFile::is_required`] says so.
fn read_resource<F: Parser>(
    root: &Path,
    locale: &str,
    file: ResourceFile,
) -> Result<Option<F>, Error> {
    let path = resource_path(root, locale, file);
    if path.is_file() {
        return F::read_from(&path).map(Some);
    }
    if file.is_required() {
        return Err(Error::MissingFile(path));
    }
    debug!("No {} in `{}`", file, values_folder(locale));
    Ok(None)
}

/// Accumulates the records of every locale, keyed on the default locale.
#[derive(Default)]
struct TreeRecords {
    strings: Vec<LocalizedRecord>,
    arrays: Vec<LocalizedRecord>,
    string_index: HashMap<String, usize>,
    array_index: HashMap<String, Vec<usize>>,
}

impl TreeRecords {
    fn add_default_strings(&mut self, format: AndroidStringsFormat, keep_empty_rows: bool) -> usize {
        let mut count = 0;
        for node in format.nodes {
            match node {
                android_strings::Node::Comment(text) => self
                    .strings
                    .push(LocalizedRecord::new(ResourceRecord::comment(text))),
                android_strings::Node::Blank(lines) => {
                    if keep_empty_rows {
                        for _ in 0..lines {
                            self.strings
                                .push(LocalizedRecord::new(ResourceRecord::blank(false)));
                        }
                    }
                }
                android_strings::Node::String(s) => {
                    if self.string_index.contains_key(&s.name) {
                        warn!("Duplicate string `{}` in default locale, keeping the first", s.name);
                        continue;
                    }
                    let flags = Flags::default()
                        .with_formatted(s.formatted)
                        .with_translatable(s.translatable);
                    let mut localized = LocalizedRecord::new(
                        ResourceRecord::string(s.name.clone(), "")
                            .with_flags(flags)
                            .with_documentation(s.documentation),
                    );
                    localized.set_value("", s.value);
                    self.string_index.insert(s.name, self.strings.len());
                    self.strings.push(localized);
                    count += 1;
                }
            }
        }
        count
    }

    fn add_default_arrays(&mut self, format: AndroidArraysFormat, keep_empty_rows: bool) -> usize {
        let mut count = 0;
        for node in format.nodes {
            match node {
                android_arrays::Node::Comment(text) => {
                    let flags = Flags {
                        array_item: true,
                        ..Flags::comment()
                    };
                    self.arrays.push(LocalizedRecord::new(
                        ResourceRecord::comment(text).with_flags(flags),
                    ));
                }
                android_arrays::Node::Blank(lines) => {
                    if keep_empty_rows {
                        for _ in 0..lines {
                            self.arrays
                                .push(LocalizedRecord::new(ResourceRecord::blank(true)));
                        }
                    }
                }
                android_arrays::Node::Array(array) => {
                    if self.array_index.contains_key(&array.name) {
                        warn!("Duplicate array `{}` in default locale, keeping the first", array.name);
                        continue;
                    }
                    let flags = Flags::array_item().with_translatable(array.translatable);
                    let mut positions = Vec::with_capacity(array.items.len());
                    for item in array.items {
                        let mut localized = LocalizedRecord::new(
                            ResourceRecord::array_item(array.name.clone(), "").with_flags(flags),
                        );
                        localized.set_value("", item);
                        positions.push(self.arrays.len());
                        self.arrays.push(localized);
                    }
                    self.array_index.insert(array.name, positions);
                    count += 1;
                }
            }
        }
        count
    }

    fn attach_strings(&mut self, locale: &str, format: AndroidStringsFormat) -> usize {
        let mut count = 0;
        for s in format.strings() {
            let Some(&index) = self.string_index.get(&s.name) else {
                debug!("Dropping `{}` from `{}`: not in default locale", s.name, locale);
                continue;
            };
            let localized = &mut self.strings[index];
            if localized.value(locale).is_some() {
                warn!("Duplicate string `{}` in locale `{}`, keeping the last", s.name, locale);
            } else {
                count += 1;
            }
            localized.set_value(locale, s.value.clone());
        }
        count
    }

    fn attach_arrays(&mut self, locale: &str, format: AndroidArraysFormat) -> usize {
        let mut count = 0;
        for array in format.arrays() {
            let Some(positions) = self.array_index.get(&array.name) else {
                debug!("Dropping array `{}` from `{}`: not in default locale", array.name, locale);
                continue;
            };
            if array.items.len() > positions.len() {
                debug!(
                    "Dropping {} extra item(s) of array `{}` in `{}`",
                    array.items.len() - positions.len(),
                    array.name,
                    locale
                );
            }
            for (&index, item) in positions.iter().zip(&array.items) {
                self.arrays[index].set_value(locale, item.clone());
            }
            count += 1;
        }
        count
    }

    fn into_sets(self, locales: &[String]) -> Vec<ResourceSet> {
        let mut records = self.strings;
        records.extend(self.arrays);
        project_sets(&records, locales)
    }
}

/// Reads the default locale and every configured locale under `root`.
///
/// `strings.xml` must exist in each folder, `arrays.xml` may be absent.
/// Non-default locales only contribute values for keys the default locale
/// defines; array items are matched by position and extra items are dropped.
pub fn read_tree(root: &Path, options: &TreeReadOptions) -> Result<Vec<ResourceSet>, Error> {
    let locales = options.all_locales();
    let mut records = TreeRecords::default();

    for locale in &locales {
        let strings: AndroidStringsFormat =
            read_resource(root, locale, ResourceFile::Strings)?.unwrap_or_default();
        let arrays: Option<AndroidArraysFormat> =
            read_resource(root, locale, ResourceFile::Arrays)?;

        let (strings_count, arrays_count) = if locale.is_empty() {
            let keep = options.keep_empty_rows;
            (
                records.add_default_strings(strings, keep),
                arrays.map_or(0, |a| records.add_default_arrays(a, keep)),
            )
        } else {
            (
                records.attach_strings(locale, strings),
                arrays.map_or(0, |a| records.attach_arrays(locale, a)),
            )
        };

        info!(
            "Read {} strings and {} arrays from `{}`",
            strings_count,
            arrays_count,
            values_folder(locale)
        );
    }

    Ok(records.into_sets(&locales))
}

/// Writes `strings.xml` and `arrays.xml` for every set under `root`,
/// creating the `values*` folders as needed.
///
/// Every file is built and checked before the first one is written, so an
/// ill-formed value or comment leaves the tree untouched.
pub fn write_tree(
    root: &Path,
    sets: &[ResourceSet],
    options: &TreeWriteOptions,
) -> Result<Vec<LocaleSummary>, Error> {
    let mut files = Vec::with_capacity(sets.len());
    for set in sets {
        let strings = AndroidStringsFormat::from_resource_set(set, options.keep_empty_rows)
            .with_indent(options.indent.as_str());
        strings.check_markup(set.locale_name())?;
        let arrays = AndroidArraysFormat::from_resource_set(set, options.keep_empty_rows)
            .with_indent(options.indent.as_str());
        arrays.check_markup(set.locale_name())?;
        files.push((set, strings, arrays));
    }

    let mut summaries = Vec::with_capacity(files.len());
    for (set, strings, arrays) in files {
        let folder = root.join(set.values_folder());
        fs::create_dir_all(&folder).map_err(|e| Error::file_io(&folder, e))?;
        strings.write_to(folder.join(ResourceFile::Strings.file_name()))?;
        arrays.write_to(folder.join(ResourceFile::Arrays.file_name()))?;

        let summary = LocaleSummary::new(
            set.locale.clone(),
            strings.strings().count(),
            arrays.arrays().count(),
        );
        info!(
            "Wrote {} strings and {} arrays for locale `{}`",
            summary.strings,
            summary.arrays,
            set.locale_name()
        );
        summaries.push(summary);
    }
    Ok(summaries)
}
