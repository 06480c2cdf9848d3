//! Core, format-agnostic types for reseda.
//! Both readers decode into these; both writers serialize these.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::meta::Flags;

/// The locale code of the unsuffixed `values` folder.
pub const DEFAULT_LOCALE: &str = "";

/// One resource string, array item, comment, or blank-line placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Resource key, or the comment text for comments.
    pub name: String,

    /// Text for this record's locale. Absent for comments and blanks.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub value: Option<String>,

    /// Android `documentation` attribute. Only kept on default-locale records.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub documentation: Option<String>,

    pub flags: Flags,
}

impl ResourceRecord {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            documentation: None,
            flags: Flags::default(),
        }
    }

    pub fn array_item(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            documentation: None,
            flags: Flags::array_item(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            name: text.into(),
            value: None,
            documentation: None,
            flags: Flags::comment(),
        }
    }

    /// A blank-line placeholder. `array_item` places it in `arrays.xml`.
    pub fn blank(array_item: bool) -> Self {
        Self {
            name: String::new(),
            value: None,
            documentation: None,
            flags: Flags {
                array_item,
                ..Flags::default()
            },
        }
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_documentation(mut self, documentation: Option<String>) -> Self {
        self.documentation = documentation;
        self
    }

    pub fn is_comment(&self) -> bool {
        self.flags.comment
    }

    pub fn is_array_item(&self) -> bool {
        self.flags.array_item
    }

    pub fn is_blank(&self) -> bool {
        !self.flags.comment && self.name.is_empty()
    }

    /// Whether this record carries translatable payload (not a comment or blank).
    pub fn is_resource(&self) -> bool {
        !self.flags.comment && !self.name.is_empty()
    }

    /// The value, treating whitespace-only text as missing.
    pub fn non_blank_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// All records of one locale, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSet {
    /// Locale code, empty for the default locale.
    pub locale: String,

    #[serde(default)]
    pub records: Vec<ResourceRecord>,
}

impl ResourceSet {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(locale: impl Into<String>, records: Vec<ResourceRecord>) -> Self {
        Self {
            locale: locale.into(),
            records,
        }
    }

    pub fn is_default(&self) -> bool {
        self.locale.is_empty()
    }

    /// Human readable locale label used in progress messages.
    pub fn locale_name(&self) -> &str {
        if self.is_default() {
            "Default"
        } else {
            &self.locale
        }
    }

    /// Name of the Android resource folder for this locale.
    pub fn values_folder(&self) -> String {
        values_folder(&self.locale)
    }

    pub fn strings_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.is_resource() && !r.is_array_item())
            .count()
    }

    pub fn arrays_count(&self) -> usize {
        let mut names: Vec<&str> = self
            .records
            .iter()
            .filter(|r| r.is_resource() && r.is_array_item())
            .map(|r| r.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `values` for the default locale, `values-{locale}` otherwise.
pub fn values_folder(locale: &str) -> String {
    if locale.is_empty() {
        "values".to_string()
    } else {
        format!("values-{}", locale)
    }
}

/// A record shared by every locale, with one value per locale code.
///
/// Both readers build a list of these in default-locale order and then
/// project it onto each locale, so every resulting [`ResourceSet`] has the
/// same positional record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedRecord {
    /// Name, flags and documentation. `value` is unused here.
    pub record: ResourceRecord,
    /// Locale code (`""` for default) to value.
    pub values: HashMap<String, String>,
}

impl LocalizedRecord {
    pub fn new(record: ResourceRecord) -> Self {
        Self {
            record: ResourceRecord {
                value: None,
                ..record
            },
            values: HashMap::new(),
        }
    }

    pub fn set_value(&mut self, locale: &str, value: String) {
        self.values.insert(locale.to_string(), value);
    }

    pub fn value(&self, locale: &str) -> Option<&str> {
        self.values.get(locale).map(String::as_str)
    }

    pub fn default_value(&self) -> Option<&str> {
        self.value(DEFAULT_LOCALE)
    }

    /// The record as seen from `locale`.
    pub fn project(&self, locale: &str) -> ResourceRecord {
        let mut record = self.record.clone();
        if record.is_resource() {
            record.value = self.values.get(locale).cloned();
        }
        if !locale.is_empty() {
            record.documentation = None;
        }
        record
    }
}

/// Projects localized records onto each locale, in the given locale order.
pub fn project_sets(records: &[LocalizedRecord], locales: &[String]) -> Vec<ResourceSet> {
    locales
        .iter()
        .map(|locale| {
            ResourceSet::with_records(
                locale.clone(),
                records.iter().map(|r| r.project(locale)).collect(),
            )
        })
        .collect()
}

/// Strings and arrays handled for one locale during a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSummary {
    pub locale: String,
    pub strings: usize,
    pub arrays: usize,
}

impl LocaleSummary {
    pub fn new(locale: impl Into<String>, strings: usize, arrays: usize) -> Self {
        Self {
            locale: locale.into(),
            strings,
            arrays,
        }
    }

    /// Counts of the resources held by `set`.
    pub fn of(set: &ResourceSet) -> Self {
        Self::new(set.locale.clone(), set.strings_count(), set.arrays_count())
    }

    pub fn locale_name(&self) -> &str {
        if self.locale.is_empty() {
            "Default"
        } else {
            &self.locale
        }
    }
}
