//! Options for the table and tree readers and writers.

use crate::formats::android_strings::DEFAULT_INDENT;

/// Behavior of the table reader and writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Locale columns to keep. Empty keeps every column; the default locale is always kept.
    pub locales: Vec<String>,
    /// Field delimiter.
    pub delimiter: u8,
    /// Copy the default value into untranslated cells instead of failing.
    pub force_untranslated: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            delimiter: b',',
            force_untranslated: false,
        }
    }
}

impl TableOptions {
    /// Creates default table options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale allow-list.
    pub fn with_locales(mut self, locales: Vec<String>) -> Self {
        self.locales = locales;
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables/disables filling untranslated cells from the default locale.
    pub fn with_force_untranslated(mut self, force: bool) -> Self {
        self.force_untranslated = force;
        self
    }

    /// Whether a locale column survives the allow-list.
    pub fn keeps_locale(&self, locale: &str) -> bool {
        locale.is_empty() || self.locales.is_empty() || self.locales.iter().any(|l| l == locale)
    }
}

/// Behavior of the resource tree reader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeReadOptions {
    /// Non-default locales to read, in order. The default locale is always read first.
    pub locales: Vec<String>,
    /// Turn empty lines of the default locale into blank records.
    pub keep_empty_rows: bool,
}

impl TreeReadOptions {
    /// Creates default tree read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locales to read.
    pub fn with_locales(mut self, locales: Vec<String>) -> Self {
        self.locales = locales;
        self
    }

    /// Enables/disables blank-line preservation.
    pub fn with_keep_empty_rows(mut self, keep: bool) -> Self {
        self.keep_empty_rows = keep;
        self
    }

    /// `""` followed by the configured locales, without duplicates.
    pub fn all_locales(&self) -> Vec<String> {
        let mut all = vec![String::new()];
        for locale in &self.locales {
            if !all.contains(locale) {
                all.push(locale.clone());
            }
        }
        all
    }
}

/// Behavior of the resource tree writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeWriteOptions {
    /// Indentation unit, repeated once per nesting level.
    pub indent: String,
    /// Write blank records as empty lines.
    pub keep_empty_rows: bool,
}

impl Default for TreeWriteOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            keep_empty_rows: false,
        }
    }
}

impl TreeWriteOptions {
    /// Creates default tree write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Enables/disables writing blank records.
    pub fn with_keep_empty_rows(mut self, keep: bool) -> Self {
        self.keep_empty_rows = keep;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_locale() {
        let all = TableOptions::new();
        assert!(all.keeps_locale("fr"));

        let some = TableOptions::new().with_locales(vec!["fr".to_string()]);
        assert!(some.keeps_locale(""));
        assert!(some.keeps_locale("fr"));
        assert!(!some.keeps_locale("de"));
    }

    #[test]
    fn test_all_locales_puts_default_first() {
        let options = TreeReadOptions::new().with_locales(vec![
            "fr".to_string(),
            "".to_string(),
            "fr".to_string(),
            "de".to_string(),
        ]);
        assert_eq!(options.all_locales(), vec!["", "fr", "de"]);
    }
}
