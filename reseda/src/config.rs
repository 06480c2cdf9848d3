//! Run configuration for one conversion.
//!
//! ```rust
//! use reseda::Config;
//!
//! let config = Config::csv_to_tree("strings.csv", "app/src/main/res")
//!     .with_locales(vec!["fr".to_string(), "de".to_string()])
//!     .with_delimiter(b';')
//!     .with_force_untranslated(true);
//! assert_eq!(config.table_options().delimiter, b';');
//! ```

use std::path::PathBuf;

use crate::{
    formats::android_strings::DEFAULT_INDENT,
    options::{TableOptions, TreeReadOptions, TreeWriteOptions},
};

/// Which way a conversion goes, with its input and output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Table file to a `res` directory.
    CsvToTree {
        input_csv: PathBuf,
        output_res: PathBuf,
    },
    /// `res` directory to a table file.
    TreeToCsv {
        input_res: PathBuf,
        output_csv: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub direction: Direction,
    /// Non-default locales. Empty means every table column; for a tree
    /// only the default locale is read.
    pub locales: Vec<String>,
    pub delimiter: u8,
    pub indent: String,
    pub keep_empty_rows: bool,
    pub force_untranslated: bool,
}

impl Config {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            locales: Vec::new(),
            delimiter: b',',
            indent: DEFAULT_INDENT.to_string(),
            keep_empty_rows: false,
            force_untranslated: false,
        }
    }

    pub fn csv_to_tree(input_csv: impl Into<PathBuf>, output_res: impl Into<PathBuf>) -> Self {
        Self::new(Direction::CsvToTree {
            input_csv: input_csv.into(),
            output_res: output_res.into(),
        })
    }

    pub fn tree_to_csv(input_res: impl Into<PathBuf>, output_csv: impl Into<PathBuf>) -> Self {
        Self::new(Direction::TreeToCsv {
            input_res: input_res.into(),
            output_csv: output_csv.into(),
        })
    }

    pub fn with_locales(mut self, locales: Vec<String>) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_keep_empty_rows(mut self, keep: bool) -> Self {
        self.keep_empty_rows = keep;
        self
    }

    pub fn with_force_untranslated(mut self, force: bool) -> Self {
        self.force_untranslated = force;
        self
    }

    pub fn table_options(&self) -> TableOptions {
        TableOptions::new()
            .with_locales(self.locales.clone())
            .with_delimiter(self.delimiter)
            .with_force_untranslated(self.force_untranslated)
    }

    pub fn tree_read_options(&self) -> TreeReadOptions {
        TreeReadOptions::new()
            .with_locales(self.locales.clone())
            .with_keep_empty_rows(self.keep_empty_rows)
    }

    pub fn tree_write_options(&self) -> TreeWriteOptions {
        TreeWriteOptions::new()
            .with_indent(self.indent.as_str())
            .with_keep_empty_rows(self.keep_empty_rows)
    }
}
