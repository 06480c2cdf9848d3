#![forbid(unsafe_code)]
//! Bidirectional converter between a translation table and Android resources.
//!
//! Translators work in one delimited table with a column per locale;
//! apps ship `res/values*/strings.xml` and `arrays.xml`. Reseda converts
//! either side into the other without losing comments, array order,
//! `formatted`/`translatable` attributes or documentation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reseda::{Config, convert};
//!
//! // Table to resource tree
//! convert(&Config::csv_to_tree("strings.csv", "app/src/main/res"))?;
//!
//! // And back, reading French and German next to the default locale
//! let config = Config::tree_to_csv("app/src/main/res", "strings.csv")
//!     .with_locales(vec!["fr".to_string(), "de".to_string()]);
//! convert(&config)?;
//! # Ok::<(), reseda::Error>(())
//! ```
//!
//! # The table
//!
//! | META | NAME | *(default)* | fr | DOCS |
//! |------|------|-------------|----|------|
//! | | `hello` | Hello | Bonjour | Greeting |
//! | `a#` | Planets | | | |
//! | `a` | `planets` | Mercury | Mercure | |
//!
//! `META` packs the row flags, see [`meta`].

pub mod config;
pub mod converter;
pub mod error;
pub mod formats;
pub mod meta;
pub mod options;
pub mod traits;
pub mod tree;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Config, Direction},
    converter::{ConversionReport, convert, read_table},
    error::{Error, UntranslatedEntry},
    meta::Flags,
    options::{TableOptions, TreeReadOptions, TreeWriteOptions},
    tree::{read_tree, write_tree},
    types::{LocaleSummary, ResourceRecord, ResourceSet},
};
