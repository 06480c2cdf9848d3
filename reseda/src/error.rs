//! All error types for the reseda crate.
//!
//! These are returned from every fallible operation (parsing, serialization, conversion).
//! Nothing in the library exits the process; the caller decides what a failure means.

use std::{fmt, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to access `{path}`: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("there is no `{0}` column in the table header")]
    MissingColumn(String),

    #[error("column `{0}` appears more than once in the table header")]
    DuplicateColumn(String),

    #[error("resource file `{}` not found", .0.display())]
    MissingFile(PathBuf),

    #[error("node <resources> not found in `{}`", .0.display())]
    MissingRoot(PathBuf),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("{} untranslated strings found:\n{}", .0.len(), UntranslatedList(.0))]
    Untranslated(Vec<UntranslatedEntry>),
}

impl Error {
    /// Attaches a path to an I/O error.
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Re-labels errors raised while reading a specific file so the message carries the path.
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Io(source) => Error::file_io(path, source),
            Error::XmlParse(e) => Error::InvalidResource(format!(
                "unable to parse `{}`: {}",
                path.into().display(),
                e
            )),
            Error::MissingRoot(_) => Error::MissingRoot(path.into()),
            other => other,
        }
    }
}

/// A resource key that has no value for some locales while the default locale has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedEntry {
    pub name: String,
    pub locales: Vec<String>,
}

impl fmt::Display for UntranslatedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "untranslated `{}` for locale(s): {}",
            self.name,
            self.locales.join(", ")
        )
    }
}

struct UntranslatedList<'a>(&'a [UntranslatedEntry]);

impl fmt::Display for UntranslatedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_file_io_error_names_path_and_cause() {
        let error = Error::file_io(
            "out/values/strings.xml",
            io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        );
        let message = error.to_string();
        assert!(message.contains("out/values/strings.xml"));
        assert!(message.contains("access denied"));
    }

    #[test]
    fn test_missing_column_error() {
        let error = Error::MissingColumn("META".to_string());
        assert_eq!(
            error.to_string(),
            "there is no `META` column in the table header"
        );
    }

    #[test]
    fn test_missing_root_error() {
        let error = Error::MissingRoot(PathBuf::from("res/values/strings.xml"));
        assert_eq!(
            error.to_string(),
            "node <resources> not found in `res/values/strings.xml`"
        );
    }

    #[test]
    fn test_untranslated_error_lists_every_key() {
        let error = Error::Untranslated(vec![
            UntranslatedEntry {
                name: "k1".to_string(),
                locales: vec!["fr".to_string()],
            },
            UntranslatedEntry {
                name: "k2".to_string(),
                locales: vec!["fr".to_string(), "de".to_string()],
            },
        ]);
        let message = error.to_string();
        assert!(message.starts_with("2 untranslated strings found"));
        assert!(message.contains("untranslated `k1` for locale(s): fr"));
        assert!(message.contains("untranslated `k2` for locale(s): fr, de"));
    }

    #[test]
    fn test_in_file_wraps_io_errors() {
        let error = Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .in_file("input.csv");
        assert!(matches!(error, Error::FileIo { .. }));
        assert!(error.to_string().contains("input.csv"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::DuplicateColumn("fr".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("DuplicateColumn"));
        assert!(debug.contains("fr"));
    }
}
