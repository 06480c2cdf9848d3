//! The file formats reseda reads and writes.
//!
//! This module re-exports the main type of each format and provides the
//! [`ResourceFile`] enum naming the two files of a resource folder.

pub mod android_arrays;
pub mod android_strings;
pub mod csv;
pub(crate) mod xml;

use std::fmt::{Display, Formatter};

// Reexporting the formats for easier access
pub use android_arrays::Format as AndroidArraysFormat;
pub use android_strings::Format as AndroidStringsFormat;
pub use csv::Format as CsvFormat;

/// One of the files inside a `values*` folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFile {
    /// `strings.xml`, required in every folder.
    Strings,
    /// `arrays.xml`, optional.
    Arrays,
}

/// Implements [`std::fmt::Display`] for [`ResourceFile`] as the file name.
///
/// # Example
/// ```rust
/// use reseda::formats::ResourceFile;
/// assert_eq!(ResourceFile::Strings.to_string(), "strings.xml");
/// assert_eq!(ResourceFile::Arrays.to_string(), "arrays.xml");
/// ```
impl Display for ResourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

impl ResourceFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            ResourceFile::Strings => "strings.xml",
            ResourceFile::Arrays => "arrays.xml",
        }
    }

    /// Whether a folder without this file is an error.
    pub fn is_required(&self) -> bool {
        matches!(self, ResourceFile::Strings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_file_names() {
        assert_eq!(ResourceFile::Strings.file_name(), "strings.xml");
        assert_eq!(ResourceFile::Arrays.file_name(), "arrays.xml");
        assert!(ResourceFile::Strings.is_required());
        assert!(!ResourceFile::Arrays.is_required());
    }
}
