//! Traits for parsing and serializing single resource files.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::error::Error;

/// A trait for parsing and writing one resource file.
///
/// # Example
///
/// ```rust,no_run
/// use reseda::traits::Parser;
/// let format = reseda::formats::AndroidStringsFormat::read_from("res/values/strings.xml")?;
/// format.write_to("out/values/strings.xml")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file_io(path, e))?;
        Self::from_reader(BufReader::new(file)).map_err(|e| e.in_file(path))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path, replacing it atomically (see [`persist_with`]).
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        persist_with(path.as_ref(), |writer| self.to_writer(writer))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Serialize into a `String`.
    fn write_to_string(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::DataMismatch(e.to_string()))
    }
}

/// Writes a file through a temporary sibling that is renamed over `path`
/// only once `write` succeeded, so a failed run never leaves a truncated
/// file behind.
pub fn persist_with<F>(path: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut BufWriter<NamedTempFile>) -> Result<(), Error>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir).map_err(|e| Error::file_io(dir, e))?;
    let mut writer = BufWriter::new(temp);
    write(&mut writer).map_err(|e| e.in_file(path))?;
    let temp = writer
        .into_inner()
        .map_err(|e| Error::file_io(path, e.into_error()))?;
    temp.persist(path).map_err(|e| Error::file_io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_persist_with_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        persist_with(&path, |w| w.write_all(b"new").map_err(Error::Io)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_persist_with_keeps_old_file_on_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        let result = persist_with(&path, |w| {
            w.write_all(b"partial").map_err(Error::Io)?;
            Err(Error::DataMismatch("boom".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_persist_with_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = persist_with(&path, |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::FileIo { .. }));
    }
}
