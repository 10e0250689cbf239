//! Data sources the simulator can read through to

use std::collections::HashMap;
use std::path::Path;

use readthru::DataSource;
use tracing::info;

use crate::error::{Error, Result};
use crate::parser;

/// Answers every key with the key itself
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoSource;

impl DataSource<String, String> for EchoSource {
    type Error = Error;

    fn get(&self, key: &String) -> Result<String> {
        Ok(key.clone())
    }
}

/// Fixed key/value table loaded from a file
///
/// Requests for keys outside the table fail with [`Error::MissingKey`].
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    entries: HashMap<String, String>,
}

impl TableSource {
    /// Load a table file; later entries for a key replace earlier ones
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::parse(&text)?;
        info!(path = %path.display(), entries = table.len(), "loaded table source");
        Ok(table)
    }

    /// Build a table from its textual form
    pub fn parse(text: &str) -> Result<Self> {
        Ok(parser::parse_table(text)?.into_iter().collect())
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for TableSource {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl DataSource<String, String> for TableSource {
    type Error = Error;

    fn get(&self, key: &String) -> Result<String> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| Error::MissingKey(key.clone()))
    }
}

/// Source selected on the command line
#[derive(Debug, Clone)]
pub enum Source {
    /// Echo keys back
    Echo(EchoSource),
    /// Look keys up in a table
    Table(TableSource),
}

impl DataSource<String, String> for Source {
    type Error = Error;

    fn get(&self, key: &String) -> Result<String> {
        match self {
            Source::Echo(source) => source.get(key),
            Source::Table(source) => source.get(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_echo() {
        assert_eq!(EchoSource.get(&"abc".to_string()).unwrap(), "abc");
    }

    #[test]
    fn test_table_lookup() {
        let table = TableSource::parse("a = 1\nb = 2\na = 3\n").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"a".to_string()).unwrap(), "3");
        assert_eq!(table.get(&"b".to_string()).unwrap(), "2");
    }

    #[test]
    fn test_table_missing_key() {
        let table = TableSource::parse("a = 1\n").unwrap();

        match table.get(&"zzz".to_string()) {
            Err(Error::MissingKey(key)) => assert_eq!(key, "zzz"),
            other => panic!("expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_table_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# fixture").unwrap();
        writeln!(file, "user:1 = alice").unwrap();
        writeln!(file, "user:2 = bob").unwrap();

        let table = TableSource::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"user:2".to_string()).unwrap(), "bob");
    }

    #[test]
    fn test_table_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TableSource::load(&dir.path().join("absent.tbl"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_source_dispatch() {
        let echo = Source::Echo(EchoSource);
        let table = Source::Table(TableSource::parse("k = v").unwrap());

        assert_eq!(echo.get(&"k".to_string()).unwrap(), "k");
        assert_eq!(table.get(&"k".to_string()).unwrap(), "v");
        assert!(table.get(&"x".to_string()).is_err());
    }
}
