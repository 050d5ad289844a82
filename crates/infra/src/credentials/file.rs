//! Token file store
//!
//! Keeps the token under `[auth] token = "..."` in a TOML file. Other
//! sections in the file are preserved on write; clearing removes the whole
//! `[auth]` section.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use t3tracker_core::CredentialStore;
use t3tracker_domain::constants::{CREDENTIALS_SECTION, CREDENTIALS_TOKEN_KEY};
use t3tracker_domain::{Result, TrackerError};
use toml::{Table, Value};
use tracing::debug;

use crate::errors::InfraError;

/// [`CredentialStore`] backed by a TOML file
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Table> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Table::new()),
            Err(err) => return Err(InfraError::from(err).into()),
        };
        toml::from_str(&contents).map_err(|err| TrackerError::from(InfraError::from(err)))
    }

    fn write_table(&self, table: &Table) -> Result<()> {
        let contents =
            toml::to_string(table).map_err(|err| TrackerError::from(InfraError::from(err)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| TrackerError::from(InfraError::from(err)))?;
        }
        fs::write(&self.path, contents).map_err(|err| TrackerError::from(InfraError::from(err)))
    }
}

impl CredentialStore for FileCredentialStore {
    fn get_token(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        let table = self.read_table()?;

        Ok(table
            .get(CREDENTIALS_SECTION)
            .and_then(Value::as_table)
            .and_then(|section| section.get(CREDENTIALS_TOKEN_KEY))
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn save_token(&self, token: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut table = self.read_table()?;

        let section = table
            .entry(CREDENTIALS_SECTION)
            .or_insert_with(|| Value::Table(Table::new()));
        let Value::Table(section) = section else {
            return Err(TrackerError::Storage(format!(
                "'{CREDENTIALS_SECTION}' in {} is not a table",
                self.path.display()
            )));
        };
        section.insert(CREDENTIALS_TOKEN_KEY.to_string(), Value::String(token.to_string()));

        self.write_table(&table)?;
        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let _guard = self.lock.lock();
        let mut table = self.read_table()?;

        if table.remove(CREDENTIALS_SECTION).is_some() {
            self.write_table(&table)?;
            debug!(path = %self.path.display(), "Token cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_reads_as_no_token() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.toml"));

        assert_eq!(store.get_token().unwrap(), None);
        store.clear_token().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/credentials.toml"));

        store.save_token("abc123").unwrap();
        assert_eq!(store.get_token().unwrap().as_deref(), Some("abc123"));

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("[auth]"));
        assert!(written.contains("token = \"abc123\""));

        store.clear_token().unwrap();
        assert_eq!(store.get_token().unwrap(), None);
    }

    #[test]
    fn other_sections_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        fs::write(&path, "[ui]\ntheme = \"dark\"\n").unwrap();

        let store = FileCredentialStore::new(&path);
        store.save_token("abc123").unwrap();
        store.clear_token().unwrap();

        let table: Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(table["ui"]["theme"].as_str(), Some("dark"));
        assert!(table.get("auth").is_none());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        fs::write(&path, "[auth\ntoken = ").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.get_token(), Err(TrackerError::Storage(_))));
    }
}
