//! Durable storage for the ledger document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Single-document key/value boundary.
///
/// Writes are last-writer-wins; there is only one logical writer.
pub trait LedgerStore {
    /// The stored document, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    fn write(&mut self, document: &str) -> Result<(), StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for &mut T {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&mut self, document: &str) -> Result<(), StoreError> {
        (**self).write(document)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            quota: None,
        }
    }

    /// Reject writes larger than `bytes`, like a full browser storage.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl LedgerStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            if document.len() > quota {
                return Err(StoreError::Unavailable(format!(
                    "quota of {quota} bytes exceeded ({} bytes)",
                    document.len()
                )));
            }
        }
        self.document = Some(document.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.document = None;
        Ok(())
    }
}

/// JSON file on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, document: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, document)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}
