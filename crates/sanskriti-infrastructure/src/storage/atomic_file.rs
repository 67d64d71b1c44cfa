//! Atomic file operations for JSON and TOML documents.
//!
//! Provides a thin layer for safe concurrent access to small documents such as
//! the key-value store and the configuration file.

use fs2::FileExt;
use sanskriti_core::PersistenceError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// TOML parse error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicFileError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicFileError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<serde_json::Error> for AtomicFileError {
    fn from(e: serde_json::Error) -> Self {
        AtomicFileError::JsonError(e)
    }
}

impl From<toml::de::Error> for AtomicFileError {
    fn from(e: toml::de::Error) -> Self {
        AtomicFileError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicFileError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicFileError::TomlSerError(e)
    }
}

impl From<AtomicFileError> for PersistenceError {
    fn from(e: AtomicFileError) -> Self {
        match e {
            AtomicFileError::IoError(e) => e.into(),
            AtomicFileError::JsonError(e) => e.into(),
            AtomicFileError::TomlError(e) => PersistenceError::serialization("TOML", e.to_string()),
            AtomicFileError::TomlSerError(e) => {
                PersistenceError::serialization("TOML", e.to_string())
            }
            AtomicFileError::LockError(message) => PersistenceError::Lock(message),
        }
    }
}

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

/// A handle to a document file with atomic replace semantics.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: File locking serializes read-modify-write cycles
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data = match self.format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };
        Ok(Some(data))
    }

    /// Saves data to the file atomically.
    ///
    /// A failure at any step leaves the previous file content untouched.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = match self.format {
            FileFormat::Json => serde_json::to_string_pretty(data)?,
            FileFormat::Toml => toml::to_string_pretty(data)?,
        };

        // Write to temporary file in the same directory
        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// `f` receives the current document (or `default_value` if there is
    /// none). The document is written back only if `f` returns `Ok`.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R, AtomicFileError>
    where
        F: FnOnce(&mut T) -> Result<R, AtomicFileError>,
    {
        let _lock = self.acquire_lock()?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    /// Like [`update`](Self::update), but a document that fails to parse is
    /// handed to `recover` under the same lock and replaced by
    /// `default_value`.
    pub fn update_or_recover<F, G, R>(
        &self,
        default_value: T,
        recover: G,
        f: F,
    ) -> Result<R, AtomicFileError>
    where
        F: FnOnce(&mut T) -> Result<R, AtomicFileError>,
        G: FnOnce(&Path, AtomicFileError) -> Result<(), AtomicFileError>,
    {
        let _lock = self.acquire_lock()?;

        let mut data = match self.load() {
            Ok(data) => data.unwrap_or(default_value),
            Err(e @ (AtomicFileError::JsonError(_) | AtomicFileError::TomlError(_))) => {
                recover(&self.path, e)?;
                default_value
            }
            Err(e) => return Err(e),
        };
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    fn get_temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }

    fn acquire_lock(&self) -> Result<FileLock, AtomicFileError> {
        FileLock::acquire(&self.path)
    }
}

/// A file lock guard. The lock is released when the handle is dropped.
///
/// The lock file itself is left in place: unlinking it would let a later
/// writer lock a fresh inode while an earlier one still holds the old one.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { _file: file })
    }
}
