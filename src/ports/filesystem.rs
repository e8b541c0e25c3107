//! Filesystem port for reading, writing, walking and deleting trees.

use std::path::{Path, PathBuf};

/// Provides filesystem access for the pipeline and the auditors.
///
/// Abstracting the filesystem lets the orchestrator, watch controller and
/// auditors run against an in-memory tree in tests.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Reads the raw bytes of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes raw bytes to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_bytes(
        &self,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Reads a file as text, replacing invalid UTF-8 sequences.
    ///
    /// For scanners that must not stop on binary assets.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_lossy(&self, path: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(String::from_utf8_lossy(&self.read(path)?).into_owned())
    }

    /// Writes the given contents to a file, creating parent directories and
    /// overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns every regular file below `root`, recursively, in sorted order.
    ///
    /// A missing root yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory below `root` cannot be read.
    fn walk(&self, root: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>>;

    /// Deletes a single file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Recursively deletes a directory tree. A missing tree is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree exists but cannot be removed.
    fn remove_dir_all(&self, path: &Path)
        -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
