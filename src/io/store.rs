//! Document storage
//!
//! The batch engine and the note commands talk to storage only through
//! [`DocumentStore`], addressing documents by vault-relative paths such as
//! `People/Jane Doe.md`. [`FsDocumentStore`] maps those paths onto a
//! directory; [`MemoryDocumentStore`] keeps everything in memory.

use crate::core::document::DocumentRef;
use crate::error::{PersonoteError, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Read/write access to documents by path
pub trait DocumentStore {
    /// Read a document's content; `NotFound` if it does not exist
    fn read(&self, path: &str) -> Result<String>;

    /// Overwrite an existing document
    fn write(&mut self, path: &str, content: &str) -> Result<()>;

    /// Create a new document; `AlreadyExists` if the path is taken
    fn create(&mut self, path: &str, content: &str) -> Result<DocumentRef>;

    fn exists(&self, path: &str) -> bool;
}

/// Normalize a vault path: forward slashes, no empty or `.` segments, no
/// leading or trailing slash.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Configuration for the filesystem store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Use atomic writes (write to temp file first, then rename)
    pub atomic_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            atomic_writes: true,
        }
    }
}

/// A document store rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
    config: StoreConfig,
}

impl FsDocumentStore {
    /// Create a new store with default configuration
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, StoreConfig::default())
    }

    /// Create a new store with custom configuration
    pub fn with_config(root: impl Into<PathBuf>, config: StoreConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a vault path to a location under the root.
    ///
    /// Rejects `..` and absolute components before any filesystem access.
    pub fn resolve_path(&self, path: &str) -> Result<PathBuf> {
        let normalized = normalize_path(path);
        let relative = Path::new(&normalized);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(PersonoteError::path_outside_vault(relative)),
            }
        }
        Ok(self.root.join(relative))
    }

    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        let parent_dir = target.parent().unwrap_or_else(|| Path::new("."));

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(target).map_err(|e| {
            PersonoteError::Io(std::io::Error::other(format!(
                "Failed to persist temporary file: {}",
                e
            )))
        })?;
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn read(&self, path: &str) -> Result<String> {
        let target = self.resolve_path(path)?;
        if !target.is_file() {
            return Err(PersonoteError::not_found(normalize_path(path)));
        }
        Ok(fs::read_to_string(&target)?)
    }

    fn write(&mut self, path: &str, content: &str) -> Result<()> {
        let target = self.resolve_path(path)?;
        if !target.is_file() {
            return Err(PersonoteError::not_found(normalize_path(path)));
        }
        debug!("Writing {}", target.display());
        if self.config.atomic_writes {
            self.write_atomic(&target, content)
        } else {
            Ok(fs::write(&target, content)?)
        }
    }

    fn create(&mut self, path: &str, content: &str) -> Result<DocumentRef> {
        let normalized = normalize_path(path);
        let target = self.resolve_path(&normalized)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    PersonoteError::already_exists(normalized.clone())
                }
                _ => PersonoteError::Io(e),
            })?;
        file.write_all(content.as_bytes())?;
        debug!("Created {}", target.display());
        Ok(DocumentRef::new(normalized))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path(path)
            .map(|target| target.exists())
            .unwrap_or(false)
    }
}

/// An in-memory document store
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<String, String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for seeding a store
    pub fn with_document(mut self, path: &str, content: &str) -> Self {
        self.documents
            .insert(normalize_path(path), content.to_string());
        self
    }

    /// All stored paths in order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self, path: &str) -> Result<String> {
        let key = normalize_path(path);
        self.documents
            .get(&key)
            .cloned()
            .ok_or_else(|| PersonoteError::not_found(key))
    }

    fn write(&mut self, path: &str, content: &str) -> Result<()> {
        let key = normalize_path(path);
        match self.documents.get_mut(&key) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(PersonoteError::not_found(key)),
        }
    }

    fn create(&mut self, path: &str, content: &str) -> Result<DocumentRef> {
        let key = normalize_path(path);
        if self.documents.contains_key(&key) {
            return Err(PersonoteError::already_exists(key));
        }
        self.documents.insert(key.clone(), content.to_string());
        Ok(DocumentRef::new(key))
    }

    fn exists(&self, path: &str) -> bool {
        self.documents.contains_key(&normalize_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/People//Jane.md/"), "People/Jane.md");
        assert_eq!(normalize_path("./People\\Jane.md"), "People/Jane.md");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_fs_store_create_read_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsDocumentStore::new(temp_dir.path());

        let doc = store.create("People/Jane Doe.md", "hello").unwrap();
        assert_eq!(doc.path(), "People/Jane Doe.md");
        assert!(store.exists("People/Jane Doe.md"));
        assert_eq!(store.read("People/Jane Doe.md").unwrap(), "hello");

        store.write("People/Jane Doe.md", "updated").unwrap();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("People/Jane Doe.md")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_fs_store_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FsDocumentStore::new(temp_dir.path());

        assert!(matches!(
            store.read("missing.md"),
            Err(PersonoteError::NotFound { .. })
        ));
        assert!(matches!(
            store.write("missing.md", "x"),
            Err(PersonoteError::NotFound { .. })
        ));

        store.create("a.md", "first").unwrap();
        assert!(matches!(
            store.create("a.md", "second"),
            Err(PersonoteError::AlreadyExists { .. })
        ));
        assert_eq!(store.read("a.md").unwrap(), "first");

        assert!(matches!(
            store.read("../outside.md"),
            Err(PersonoteError::PathOutsideVault { .. })
        ));
        assert!(!store.exists("../outside.md"));
    }

    #[test]
    fn test_fs_store_direct_writes() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            atomic_writes: false,
        };
        let mut store = FsDocumentStore::with_config(temp_dir.path(), config);
        store.create("note.md", "a").unwrap();
        store.write("note.md", "b").unwrap();
        assert_eq!(store.read("note.md").unwrap(), "b");
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryDocumentStore::new().with_document("/notes/a.md", "a");
        assert!(store.exists("notes/a.md"));
        assert_eq!(store.read("notes//a.md").unwrap(), "a");
        assert!(matches!(
            store.create("notes/a.md", "again"),
            Err(PersonoteError::AlreadyExists { .. })
        ));
        assert!(store.write("notes/b.md", "b").is_err());
        store.create("notes/b.md", "b").unwrap();
        assert_eq!(store.paths().collect::<Vec<_>>(), ["notes/a.md", "notes/b.md"]);
    }
}
