//! Hierarchical enumeration of documents
//!
//! A [`FileTreeProvider`] hands out the vault as a tree of folders and notes.
//! The selection tree mirrors whatever the provider returns.

use crate::core::document::DocumentRef;
use crate::error::Result;
use crate::io::store::{normalize_path, MemoryDocumentStore};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One node of a file tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    Folder(Folder),
    Note(DocumentRef),
}

/// A folder and its children, in provider order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    /// Vault-relative path; empty for the vault root
    pub path: String,
    pub children: Vec<TreeEntry>,
}

impl Folder {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Build a tree from flat note paths, creating folders as needed
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = Self::new("", "");
        for path in paths {
            let path = normalize_path(path.as_ref());
            if !path.is_empty() {
                root.insert_note(&path);
            }
        }
        root
    }

    fn insert_note(&mut self, path: &str) {
        let segments: Vec<&str> = path.split('/').collect();
        let mut folder = self;
        for (i, segment) in segments[..segments.len() - 1].iter().enumerate() {
            let folder_path = segments[..=i].join("/");
            let position = folder
                .children
                .iter()
                .position(|child| matches!(child, TreeEntry::Folder(f) if f.path == folder_path));
            let index = match position {
                Some(index) => index,
                None => {
                    folder
                        .children
                        .push(TreeEntry::Folder(Folder::new(*segment, folder_path)));
                    folder.children.len() - 1
                }
            };
            folder = match &mut folder.children[index] {
                TreeEntry::Folder(child) => child,
                TreeEntry::Note(_) => return,
            };
        }
        folder.children.push(TreeEntry::Note(DocumentRef::new(path)));
    }
}

/// Source of the vault's folder/note hierarchy
pub trait FileTreeProvider {
    fn root(&self) -> Result<Folder>;
}

impl FileTreeProvider for Folder {
    fn root(&self) -> Result<Folder> {
        Ok(self.clone())
    }
}

impl FileTreeProvider for MemoryDocumentStore {
    fn root(&self) -> Result<Folder> {
        Ok(Folder::from_paths(self.paths()))
    }
}

/// Configuration for directory enumeration
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Follow symbolic links
    pub follow_links: bool,
    /// Include hidden files and folders (starting with .)
    pub include_hidden: bool,
    /// File extensions treated as notes
    pub include_extensions: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            include_hidden: false,
            include_extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

/// Enumerates a vault directory on disk
pub struct FsTreeProvider {
    root: PathBuf,
    config: TreeConfig,
}

impl FsTreeProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, TreeConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: TreeConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    fn read_folder(&self, dir: &Path, folder: &mut Folder) -> Result<()> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !self.config.include_hidden && name.starts_with('.') {
                continue;
            }

            let path = if folder.path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", folder.path, name)
            };

            if entry.file_type().is_dir() {
                let mut child = Folder::new(name, path);
                self.read_folder(entry.path(), &mut child)?;
                folder.children.push(TreeEntry::Folder(child));
            } else if entry.file_type().is_file() && self.is_note(entry.path()) {
                folder.children.push(TreeEntry::Note(DocumentRef::new(path)));
            }
        }
        Ok(())
    }

    fn is_note(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.config.include_extensions.contains(&ext)
            })
            .unwrap_or(false)
    }
}

impl FileTreeProvider for FsTreeProvider {
    fn root(&self) -> Result<Folder> {
        let name = self
            .root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut root = Folder::new(name, "");
        self.read_folder(&self.root, &mut root)?;
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_paths() {
        let root = Folder::from_paths(["People/Jane.md", "People/Family/Bob.md", "index.md"]);
        assert_eq!(root.children.len(), 2);

        let TreeEntry::Folder(people) = &root.children[0] else {
            panic!("expected folder");
        };
        assert_eq!(people.path, "People");
        assert_eq!(people.children.len(), 2);
        assert_eq!(
            people.children[0],
            TreeEntry::Note(DocumentRef::new("People/Jane.md"))
        );
        assert!(matches!(&people.children[1], TreeEntry::Folder(f) if f.path == "People/Family"));
        assert_eq!(root.children[1], TreeEntry::Note(DocumentRef::new("index.md")));
    }

    #[test]
    fn test_fs_tree_provider() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("People/Family")).unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::write(root.join("People/Jane.md"), "").unwrap();
        fs::write(root.join("People/Family/Bob.markdown"), "").unwrap();
        fs::write(root.join("People/photo.png"), "").unwrap();
        fs::write(root.join(".obsidian/workspace.md"), "").unwrap();
        fs::write(root.join("index.md"), "").unwrap();

        let tree = FsTreeProvider::new(root).root().unwrap();
        assert_eq!(tree.path, "");
        assert_eq!(tree.children.len(), 2);

        let TreeEntry::Folder(people) = &tree.children[0] else {
            panic!("expected folder");
        };
        assert_eq!(people.name, "People");
        assert_eq!(people.children.len(), 2);
        let TreeEntry::Folder(family) = &people.children[0] else {
            panic!("expected folder");
        };
        assert_eq!(
            family.children,
            vec![TreeEntry::Note(DocumentRef::new("People/Family/Bob.markdown"))]
        );
        assert_eq!(
            people.children[1],
            TreeEntry::Note(DocumentRef::new("People/Jane.md"))
        );
        assert_eq!(tree.children[1], TreeEntry::Note(DocumentRef::new("index.md")));
    }
}
