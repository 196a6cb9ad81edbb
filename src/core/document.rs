//! Core document model
//!
//! [`DocumentRef`] names a note in the document store; [`Document`] is the
//! decoded form of one note's content, held only for the duration of a single
//! edit.

use crate::core::front_matter::FrontmatterBlock;
use crate::error::Result;
use crate::io::formatter::{self, EncodeStyle};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A reference to a document in the store, identified by its path
#[derive(Debug, Clone)]
pub struct DocumentRef {
    path: String,
    name: String,
}

impl DocumentRef {
    /// Create a reference from a store path; the name is the last path segment
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name including extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without the `.md` extension
    pub fn basename(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(&self.name)
    }
}

// Identity is the path alone.
impl PartialEq for DocumentRef {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DocumentRef {}

impl Hash for DocumentRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for DocumentRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DocumentRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl From<&str> for DocumentRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// A note's content split into front matter and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    front_matter: FrontmatterBlock,
    body: String,
}

impl Document {
    /// Create a new document from front matter and body
    pub fn new(front_matter: FrontmatterBlock, body: impl Into<String>) -> Self {
        Self {
            front_matter,
            body: body.into(),
        }
    }

    /// Decode raw content. Never fails: malformed front matter degrades to an
    /// empty block with the whole content kept as body.
    pub fn parse(content: &str) -> Self {
        let (front_matter, body) = formatter::decode(content);
        Self::new(front_matter, body)
    }

    /// Encode back into note content
    pub fn render(&self, style: EncodeStyle) -> Result<String> {
        formatter::encode(&self.front_matter, &self.body, style)
    }

    pub fn front_matter(&self) -> &FrontmatterBlock {
        &self.front_matter
    }

    pub fn front_matter_mut(&mut self) -> &mut FrontmatterBlock {
        &mut self.front_matter
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Check if the document has any front matter properties
    pub fn has_front_matter(&self) -> bool {
        !self.front_matter.is_empty()
    }
}
