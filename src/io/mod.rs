//! I/O: the front matter codec, document stores and folder trees

pub mod formatter;
pub mod store;
pub mod tree;

pub use formatter::{decode, encode, EncodeStyle};
pub use store::{normalize_path, DocumentStore, FsDocumentStore, MemoryDocumentStore, StoreConfig};
pub use tree::{FileTreeProvider, Folder, FsTreeProvider, TreeConfig, TreeEntry};
