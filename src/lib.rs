//! personote: person notes and batch front matter editing for Markdown vaults
//!
//! This library keeps a folder of Markdown notes about people. It creates
//! notes from a template, imports contact cards (VCF) as notes, and applies
//! one property edit to the front matter of many selected notes at once.
//!
//! # Features
//!
//! - **Front matter codec** that never touches the note body and never fails
//!   on a malformed metadata block
//! - **Typed properties**: every value is a scalar or a duplicate-free list
//! - **Batch edits** (add, replace, delete) with per-document failure reporting,
//!   dry runs and cancellation
//! - **Selection trees** mirroring the vault's folders, with checkbox states
//! - **Contact import** from VCF files into template-based person notes
//! - **Pluggable storage**: a filesystem store with atomic writes, or an
//!   in-memory store
//!
//! # Quick Start
//!
//! ## Batch editing
//!
//! ```rust,no_run
//! use personote::{BatchEditor, DocumentRef, EditOperation, FsDocumentStore, PropertyType, Result, SelectionSet};
//!
//! fn main() -> Result<()> {
//!     let mut store = FsDocumentStore::new("vault");
//!     let selection: SelectionSet = ["People/Jane Doe.md", "People/Bob.md"]
//!         .into_iter()
//!         .map(DocumentRef::new)
//!         .collect();
//!
//!     let op = EditOperation::add("tags", PropertyType::List, "friend,colleague");
//!     let report = BatchEditor::new(&mut store).apply(&selection, &op)?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Selecting from the folder tree
//!
//! ```rust,no_run
//! use personote::{FileTreeProvider, FsTreeProvider, Result, SelectionNode, SelectionSet};
//!
//! fn main() -> Result<()> {
//!     let tree = SelectionNode::build(&FsTreeProvider::new("vault").root()?);
//!     let mut selection = SelectionSet::new();
//!     if let Some(people) = tree.find("People") {
//!         people.toggle(&mut selection, true);
//!     }
//!     println!("{} notes selected", selection.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Importing contacts
//!
//! ```rust,no_run
//! use personote::{import_contacts, FsDocumentStore, LogNotifier, Result, Settings};
//!
//! fn main() -> Result<()> {
//!     let mut store = FsDocumentStore::new("vault");
//!     let settings = Settings {
//!         contacts_import_path: Some("Contacts/contacts.vcf".to_string()),
//!         ..Default::default()
//!     };
//!     let report = import_contacts(&mut store, &settings, &LogNotifier)?;
//!     println!("{} notes created", report.created.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: the document model, property values, edit rules and selections
//! - [`io`]: the front matter codec, document stores and folder trees
//! - [`batch`]: the batch edit engine
//! - [`notes`] and [`contacts`]: person notes and VCF parsing
//! - [`config`], [`notify`] and [`error`]: settings, user notices and errors

// Public API exports
pub use error::{PersonoteError, Result};

// Core types
pub use core::{
    CheckState, Document, DocumentRef, EditKind, EditOperation, FrontmatterBlock, PropertyType,
    PropertyValue, SelectionNode, SelectionSet,
};

// IO types
pub use io::{
    DocumentStore, EncodeStyle, FileTreeProvider, Folder, FsDocumentStore, FsTreeProvider,
    MemoryDocumentStore, StoreConfig, TreeConfig, TreeEntry,
};

pub use batch::{BatchEditor, BatchOptions, MutationReport};
pub use config::Settings;
pub use contacts::{parse_records, ContactRecord};
pub use notes::{create_person_note, import_contacts, ImportReport, TemplateFields};
pub use notify::{ConsoleNotifier, InputSource, LogNotifier, Notifier, RecordingNotifier};

pub mod batch;
pub mod config;
pub mod contacts;
pub mod core;
pub mod error;
pub mod io;
pub mod notes;
pub mod notify;

// CLI components are available only in the binary, not as part of the library API
