//! Batch property editing
//!
//! [`BatchEditor`] applies one [`EditOperation`] to every document of a
//! [`SelectionSet`], one document at a time: read, decode, edit, encode,
//! write. A failure on one document is recorded in the [`MutationReport`]
//! and the batch moves on to the next.

use crate::core::document::{Document, DocumentRef};
use crate::core::edit::{EditKind, EditOperation};
use crate::core::selection::SelectionSet;
use crate::error::{PersonoteError, Result};
use crate::io::formatter::EncodeStyle;
use crate::io::store::DocumentStore;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Options for a batch edit
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Compute every change but write nothing
    pub dry_run: bool,
    /// Layout of rewritten front matter
    pub style: EncodeStyle,
}

/// Outcome of a batch edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    pub operation: EditOperation,
    /// Documents processed without error, changed or not
    pub succeeded: usize,
    /// Documents whose content changed (or would change, on a dry run)
    pub modified: Vec<DocumentRef>,
    /// Documents that failed, with the reason
    pub failures: Vec<(DocumentRef, String)>,
    /// The batch stopped early on request
    pub cancelled: bool,
}

impl MutationReport {
    fn new(operation: &EditOperation) -> Self {
        Self {
            operation: operation.clone(),
            succeeded: 0,
            modified: Vec::new(),
            failures: Vec::new(),
            cancelled: false,
        }
    }

    /// Successful documents that needed no change
    pub fn unchanged(&self) -> usize {
        self.succeeded - self.modified.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// One-line notice for the user, counting the files actually changed
    pub fn summary(&self) -> String {
        let op = &self.operation;
        let verb = op.kind.past_tense();
        let action = match op.kind {
            EditKind::Add => format!(
                "{} \"{}\" to \"{}\"",
                verb, op.property_value, op.property_name
            ),
            EditKind::Replace => format!(
                "{} \"{}\" with \"{}\"",
                verb, op.property_name, op.property_value
            ),
            EditKind::Delete => format!("{} \"{}\"", verb, op.property_name),
        };

        let mut summary = format!(
            "Batch edit completed: {} for {} files",
            action,
            self.modified.len()
        );
        if self.unchanged() > 0 {
            summary.push_str(&format!(" ({} unchanged)", self.unchanged()));
        }
        if self.has_failures() {
            summary.push_str(&format!(" ({} failed)", self.failures.len()));
        }
        if self.cancelled {
            summary.push_str(" (cancelled)");
        }
        summary
    }
}

/// Applies edit operations to documents of a store
pub struct BatchEditor<'s, S: DocumentStore + ?Sized> {
    store: &'s mut S,
    options: BatchOptions,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'s, S: DocumentStore + ?Sized> BatchEditor<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self::with_options(store, BatchOptions::default())
    }

    pub fn with_options(store: &'s mut S, options: BatchOptions) -> Self {
        Self {
            store,
            options,
            cancel: None,
        }
    }

    /// Stop before the next document once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Apply `operation` to every selected document, in path order.
    ///
    /// An empty selection or an unusable operation is rejected before any
    /// document is read.
    pub fn apply(
        &mut self,
        selection: &SelectionSet,
        operation: &EditOperation,
    ) -> Result<MutationReport> {
        if selection.is_empty() {
            return Err(PersonoteError::EmptySelection);
        }
        operation.validate()?;

        let mut report = MutationReport::new(operation);
        for document in selection {
            if self.is_cancelled() {
                info!("Batch edit cancelled before {}", document);
                report.cancelled = true;
                break;
            }

            match self.edit_document(document, operation) {
                Ok(changed) => {
                    report.succeeded += 1;
                    if changed {
                        report.modified.push(document.clone());
                    }
                }
                Err(e) if e.is_item_local() => {
                    warn!("Failed to edit {}: {}", document, e);
                    report.failures.push((document.clone(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Processed {} files: {} modified, {} unchanged, {} failed",
            report.succeeded + report.failures.len(),
            report.modified.len(),
            report.unchanged(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Edit one document, returning whether its content changed
    fn edit_document(&mut self, document: &DocumentRef, operation: &EditOperation) -> Result<bool> {
        let content = self.store.read(document.path())?;
        let mut parsed = Document::parse(&content);

        if !operation.apply(parsed.front_matter_mut()) {
            debug!("No change: {}", document);
            return Ok(false);
        }

        let updated = parsed.render(self.options.style)?;
        if updated == content {
            debug!("No change after encoding: {}", document);
            return Ok(false);
        }

        if self.options.dry_run {
            debug!("Would update: {}", document);
        } else {
            self.store.write(document.path(), &updated)?;
            debug!("Updated: {}", document);
        }
        Ok(true)
    }
}
