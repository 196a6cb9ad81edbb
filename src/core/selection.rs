//! Checkbox-style document selection
//!
//! [`SelectionNode`] mirrors a provider's folder tree. A [`SelectionSet`] is
//! an explicit value holding the selected documents; toggling a folder sets
//! every note below it, toggling a note sets just that note.

use crate::core::document::DocumentRef;
use crate::io::tree::{Folder, TreeEntry};
use std::collections::btree_set::{self, BTreeSet};

/// Documents chosen for a batch edit, unique by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    documents: BTreeSet<DocumentRef>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove exactly one document
    pub fn toggle_leaf(&mut self, document: &DocumentRef, selected: bool) {
        if selected {
            self.documents.insert(document.clone());
        } else {
            self.documents.remove(document);
        }
    }

    /// Set every note below `node` to `selected`
    pub fn toggle_container(&mut self, node: &SelectionNode, selected: bool) {
        for leaf in node.leaves() {
            self.toggle_leaf(leaf, selected);
        }
    }

    pub fn contains(&self, document: &DocumentRef) -> bool {
        self.documents.contains(document)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Selected documents in path order
    pub fn iter(&self) -> btree_set::Iter<'_, DocumentRef> {
        self.documents.iter()
    }
}

impl FromIterator<DocumentRef> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = DocumentRef>>(iter: T) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a DocumentRef;
    type IntoIter = btree_set::Iter<'a, DocumentRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Rendered checkbox state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
    /// Some, but not all, notes below a folder are selected
    Partial,
}

/// A node of the selection tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionNode {
    Container {
        name: String,
        path: String,
        children: Vec<SelectionNode>,
    },
    Leaf(DocumentRef),
}

impl SelectionNode {
    /// Build the selection tree for a folder.
    ///
    /// At every level sub-folders come first, then notes, each group in the
    /// provider's order.
    pub fn build(folder: &Folder) -> Self {
        let (folders, notes): (Vec<&TreeEntry>, Vec<&TreeEntry>) = folder
            .children
            .iter()
            .partition(|entry| matches!(entry, TreeEntry::Folder(_)));

        let children = folders
            .into_iter()
            .chain(notes)
            .map(|entry| match entry {
                TreeEntry::Folder(child) => Self::build(child),
                TreeEntry::Note(document) => Self::Leaf(document.clone()),
            })
            .collect();

        Self::Container {
            name: folder.name.clone(),
            path: folder.path.clone(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Container { name, .. } => name,
            Self::Leaf(document) => document.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Container { path, .. } => path,
            Self::Leaf(document) => document.path(),
        }
    }

    pub fn children(&self) -> &[SelectionNode] {
        match self {
            Self::Container { children, .. } => children,
            Self::Leaf(_) => &[],
        }
    }

    /// Every note at or below this node, depth first
    pub fn leaves(&self) -> Vec<&DocumentRef> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a DocumentRef>) {
        match self {
            Self::Leaf(document) => leaves.push(document),
            Self::Container { children, .. } => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }

    /// Find the node with the given path (folder or note)
    pub fn find(&self, path: &str) -> Option<&SelectionNode> {
        if self.path() == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(path))
    }

    /// Set this node in `selection`: a whole subtree or a single note
    pub fn toggle(&self, selection: &mut SelectionSet, selected: bool) {
        match self {
            Self::Leaf(document) => selection.toggle_leaf(document, selected),
            Self::Container { .. } => selection.toggle_container(self, selected),
        }
    }

    /// Checkbox state of this node for the given selection.
    ///
    /// A folder with no notes below it is unchecked.
    pub fn state(&self, selection: &SelectionSet) -> CheckState {
        let leaves = self.leaves();
        let selected = leaves.iter().filter(|doc| selection.contains(doc)).count();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == leaves.len() {
            CheckState::Checked
        } else {
            CheckState::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> SelectionNode {
        let folder = Folder::from_paths([
            "index.md",
            "People/Jane.md",
            "People/Family/Bob.md",
            "People/Family/Ann.md",
            "Projects/plan.md",
        ]);
        SelectionNode::build(&folder)
    }

    fn selected_paths(selection: &SelectionSet) -> Vec<&str> {
        selection.iter().map(DocumentRef::path).collect()
    }

    #[test]
    fn test_build_orders_containers_first() {
        let tree = sample_tree();
        let top: Vec<_> = tree.children().iter().map(SelectionNode::path).collect();
        assert_eq!(top, ["People", "Projects", "index.md"]);

        let people = tree.find("People").unwrap();
        let inner: Vec<_> = people.children().iter().map(SelectionNode::path).collect();
        assert_eq!(inner, ["People/Family", "People/Jane.md"]);
    }

    #[test]
    fn test_leaves_depth_first() {
        let tree = sample_tree();
        let leaves: Vec<_> = tree.leaves().into_iter().map(DocumentRef::path).collect();
        assert_eq!(
            leaves,
            [
                "People/Family/Bob.md",
                "People/Family/Ann.md",
                "People/Jane.md",
                "Projects/plan.md",
                "index.md",
            ]
        );
    }

    #[test]
    fn test_toggle_container_is_idempotent() {
        let tree = sample_tree();
        let people = tree.find("People").unwrap();

        let mut once = SelectionSet::new();
        once.toggle_container(people, true);

        let mut twice = SelectionSet::new();
        twice.toggle_container(people, true);
        twice.toggle_container(people, true);

        assert_eq!(once, twice);
        assert_eq!(
            selected_paths(&once),
            ["People/Family/Ann.md", "People/Family/Bob.md", "People/Jane.md"]
        );
    }

    #[test]
    fn test_toggle_container_off_empties_subtree() {
        let tree = sample_tree();
        let mut selection = SelectionSet::new();
        selection.toggle_leaf(&DocumentRef::new("index.md"), true);

        let family = tree.find("People/Family").unwrap();
        selection.toggle_container(family, true);
        assert_eq!(selection.len(), 3);

        selection.toggle_container(family, false);
        assert_eq!(selected_paths(&selection), ["index.md"]);
    }

    #[test]
    fn test_toggle_leaf() {
        let mut selection = SelectionSet::new();
        let jane = DocumentRef::new("People/Jane.md");
        selection.toggle_leaf(&jane, true);
        selection.toggle_leaf(&jane, true);
        assert_eq!(selection.len(), 1);
        selection.toggle_leaf(&jane, false);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_check_state() {
        let tree = sample_tree();
        let mut selection = SelectionSet::new();
        tree.find("People/Family/Bob.md")
            .unwrap()
            .toggle(&mut selection, true);

        assert_eq!(tree.find("People/Family").unwrap().state(&selection), CheckState::Partial);
        assert_eq!(tree.find("Projects").unwrap().state(&selection), CheckState::Unchecked);

        tree.find("People").unwrap().toggle(&mut selection, true);
        assert_eq!(tree.find("People").unwrap().state(&selection), CheckState::Checked);
        assert_eq!(tree.state(&selection), CheckState::Partial);

        let empty = SelectionNode::build(&Folder::new("Empty", "Empty"));
        assert_eq!(empty.state(&selection), CheckState::Unchecked);
    }
}
