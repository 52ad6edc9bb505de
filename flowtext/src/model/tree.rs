// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use hashbrown::HashMap;

use super::{Entry, ImageData, Paragraph, ParagraphKind, TextModel};
use crate::Error;

/// Parent/children links of one paragraph in a tree model.
#[derive(Debug)]
pub(crate) struct TreeNode {
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) next_sibling: Option<usize>,
    pub(crate) depth: usize,
    pub(crate) open: Cell<bool>,
}

/// The hierarchy of a tree model, stored as indices into the paragraph sequence.
///
/// Paragraphs are laid out in preorder, so every descendant of a node follows it and precedes
/// the node's next sibling. The implicit root is represented by `None`.
#[derive(Debug, Default)]
pub(crate) struct ParagraphTree {
    pub(crate) nodes: Vec<TreeNode>,
    pub(crate) roots: Vec<usize>,
}

impl ParagraphTree {
    pub(crate) fn siblings(&self, parent: Option<usize>) -> &[usize] {
        match parent {
            Some(parent) => &self.nodes[parent].children,
            None => &self.roots,
        }
    }
}

/// Incrementally assembles a tree model.
///
/// Paragraphs must be pushed in preorder: a new paragraph's parent is either the root, the
/// previously pushed paragraph, or one of its ancestors.
///
/// ```
/// use flowtext::{Entry, TreeModelBuilder};
///
/// let mut builder = TreeModelBuilder::new();
/// let a = builder.push(None, [Entry::text("Chapter 1")]).unwrap();
/// builder.push(Some(a), [Entry::text("Section 1.1")]).unwrap();
/// builder.push(None, [Entry::text("Chapter 2")]).unwrap();
/// assert!(builder.push(Some(a), [Entry::text("too late")]).is_err());
///
/// let model = builder.build();
/// assert_eq!(model.children(0), &[1]);
/// ```
#[derive(Debug, Default)]
pub struct TreeModelBuilder {
    paragraphs: Vec<Paragraph>,
    tree: ParagraphTree,
    images: HashMap<Rc<str>, Rc<ImageData>>,
}

impl TreeModelBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tree paragraph made of `entries` under `parent` and returns its index.
    pub fn push(
        &mut self,
        parent: Option<usize>,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<usize, Error> {
        self.push_paragraph(parent, Paragraph::from_entries(ParagraphKind::Tree, entries))
    }

    /// Appends `paragraph` under `parent` and returns its index.
    ///
    /// Only [`ParagraphKind::Tree`] paragraphs are accepted.
    pub fn push_paragraph(
        &mut self,
        parent: Option<usize>,
        paragraph: Paragraph,
    ) -> Result<usize, Error> {
        let index = self.paragraphs.len();
        if paragraph.kind() != ParagraphKind::Tree {
            return Err(Error::kind_mismatch(index, paragraph.kind()));
        }
        let depth = match parent {
            Some(parent) => {
                if parent >= index {
                    return Err(Error::invalid_parent(index, parent));
                }
                if !self.accepts_child(parent) {
                    return Err(Error::not_preorder(index, parent));
                }
                self.tree.nodes[parent].depth + 1
            }
            None => 0,
        };

        let previous_sibling = self.tree.siblings(parent).last().copied();
        if let Some(previous_sibling) = previous_sibling {
            self.tree.nodes[previous_sibling].next_sibling = Some(index);
        }
        match parent {
            Some(parent) => self.tree.nodes[parent].children.push(index),
            None => self.tree.roots.push(index),
        }
        self.tree.nodes.push(TreeNode {
            parent,
            children: Vec::new(),
            next_sibling: None,
            depth,
            open: Cell::new(false),
        });
        self.paragraphs.push(paragraph);
        Ok(index)
    }

    /// Registers image data that image entries can refer to by `id`.
    pub fn add_image(&mut self, id: impl Into<Rc<str>>, data: ImageData) -> &mut Self {
        self.images.insert(id.into(), Rc::new(data));
        self
    }

    /// Finishes the model. All nodes start closed.
    pub fn build(self) -> TextModel {
        log::debug!(
            "built tree model with {} paragraphs, {} top-level",
            self.paragraphs.len(),
            self.tree.roots.len()
        );
        TextModel::new(self.paragraphs, self.images, Some(self.tree))
    }

    /// Whether `parent` is the last pushed paragraph or one of its ancestors.
    fn accepts_child(&self, parent: usize) -> bool {
        let mut current = self.paragraphs.len().checked_sub(1);
        while let Some(node) = current {
            if node == parent {
                return true;
            }
            current = self.tree.nodes[node].parent;
        }
        false
    }
}
