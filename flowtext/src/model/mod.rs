// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document model consumed by the paragraph builder.

mod entry;
mod mark;
mod tree;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::ops::Index;
use core::sync::atomic::{AtomicUsize, Ordering};

use hashbrown::HashMap;

pub use self::entry::{
    Alignment, ControlEntry, Entry, HyperlinkControlEntry, ImageData, ImageEntry, StyleEntry,
    TextKind,
};
pub use self::mark::Mark;
pub use self::tree::TreeModelBuilder;

pub(crate) use self::mark::marks_for_paragraph;
use self::tree::ParagraphTree;

static NEXT_MODEL_ID: AtomicUsize = AtomicUsize::new(0);

/// Process-unique identity of a [`TextModel`], used to key cached cursors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(usize);

impl ModelId {
    fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Whether a model is a flat paragraph sequence or a foldable tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    /// A flat sequence of paragraphs.
    Plain,
    /// Paragraphs with parent/children links and open/closed flags.
    Tree,
}

/// The role of a paragraph in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParagraphKind {
    /// Ordinary text.
    Text,
    /// A node of a tree model.
    Tree,
    /// A blank line.
    EmptyLine,
    /// Vertical space before a block.
    BeforeSkip,
    /// Vertical space after a block.
    AfterSkip,
    /// Ends a section; produces no elements.
    EndOfSection,
    /// Ends a text body; navigation never crosses it.
    EndOfText,
}

/// A logical paragraph: a kind and an ordered sequence of entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    kind: ParagraphKind,
    entries: Vec<Entry>,
}

impl Paragraph {
    /// Creates a paragraph from entries.
    pub fn from_entries(kind: ParagraphKind, entries: impl IntoIterator<Item = Entry>) -> Self {
        Self {
            kind,
            entries: entries.into_iter().collect(),
        }
    }

    /// Creates a text paragraph with one text entry per run.
    pub fn from_text<S: Into<Rc<str>>>(runs: impl IntoIterator<Item = S>) -> Self {
        Self::from_entries(ParagraphKind::Text, runs.into_iter().map(Entry::text))
    }

    /// A blank line.
    pub fn empty_line() -> Self {
        Self::from_entries(ParagraphKind::EmptyLine, [])
    }

    /// A section end marker.
    pub fn end_of_section() -> Self {
        Self::from_entries(ParagraphKind::EndOfSection, [])
    }

    /// A text end marker.
    pub fn end_of_text() -> Self {
        Self::from_entries(ParagraphKind::EndOfText, [])
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// The paragraph kind.
    pub fn kind(&self) -> ParagraphKind {
        self.kind
    }

    /// The entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Total byte length of the text entries.
    pub fn text_len(&self) -> usize {
        self.text_runs().map(str::len).sum()
    }

    /// Concatenation of the text entries, the coordinate space of [`Mark`] offsets.
    pub fn plain_text(&self) -> String {
        self.text_runs().collect()
    }

    fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Text(text) => Some(&**text),
            _ => None,
        })
    }
}

/// A document: paragraphs, the images they reference, the current marks and, for tree
/// models, the paragraph hierarchy.
///
/// Models are shared through `Rc`; marks and tree open flags use interior mutability so they
/// can change while cursors hold the model. After changing either, rebuild the affected
/// cursors (see [`ParagraphCursor::rebuild`](crate::ParagraphCursor::rebuild)).
#[derive(Debug)]
pub struct TextModel {
    id: ModelId,
    paragraphs: Vec<Paragraph>,
    images: HashMap<Rc<str>, Rc<ImageData>>,
    marks: RefCell<Vec<Mark>>,
    tree: Option<ParagraphTree>,
}

impl TextModel {
    /// Creates a flat model.
    pub fn plain(paragraphs: Vec<Paragraph>) -> Self {
        Self::new(paragraphs, HashMap::new(), None)
    }

    fn new(
        paragraphs: Vec<Paragraph>,
        images: HashMap<Rc<str>, Rc<ImageData>>,
        tree: Option<ParagraphTree>,
    ) -> Self {
        Self {
            id: ModelId::next(),
            paragraphs,
            images,
            marks: RefCell::new(Vec::new()),
            tree,
        }
    }

    /// Registers image data that image entries can refer to by `id`.
    #[must_use]
    pub fn with_image(mut self, id: impl Into<Rc<str>>, data: ImageData) -> Self {
        self.images.insert(id.into(), Rc::new(data));
        self
    }

    /// The identity of this model.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Whether this is a flat or a tree model.
    pub fn kind(&self) -> ModelKind {
        if self.tree.is_some() {
            ModelKind::Tree
        } else {
            ModelKind::Plain
        }
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Whether the model has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// The paragraph at `index`.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// All paragraphs.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Resolves an image id. Entries whose image is missing or empty are not rendered.
    pub fn image(&self, id: &str) -> Option<&Rc<ImageData>> {
        self.images.get(id).filter(|data| !data.bytes.is_empty())
    }

    /// The current marks, sorted.
    pub fn marks(&self) -> Ref<'_, [Mark]> {
        Ref::map(self.marks.borrow(), Vec::as_slice)
    }

    /// Replaces the marks.
    pub fn set_marks(&self, mut marks: Vec<Mark>) {
        marks.sort_unstable();
        *self.marks.borrow_mut() = marks;
    }

    /// Removes all marks.
    pub fn remove_all_marks(&self) {
        self.marks.borrow_mut().clear();
    }

    /// Replaces the marks with every occurrence of `pattern` and returns the hit count.
    ///
    /// Occurrences are found per text entry and never overlap. An empty pattern clears the
    /// marks.
    pub fn search(&self, pattern: &str, ignore_case: bool) -> usize {
        let mut marks = Vec::new();
        if !pattern.is_empty() {
            for (index, paragraph) in self.paragraphs.iter().enumerate() {
                mark::search_paragraph(paragraph, index, pattern, ignore_case, &mut marks);
            }
        }
        log::debug!("search for {pattern:?} found {} marks", marks.len());
        let count = marks.len();
        *self.marks.borrow_mut() = marks;
        count
    }

    /// The first mark of the document.
    pub fn first_mark(&self) -> Option<Mark> {
        self.marks.borrow().first().copied()
    }

    /// The last mark of the document.
    pub fn last_mark(&self) -> Option<Mark> {
        self.marks.borrow().last().copied()
    }

    /// The first mark strictly after `position`.
    pub fn next_mark(&self, position: Mark) -> Option<Mark> {
        let marks = self.marks.borrow();
        let index = marks.partition_point(|mark| *mark <= position);
        marks.get(index).copied()
    }

    /// The last mark strictly before `position`.
    pub fn previous_mark(&self, position: Mark) -> Option<Mark> {
        let marks = self.marks.borrow();
        let index = marks.partition_point(|mark| *mark < position);
        index.checked_sub(1).map(|index| marks[index])
    }

    /// The parent of paragraph `index` in a tree model; `None` for top-level paragraphs and
    /// for plain models.
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.tree.as_ref()?.nodes.get(index)?.parent
    }

    /// The children of paragraph `index` in a tree model.
    pub fn children(&self, index: usize) -> &[usize] {
        self.tree
            .as_ref()
            .and_then(|tree| tree.nodes.get(index))
            .map_or(&[], |node| &node.children)
    }

    /// The next sibling of paragraph `index` in a tree model.
    pub fn next_sibling(&self, index: usize) -> Option<usize> {
        self.tree.as_ref()?.nodes.get(index)?.next_sibling
    }

    /// Whether paragraph `index` is the last child of its parent (or the last top-level
    /// paragraph).
    pub fn is_last_child(&self, index: usize) -> bool {
        self.tree.as_ref().is_none_or(|tree| {
            tree.nodes
                .get(index)
                .is_none_or(|node| tree.siblings(node.parent).last() == Some(&index))
        })
    }

    /// Nesting depth of paragraph `index`; top-level paragraphs have depth 0.
    pub fn depth(&self, index: usize) -> usize {
        self.tree
            .as_ref()
            .and_then(|tree| tree.nodes.get(index))
            .map_or(0, |node| node.depth)
    }

    /// Whether `ancestor` is a proper ancestor of `index`.
    pub fn is_ancestor_of(&self, ancestor: usize, index: usize) -> bool {
        let mut current = self.parent(index);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether the children of paragraph `index` are visible. Always `false` in plain models.
    pub fn is_open(&self, index: usize) -> bool {
        self.tree
            .as_ref()
            .and_then(|tree| tree.nodes.get(index))
            .is_some_and(|node| node.open.get())
    }

    /// Opens or closes paragraph `index`.
    pub fn set_open(&self, index: usize, open: bool) {
        if let Some(node) = self.tree.as_ref().and_then(|tree| tree.nodes.get(index)) {
            node.open.set(open);
        }
    }

    /// Opens paragraph `index` and all of its ancestors, making it reachable by navigation.
    pub fn open_tree(&self, index: usize) {
        let mut current = self.parent(index);
        while let Some(node) = current {
            self.set_open(node, true);
            current = self.parent(node);
        }
        self.set_open(index, true);
    }

    /// Opens or closes every node.
    pub fn set_all_open(&self, open: bool) {
        if let Some(tree) = &self.tree {
            for node in &tree.nodes {
                node.open.set(open);
            }
        }
    }
}

impl Index<usize> for TextModel {
    type Output = Paragraph;

    fn index(&self, index: usize) -> &Paragraph {
        &self.paragraphs[index]
    }
}
