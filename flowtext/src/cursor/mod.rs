// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built paragraphs and navigation between them.

mod tree;
mod word;

pub use word::WordCursor;

use alloc::rc::Rc;
use core::cell::{Ref, RefCell};

use crate::builder::ParagraphBuilder;
use crate::context::LayoutContext;
use crate::element::{Element, SpecialKind};
use crate::language::Language;
use crate::model::{Entry, ModelKind, Paragraph, ParagraphKind, TextModel, marks_for_paragraph};
use crate::pool::{ElementPool, ElementVec};

/// The built elements of one paragraph, and its position in the model.
///
/// Cursors are obtained from [`LayoutContext::cursor`] and shared through `Rc`; the context's
/// cache hands out the same cursor for repeated requests while it is alive.
#[derive(Debug)]
pub struct ParagraphCursor {
    model: Rc<TextModel>,
    language: Language,
    index: usize,
    elements: RefCell<ElementVec>,
}

impl ParagraphCursor {
    pub(crate) fn new(
        model: Rc<TextModel>,
        language: Language,
        index: usize,
        pool: Rc<RefCell<ElementPool>>,
    ) -> Self {
        Self {
            model,
            language,
            index,
            elements: RefCell::new(ElementVec::new(pool)),
        }
    }

    /// Logical index of the paragraph.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The model the paragraph belongs to.
    pub fn model(&self) -> &Rc<TextModel> {
        &self.model
    }

    /// The language the paragraph was built for.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The source paragraph.
    pub fn paragraph(&self) -> &Paragraph {
        &self.model[self.index]
    }

    /// The kind of the source paragraph.
    pub fn kind(&self) -> ParagraphKind {
        self.paragraph().kind()
    }

    /// Number of built elements.
    pub fn paragraph_length(&self) -> usize {
        self.elements.borrow().len()
    }

    /// The element at `index`, if there is one.
    ///
    /// The returned guard must be dropped before the cursor is cleared or rebuilt.
    pub fn element(&self, index: usize) -> Option<Ref<'_, Element>> {
        Ref::filter_map(self.elements.borrow(), |elements| elements.get(index)).ok()
    }

    /// All built elements.
    pub fn elements(&self) -> Ref<'_, [Element]> {
        Ref::map(self.elements.borrow(), |elements| &**elements)
    }

    /// Whether there is no paragraph before this one.
    ///
    /// A cursor on, or directly after, an end-of-text paragraph is first.
    pub fn is_first(&self) -> bool {
        self.index == 0
            || self.kind() == ParagraphKind::EndOfText
            || self.model[self.index - 1].kind() == ParagraphKind::EndOfText
    }

    /// Whether there is no paragraph after this one.
    ///
    /// A cursor directly before an end-of-text paragraph is last. In tree models, a paragraph
    /// with further visible nodes after it (its open children, or later siblings of it or of
    /// any ancestor) is not last.
    pub fn is_last(&self) -> bool {
        match self.model.kind() {
            ModelKind::Plain => self.is_last_in_sequence(),
            ModelKind::Tree => self.is_last_in_sequence() || tree::is_last(&self.model, self.index),
        }
    }

    fn is_last_in_sequence(&self) -> bool {
        self.index + 1 == self.model.len()
            || self.model[self.index + 1].kind() == ParagraphKind::EndOfText
    }

    /// Whether the paragraph ends a section.
    pub fn is_end_of_section(&self) -> bool {
        self.kind() == ParagraphKind::EndOfSection
    }

    /// The cursor of the next visible paragraph, or `None` at the end of the text.
    pub fn next(&self, cx: &mut LayoutContext) -> Option<Rc<Self>> {
        let index = match self.model.kind() {
            ModelKind::Plain => {
                if self.is_last() {
                    return None;
                }
                self.index + 1
            }
            ModelKind::Tree => tree::next(&self.model, self.index)?,
        };
        cx.cursor(&self.model, self.language, index)
    }

    /// The cursor of the previous visible paragraph, or `None` at the start of the text.
    ///
    /// In tree models, a collapsed subtree is entered through its outermost closed node.
    pub fn previous(&self, cx: &mut LayoutContext) -> Option<Rc<Self>> {
        if self.is_first() {
            return None;
        }
        let index = match self.model.kind() {
            ModelKind::Plain => self.index - 1,
            ModelKind::Tree => tree::previous(&self.model, self.index),
        };
        cx.cursor(&self.model, self.language, index)
    }

    /// Returns every element to the pool.
    ///
    /// # Panics
    ///
    /// Panics if a guard from [`element`](Self::element) or [`elements`](Self::elements) is
    /// still alive.
    pub fn clear(&self) {
        self.elements.borrow_mut().clear();
    }

    /// Builds the elements of the paragraph, appending to any already present.
    ///
    /// Text and tree paragraphs are segmented into words and spaces. Empty-line and skip
    /// paragraphs produce their control elements followed by a spacing marker. End-of-section
    /// and end-of-text paragraphs produce nothing.
    pub fn fill(&self, cx: &mut LayoutContext) {
        let word_break = cx.config().word_break;
        let mut elements = self.elements.borrow_mut();
        let (mut pool, elements) = elements.parts();
        let paragraph = self.paragraph();
        let marker = match paragraph.kind() {
            ParagraphKind::Text | ParagraphKind::Tree => {
                let marks = self.model.marks();
                log::trace!(
                    "building paragraph {} of {:?} for {}",
                    self.index,
                    self.model.id(),
                    self.language
                );
                ParagraphBuilder::new(
                    &self.model,
                    paragraph,
                    marks_for_paragraph(&marks, self.index),
                    self.language,
                    word_break,
                    &mut pool,
                    elements,
                    &mut cx.analysis,
                    &mut cx.info,
                )
                .fill();
                return;
            }
            ParagraphKind::EmptyLine => SpecialKind::EmptyLine,
            ParagraphKind::BeforeSkip => SpecialKind::BeforeParagraph,
            ParagraphKind::AfterSkip => SpecialKind::AfterParagraph,
            ParagraphKind::EndOfSection | ParagraphKind::EndOfText => return,
        };
        for entry in paragraph.entries() {
            match entry {
                Entry::Control(control) => elements.push(pool.acquire_control(control)),
                Entry::HyperlinkControl(hyperlink) => {
                    elements.push(pool.acquire_hyperlink(hyperlink));
                }
                _ => {}
            }
        }
        elements.push(ElementPool::pooled_marker(marker));
    }

    /// Clears and refills the paragraph, picking up changed marks or tree state.
    pub fn rebuild(&self, cx: &mut LayoutContext) {
        self.clear();
        self.fill(cx);
    }
}
