// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::Ref;
use core::cmp::Ordering;

use super::ParagraphCursor;
use crate::context::LayoutContext;
use crate::element::Element;
use crate::model::Mark;

/// A position inside a built paragraph: an element index and a character index within it.
///
/// Word cursors order by paragraph index, then element index, then character index. The
/// null cursor, which is not attached to any paragraph, sorts before every other cursor.
#[derive(Clone, Debug, Default)]
pub struct WordCursor {
    paragraph: Option<Rc<ParagraphCursor>>,
    element_index: usize,
    char_index: usize,
}

impl WordCursor {
    /// A cursor at the start of `paragraph`.
    pub fn new(paragraph: Rc<ParagraphCursor>) -> Self {
        Self {
            paragraph: Some(paragraph),
            element_index: 0,
            char_index: 0,
        }
    }

    /// A cursor attached to no paragraph.
    pub fn null() -> Self {
        Self::default()
    }

    /// Moves to the start of `paragraph`.
    pub fn set_paragraph_cursor(&mut self, paragraph: Rc<ParagraphCursor>) {
        self.paragraph = Some(paragraph);
        self.element_index = 0;
        self.char_index = 0;
    }

    /// Whether the cursor is attached to no paragraph.
    pub fn is_null(&self) -> bool {
        self.paragraph.is_none()
    }

    /// The paragraph the cursor is in.
    pub fn paragraph_cursor(&self) -> Option<&Rc<ParagraphCursor>> {
        self.paragraph.as_ref()
    }

    /// Index of the element the cursor is on; equal to the paragraph length at its end.
    pub fn element_index(&self) -> usize {
        self.element_index
    }

    /// Index of the character within the current word; 0 for other elements.
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// The element the cursor is on, or `None` at the end of the paragraph.
    pub fn element(&self) -> Option<Ref<'_, Element>> {
        self.paragraph.as_ref()?.element(self.element_index)
    }

    /// Whether the cursor is at the start of its paragraph.
    pub fn is_start_of_paragraph(&self) -> bool {
        self.element_index == 0 && self.char_index == 0
    }

    /// Whether the cursor is past the last element of its paragraph.
    pub fn is_end_of_paragraph(&self) -> bool {
        self.paragraph
            .as_ref()
            .is_some_and(|paragraph| self.element_index == paragraph.paragraph_length())
    }

    /// Whether the cursor is at the start of the first paragraph.
    pub fn is_start_of_text(&self) -> bool {
        self.is_start_of_paragraph()
            && self
                .paragraph
                .as_ref()
                .is_some_and(|paragraph| paragraph.is_first())
    }

    /// Whether the cursor is at the end of the last paragraph.
    pub fn is_end_of_text(&self) -> bool {
        self.is_end_of_paragraph()
            && self
                .paragraph
                .as_ref()
                .is_some_and(|paragraph| paragraph.is_last())
    }

    /// Moves to the start of the next element, staying put at the end of the paragraph.
    pub fn next_word(&mut self) {
        if !self.is_null() && !self.is_end_of_paragraph() {
            self.element_index += 1;
        }
        self.char_index = 0;
    }

    /// Moves to the start of the previous element, staying put at the start of the paragraph.
    pub fn previous_word(&mut self) {
        self.element_index = self.element_index.saturating_sub(1);
        self.char_index = 0;
    }

    /// Moves to character `char_index` of element `element_index`.
    ///
    /// An element index past the end moves to the end of the paragraph. The character index
    /// is kept only on a word at most that many characters long, and is 0 otherwise.
    pub fn move_to(&mut self, element_index: usize, char_index: usize) {
        let Some(paragraph) = &self.paragraph else {
            return;
        };
        let len = paragraph.paragraph_length();
        if element_index > len {
            self.element_index = len;
            self.char_index = 0;
        } else {
            self.element_index = element_index;
            self.set_char_index(char_index);
        }
    }

    /// Sets the character index within the current word; see [`move_to`](Self::move_to).
    pub fn set_char_index(&mut self, char_index: usize) {
        let fits = char_index > 0
            && self
                .element()
                .is_some_and(|element| element.as_word().is_some_and(|w| char_index <= w.len()));
        self.char_index = if fits { char_index } else { 0 };
    }

    /// Moves to the start of paragraph `index`, unless the cursor is already in it.
    pub fn move_to_paragraph(&mut self, cx: &mut LayoutContext, index: usize) {
        let Some(paragraph) = &self.paragraph else {
            return;
        };
        if paragraph.index() == index {
            return;
        }
        let (model, language) = (paragraph.model().clone(), paragraph.language());
        if let Some(paragraph) = cx.cursor(&model, language, index) {
            self.set_paragraph_cursor(paragraph);
        }
    }

    /// Moves to the first element of the paragraph.
    pub fn move_to_paragraph_start(&mut self) {
        if !self.is_null() {
            self.element_index = 0;
            self.char_index = 0;
        }
    }

    /// Moves past the last element of the paragraph.
    pub fn move_to_paragraph_end(&mut self) {
        if let Some(paragraph) = &self.paragraph {
            self.element_index = paragraph.paragraph_length();
            self.char_index = 0;
        }
    }

    /// Moves to the start of the next paragraph. Returns `false`, leaving the cursor
    /// unchanged, at the end of the text.
    pub fn next_paragraph(&mut self, cx: &mut LayoutContext) -> bool {
        match self.paragraph.as_ref().and_then(|paragraph| paragraph.next(cx)) {
            Some(next) => {
                self.set_paragraph_cursor(next);
                true
            }
            None => false,
        }
    }

    /// Moves to the start of the previous paragraph. Returns `false`, leaving the cursor
    /// unchanged, at the start of the text.
    pub fn previous_paragraph(&mut self, cx: &mut LayoutContext) -> bool {
        match self
            .paragraph
            .as_ref()
            .and_then(|paragraph| paragraph.previous(cx))
        {
            Some(previous) => {
                self.set_paragraph_cursor(previous);
                true
            }
            None => false,
        }
    }

    /// A stable anchor for this position, suitable for persisting a reading position.
    ///
    /// This is the start of the first word at or after the cursor, or the start of the
    /// next paragraph when no word follows. The null cursor maps to the default mark.
    pub fn position(&self) -> Mark {
        let Some(paragraph) = &self.paragraph else {
            return Mark::default();
        };
        let elements = paragraph.elements();
        let word = elements
            .get(self.element_index..)
            .unwrap_or_default()
            .iter()
            .find_map(Element::as_word);
        match word {
            Some(word) => Mark::new(paragraph.index(), word.paragraph_offset(), 0),
            None => Mark::new(paragraph.index() + 1, 0, 0),
        }
    }

    /// Rebuilds the paragraph and restores the position as far as it still exists.
    pub fn rebuild(&mut self, cx: &mut LayoutContext) {
        if let Some(paragraph) = &self.paragraph {
            paragraph.rebuild(cx);
            self.move_to(self.element_index, self.char_index);
        }
    }

    fn key(&self) -> Option<(usize, usize, usize)> {
        self.paragraph
            .as_ref()
            .map(|paragraph| (paragraph.index(), self.element_index, self.char_index))
    }
}

impl PartialEq for WordCursor {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for WordCursor {}

impl PartialOrd for WordCursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WordCursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;

    use super::WordCursor;
    use crate::{Language, LayoutContext, Mark, Paragraph, TextModel};

    fn model() -> Rc<TextModel> {
        Rc::new(TextModel::plain(vec![
            Paragraph::from_text(["alpha beta"]),
            Paragraph::empty_line(),
            Paragraph::from_text(["gamma"]),
        ]))
    }

    #[test]
    fn char_index_needs_a_word() {
        let model = model();
        let mut cx = LayoutContext::new();
        let mut cursor = WordCursor::new(cx.cursor(&model, Language::UND, 0).unwrap());
        cursor.move_to(2, 4);
        assert_eq!((cursor.element_index(), cursor.char_index()), (2, 4));
        cursor.move_to(2, 5);
        assert_eq!(cursor.char_index(), 0);
        cursor.move_to(1, 1);
        assert_eq!((cursor.element_index(), cursor.char_index()), (1, 0));
        cursor.move_to(10, 3);
        assert_eq!((cursor.element_index(), cursor.char_index()), (3, 0));
        assert!(cursor.is_end_of_paragraph());
    }

    #[test]
    fn position_skips_to_the_next_word() {
        let model = model();
        let mut cx = LayoutContext::new();
        let mut cursor = WordCursor::new(cx.cursor(&model, Language::UND, 0).unwrap());
        cursor.move_to(1, 0);
        assert_eq!(cursor.position(), Mark::new(0, 6, 0));
        cursor.move_to_paragraph_end();
        assert_eq!(cursor.position(), Mark::new(1, 0, 0));

        cursor.move_to_paragraph(&mut cx, 1);
        assert_eq!(cursor.position(), Mark::new(2, 0, 0));
        assert_eq!(WordCursor::null().position(), Mark::default());
    }

    #[test]
    fn paragraph_moves_stop_at_the_ends() {
        let model = model();
        let mut cx = LayoutContext::new();
        let mut cursor = WordCursor::new(cx.cursor(&model, Language::UND, 0).unwrap());
        assert!(cursor.is_start_of_text());
        assert!(!cursor.previous_paragraph(&mut cx));
        assert!(cursor.next_paragraph(&mut cx));
        assert!(cursor.next_paragraph(&mut cx));
        cursor.move_to_paragraph_end();
        assert!(cursor.is_end_of_text());
        assert!(!cursor.next_paragraph(&mut cx));
        assert_eq!(cursor.paragraph_cursor().unwrap().index(), 2);
        assert_eq!(cursor.element_index(), 1);
    }

    #[test]
    fn null_sorts_first() {
        let model = model();
        let mut cx = LayoutContext::new();
        let cursor = WordCursor::new(cx.cursor(&model, Language::UND, 0).unwrap());
        assert!(WordCursor::null() < cursor);
        assert_eq!(WordCursor::null(), WordCursor::null());
    }
}
