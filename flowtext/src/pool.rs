// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recycling of word and control elements, and the shared marker singletons.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{RefCell, RefMut};
use core::ops::{Deref, Range};

use crate::analysis::BidiLevel;
use crate::element::{ControlElement, Element, SpecialElement, SpecialKind, Word};
use crate::model::{ControlEntry, HyperlinkControlEntry};

static HSPACE: SpecialElement = SpecialElement::new(SpecialKind::HSpace);
static NB_HSPACE: SpecialElement = SpecialElement::new(SpecialKind::NbHSpace);
static BEFORE_PARAGRAPH: SpecialElement = SpecialElement::new(SpecialKind::BeforeParagraph);
static AFTER_PARAGRAPH: SpecialElement = SpecialElement::new(SpecialKind::AfterParagraph);
static EMPTY_LINE: SpecialElement = SpecialElement::new(SpecialKind::EmptyLine);
static START_REVERSED_SEQUENCE: SpecialElement =
    SpecialElement::new(SpecialKind::StartReversedSequence);
static END_REVERSED_SEQUENCE: SpecialElement =
    SpecialElement::new(SpecialKind::EndReversedSequence);

/// Allocation counters of an [`ElementPool`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Words created because the free list was empty.
    pub words_allocated: usize,
    /// Words taken from the free list.
    pub words_reused: usize,
    /// Controls created because the free list was empty.
    pub controls_allocated: usize,
    /// Controls taken from the free list.
    pub controls_reused: usize,
    /// Words currently on the free list.
    pub free_words: usize,
    /// Controls currently on the free list.
    pub free_controls: usize,
}

/// Recycles the boxed word and control elements of built paragraphs.
///
/// Marker elements are process-wide statics and never pass through the free lists. Images,
/// styles and fixed spaces are simply dropped on release.
#[derive(Debug)]
pub struct ElementPool {
    words: Vec<Box<Word>>,
    controls: Vec<Box<ControlElement>>,
    max_free: usize,
    empty: Rc<str>,
    stats: PoolStats,
}

impl ElementPool {
    /// Creates a pool whose free lists hold at most `max_free` elements each.
    pub fn new(max_free: usize) -> Self {
        Self {
            words: Vec::new(),
            controls: Vec::new(),
            max_free,
            empty: Rc::from(""),
            stats: PoolStats::default(),
        }
    }

    /// The shared instance of a marker.
    pub fn marker(kind: SpecialKind) -> &'static SpecialElement {
        match kind {
            SpecialKind::HSpace => &HSPACE,
            SpecialKind::NbHSpace => &NB_HSPACE,
            SpecialKind::BeforeParagraph => &BEFORE_PARAGRAPH,
            SpecialKind::AfterParagraph => &AFTER_PARAGRAPH,
            SpecialKind::EmptyLine => &EMPTY_LINE,
            SpecialKind::StartReversedSequence => &START_REVERSED_SEQUENCE,
            SpecialKind::EndReversedSequence => &END_REVERSED_SEQUENCE,
        }
    }

    /// An element wrapping the shared instance of a marker.
    pub fn pooled_marker(kind: SpecialKind) -> Element {
        Element::Special(Self::marker(kind))
    }

    /// A word covering `range` of `data`.
    pub fn acquire_word(
        &mut self,
        data: Rc<str>,
        range: Range<usize>,
        paragraph_offset: usize,
        bidi_level: BidiLevel,
    ) -> Element {
        let word = match self.words.pop() {
            Some(mut word) => {
                self.stats.words_reused += 1;
                word.reset(data, range, paragraph_offset, bidi_level);
                word
            }
            None => {
                self.stats.words_allocated += 1;
                Box::new(Word::new(data, range, paragraph_offset, bidi_level))
            }
        };
        Element::Word(word)
    }

    /// A control element for `entry`.
    pub fn acquire_control(&mut self, entry: &ControlEntry) -> Element {
        self.control(entry.kind, entry.is_start, None)
    }

    /// An opening control element for a hyperlink.
    pub fn acquire_hyperlink(&mut self, entry: &HyperlinkControlEntry) -> Element {
        self.control(entry.kind, true, Some(entry.label.clone()))
    }

    fn control(
        &mut self,
        kind: crate::TextKind,
        is_start: bool,
        hyperlink: Option<Rc<str>>,
    ) -> Element {
        let control = match self.controls.pop() {
            Some(mut control) => {
                self.stats.controls_reused += 1;
                control.reset(kind, is_start, hyperlink);
                control
            }
            None => {
                self.stats.controls_allocated += 1;
                Box::new(ControlElement::new(kind, is_start, hyperlink))
            }
        };
        Element::Control(control)
    }

    /// Returns an element to the pool.
    pub fn release(&mut self, element: Element) {
        match element {
            Element::Word(mut word) => {
                if self.words.len() < self.max_free {
                    word.detach(self.empty.clone());
                    self.words.push(word);
                }
            }
            Element::Control(mut control) => {
                if self.controls.len() < self.max_free {
                    control.detach();
                    self.controls.push(control);
                }
            }
            Element::Image(_)
            | Element::Style(_)
            | Element::FixedHSpace(_)
            | Element::Special(_) => {}
        }
    }

    /// Drops every pooled allocation.
    pub fn shrink(&mut self) {
        self.words = Vec::new();
        self.controls = Vec::new();
    }

    /// Allocation counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            free_words: self.words.len(),
            free_controls: self.controls.len(),
            ..self.stats
        }
    }
}

/// The built elements of one paragraph.
///
/// Clearing or dropping the vector returns its words and controls to the pool it was created
/// with.
#[derive(Debug)]
pub struct ElementVec {
    elements: Vec<Element>,
    pool: Rc<RefCell<ElementPool>>,
}

impl ElementVec {
    /// Creates an empty vector that recycles into `pool`.
    pub fn new(pool: Rc<RefCell<ElementPool>>) -> Self {
        Self {
            elements: Vec::new(),
            pool,
        }
    }

    /// Releases every element to the pool.
    pub fn clear(&mut self) {
        match self.pool.try_borrow_mut() {
            Ok(mut pool) => {
                for element in self.elements.drain(..) {
                    pool.release(element);
                }
            }
            // Only reachable while a builder holds the pool; drop instead of recycling.
            Err(_) => self.elements.clear(),
        }
    }

    /// The pool and the element storage, for filling.
    pub(crate) fn parts(&mut self) -> (RefMut<'_, ElementPool>, &mut Vec<Element>) {
        (self.pool.borrow_mut(), &mut self.elements)
    }
}

impl Deref for ElementVec {
    type Target = [Element];

    fn deref(&self) -> &[Element] {
        &self.elements
    }
}

impl Drop for ElementVec {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use super::{ElementPool, ElementVec};
    use crate::element::{Element, SpecialKind};
    use crate::model::{ControlEntry, HyperlinkControlEntry, TextKind};

    #[test]
    fn markers_are_shared() {
        let a = ElementPool::pooled_marker(SpecialKind::HSpace);
        let b = ElementPool::pooled_marker(SpecialKind::HSpace);
        let (Element::Special(a), Element::Special(b)) = (a, b) else {
            panic!("markers must be special elements");
        };
        assert!(core::ptr::eq(a, b));
        assert!(!core::ptr::eq(
            a,
            ElementPool::marker(SpecialKind::NbHSpace)
        ));
    }

    #[test]
    fn released_words_are_reused() {
        let pool = Rc::new(RefCell::new(ElementPool::new(16)));
        let text: Rc<str> = Rc::from("hello world");
        {
            let mut elements = ElementVec::new(pool.clone());
            let (mut p, out) = elements.parts();
            out.push(p.acquire_word(text.clone(), 0..5, 0, 0));
            out.push(ElementPool::pooled_marker(SpecialKind::HSpace));
            out.push(p.acquire_word(text.clone(), 6..11, 6, 0));
            out.push(p.acquire_control(&ControlEntry::start(TextKind::EMPHASIS)));
        }
        let stats = pool.borrow().stats();
        assert_eq!(stats.words_allocated, 2);
        assert_eq!(stats.free_words, 2);
        assert_eq!(stats.free_controls, 1);
        // The pool must not keep the text alive.
        assert_eq!(Rc::strong_count(&text), 1);

        let word = pool.borrow_mut().acquire_word(text.clone(), 6..11, 6, 0);
        assert_eq!(word.as_word().map(|w| w.text()), Some("world"));
        assert_eq!(pool.borrow().stats().words_reused, 1);
    }

    #[test]
    fn recycled_controls_are_reinitialized() {
        let mut pool = ElementPool::new(4);
        let link = HyperlinkControlEntry {
            kind: TextKind::EXTERNAL_HYPERLINK,
            label: Rc::from("https://example.com"),
        };
        let element = pool.acquire_hyperlink(&link);
        pool.release(element);
        let element = pool.acquire_control(&ControlEntry::end(TextKind::STRONG));
        let control = element.as_control().unwrap();
        assert_eq!(control.text_kind(), TextKind::STRONG);
        assert!(!control.is_start());
        assert_eq!(control.hyperlink(), None);
    }

    #[test]
    fn free_lists_are_bounded() {
        let mut pool = ElementPool::new(1);
        let text: Rc<str> = Rc::from("ab");
        let a = pool.acquire_word(text.clone(), 0..1, 0, 0);
        let b = pool.acquire_word(text.clone(), 1..2, 1, 0);
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.stats().free_words, 1);
        pool.shrink();
        assert_eq!(pool.stats().free_words, 0);
    }
}
