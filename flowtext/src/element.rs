// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable elements produced by the paragraph builder.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::ops::Range;

use smallvec::SmallVec;

use crate::analysis::BidiLevel;
use crate::model::{ImageData, StyleEntry, TextKind};

/// Discriminant of an [`Element`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A [`Word`].
    Word,
    /// An [`ImageElement`].
    Image,
    /// A [`ControlElement`].
    Control,
    /// A breakable space.
    HSpace,
    /// A non-breakable space.
    NbHSpace,
    /// A [`FixedHSpaceElement`].
    FixedHSpace,
    /// A [`StyleElement`].
    Style,
    /// Spacing emitted for a before-skip paragraph.
    BeforeParagraph,
    /// Spacing emitted for an after-skip paragraph.
    AfterParagraph,
    /// A blank line.
    EmptyLine,
    /// Raises the bidi embedding level by one.
    StartReversedSequence,
    /// Lowers the bidi embedding level by one.
    EndReversedSequence,
}

/// The kinds of shared marker elements handed out by the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    /// A breakable space.
    HSpace,
    /// A non-breakable space.
    NbHSpace,
    /// Spacing emitted for a before-skip paragraph.
    BeforeParagraph,
    /// Spacing emitted for an after-skip paragraph.
    AfterParagraph,
    /// A blank line.
    EmptyLine,
    /// Raises the bidi embedding level by one.
    StartReversedSequence,
    /// Lowers the bidi embedding level by one.
    EndReversedSequence,
}

/// A marker element with no payload. Every kind has exactly one shared instance.
#[derive(Debug, PartialEq, Eq)]
pub struct SpecialElement {
    kind: SpecialKind,
}

impl SpecialElement {
    pub(crate) const fn new(kind: SpecialKind) -> Self {
        Self { kind }
    }

    /// The marker kind.
    pub fn kind(&self) -> SpecialKind {
        self.kind
    }
}

/// A highlighted sub-span of a word, in bytes relative to the word start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkSpan {
    /// Start of the highlight within the word.
    pub start: usize,
    /// Length of the highlight.
    pub len: usize,
}

/// A word: a slice of a text entry plus its position and bidi level.
#[derive(Clone, Debug)]
pub struct Word {
    data: Rc<str>,
    range: Range<usize>,
    paragraph_offset: usize,
    len: usize,
    bidi_level: BidiLevel,
    marks: SmallVec<[MarkSpan; 1]>,
}

impl Word {
    pub(crate) fn new(
        data: Rc<str>,
        range: Range<usize>,
        paragraph_offset: usize,
        bidi_level: BidiLevel,
    ) -> Self {
        let mut word = Self {
            data: Rc::from(""),
            range: 0..0,
            paragraph_offset: 0,
            len: 0,
            bidi_level: 0,
            marks: SmallVec::new(),
        };
        word.reset(data, range, paragraph_offset, bidi_level);
        word
    }

    /// Reinitializes a recycled word, keeping the capacity of its mark storage.
    pub(crate) fn reset(
        &mut self,
        data: Rc<str>,
        range: Range<usize>,
        paragraph_offset: usize,
        bidi_level: BidiLevel,
    ) {
        self.len = data[range.clone()].chars().count();
        self.data = data;
        self.range = range;
        self.paragraph_offset = paragraph_offset;
        self.bidi_level = bidi_level;
        self.marks.clear();
    }

    /// Drops the reference to the entry text while the word sits in the pool.
    pub(crate) fn detach(&mut self, empty: Rc<str>) {
        self.data = empty;
        self.range = 0..0;
        self.len = 0;
        self.marks.clear();
    }

    /// The text of the word.
    pub fn text(&self) -> &str {
        &self.data[self.range.clone()]
    }

    /// Byte offset of the word within its paragraph's text.
    pub fn paragraph_offset(&self) -> usize {
        self.paragraph_offset
    }

    /// Byte length of the word.
    pub fn size(&self) -> usize {
        self.range.len()
    }

    /// Length of the word in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the word has no characters. Built words are never empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bidi embedding level the word was emitted at.
    pub fn bidi_level(&self) -> BidiLevel {
        self.bidi_level
    }

    /// Highlighted sub-spans, in the order the marks were applied.
    pub fn marks(&self) -> &[MarkSpan] {
        &self.marks
    }

    /// Highlights the part of `[offset, offset + len)` (paragraph coordinates) that falls
    /// within this word. Does nothing if the span does not overlap the word.
    pub fn add_mark(&mut self, offset: usize, len: usize) {
        let word_start = self.paragraph_offset;
        let word_end = word_start + self.size();
        let end = offset + len;
        if offset < word_end && end > word_start {
            let start = offset.max(word_start);
            self.marks.push(MarkSpan {
                start: start - word_start,
                len: end.min(word_end) - start,
            });
        }
    }
}

/// Opens or closes a styled span; hyperlinks carry their target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlElement {
    kind: TextKind,
    is_start: bool,
    hyperlink: Option<Rc<str>>,
}

impl ControlElement {
    pub(crate) fn new(kind: TextKind, is_start: bool, hyperlink: Option<Rc<str>>) -> Self {
        Self {
            kind,
            is_start,
            hyperlink,
        }
    }

    pub(crate) fn reset(&mut self, kind: TextKind, is_start: bool, hyperlink: Option<Rc<str>>) {
        self.kind = kind;
        self.is_start = is_start;
        self.hyperlink = hyperlink;
    }

    pub(crate) fn detach(&mut self) {
        self.hyperlink = None;
    }

    /// Kind of the span.
    pub fn text_kind(&self) -> TextKind {
        self.kind
    }

    /// Whether this opens the span.
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    /// Hyperlink target, for hyperlink controls.
    pub fn hyperlink(&self) -> Option<&str> {
        self.hyperlink.as_deref()
    }
}

/// A resolved image.
#[derive(Clone, Debug)]
pub struct ImageElement {
    id: Rc<str>,
    data: Rc<ImageData>,
}

impl ImageElement {
    pub(crate) fn new(id: Rc<str>, data: Rc<ImageData>) -> Self {
        Self { id, data }
    }

    /// The id the image was referenced by.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The image data.
    pub fn data(&self) -> &Rc<ImageData> {
        &self.data
    }
}

/// Inline style overrides, shared with the model entry.
#[derive(Clone, Debug)]
pub struct StyleElement {
    entry: Rc<StyleEntry>,
}

impl StyleElement {
    pub(crate) fn new(entry: Rc<StyleEntry>) -> Self {
        Self { entry }
    }

    /// The style overrides.
    pub fn entry(&self) -> &StyleEntry {
        &self.entry
    }
}

/// A fixed-width horizontal space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedHSpaceElement {
    length: u8,
}

impl FixedHSpaceElement {
    pub(crate) fn new(length: u8) -> Self {
        Self { length }
    }

    /// Width measured in spaces.
    pub fn length(&self) -> u8 {
        self.length
    }
}

/// One renderable element of a built paragraph.
///
/// Words and controls are boxed so the pool can recycle their allocations; markers are
/// references to process-wide singletons.
#[derive(Debug)]
pub enum Element {
    /// A word.
    Word(Box<Word>),
    /// A control marker.
    Control(Box<ControlElement>),
    /// An image.
    Image(ImageElement),
    /// Inline style overrides.
    Style(StyleElement),
    /// A fixed-width space.
    FixedHSpace(FixedHSpaceElement),
    /// A shared marker.
    Special(&'static SpecialElement),
}

impl Element {
    /// The discriminant of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Word(_) => ElementKind::Word,
            Self::Control(_) => ElementKind::Control,
            Self::Image(_) => ElementKind::Image,
            Self::Style(_) => ElementKind::Style,
            Self::FixedHSpace(_) => ElementKind::FixedHSpace,
            Self::Special(special) => match special.kind() {
                SpecialKind::HSpace => ElementKind::HSpace,
                SpecialKind::NbHSpace => ElementKind::NbHSpace,
                SpecialKind::BeforeParagraph => ElementKind::BeforeParagraph,
                SpecialKind::AfterParagraph => ElementKind::AfterParagraph,
                SpecialKind::EmptyLine => ElementKind::EmptyLine,
                SpecialKind::StartReversedSequence => ElementKind::StartReversedSequence,
                SpecialKind::EndReversedSequence => ElementKind::EndReversedSequence,
            },
        }
    }

    /// The word, if this is a word element.
    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Self::Word(word) => Some(word),
            _ => None,
        }
    }

    /// The control, if this is a control element.
    pub fn as_control(&self) -> Option<&ControlElement> {
        match self {
            Self::Control(control) => Some(control),
            _ => None,
        }
    }
}
