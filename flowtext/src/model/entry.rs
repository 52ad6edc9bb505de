// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec::Vec;

/// Identifies the kind of a styled span opened or closed by a control entry.
///
/// The numbering is owned by the format readers; the constants below cover the kinds the
/// readers emit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextKind(pub u8);

#[allow(missing_docs, reason = "the names are self-describing")]
impl TextKind {
    pub const REGULAR: Self = Self(0);
    pub const TITLE: Self = Self(1);
    pub const SECTION_TITLE: Self = Self(2);
    pub const POEM_TITLE: Self = Self(3);
    pub const SUBTITLE: Self = Self(4);
    pub const ANNOTATION: Self = Self(5);
    pub const EPIGRAPH: Self = Self(6);
    pub const STANZA: Self = Self(7);
    pub const VERSE: Self = Self(8);
    pub const PREFORMATTED: Self = Self(9);
    pub const IMAGE: Self = Self(10);
    pub const CITE: Self = Self(12);
    pub const AUTHOR: Self = Self(13);
    pub const DATE: Self = Self(14);
    pub const INTERNAL_HYPERLINK: Self = Self(15);
    pub const FOOTNOTE: Self = Self(16);
    pub const EMPHASIS: Self = Self(17);
    pub const STRONG: Self = Self(18);
    pub const STRIKETHROUGH: Self = Self(19);
    pub const CODE: Self = Self(21);
    pub const EXTERNAL_HYPERLINK: Self = Self(37);
    pub const BOOK_HYPERLINK: Self = Self(38);
}

/// Horizontal alignment requested by a style entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// Align to the left edge.
    Left,
    /// Align to the right edge.
    Right,
    /// Center within the line.
    Center,
    /// Stretch spaces so the line fills the width.
    Justify,
}

/// Inline style overrides carried by a paragraph.
///
/// Every field is optional; `None` means "inherit". Lengths are in abstract units that the
/// rendering layer resolves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleEntry {
    /// Font size change in steps relative to the base size.
    pub font_size_mag: Option<i8>,
    /// Horizontal alignment.
    pub alignment: Option<Alignment>,
    /// Bold override.
    pub bold: Option<bool>,
    /// Italic override.
    pub italic: Option<bool>,
    /// Left indent.
    pub left_indent: Option<i16>,
    /// Right indent.
    pub right_indent: Option<i16>,
    /// Extra indent of the first line.
    pub first_line_indent: Option<i16>,
}

/// Opens or closes a span of the given [`TextKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlEntry {
    /// Kind of the span.
    pub kind: TextKind,
    /// `true` for the opening marker, `false` for the closing one.
    pub is_start: bool,
}

impl ControlEntry {
    /// An opening marker.
    pub const fn start(kind: TextKind) -> Self {
        Self {
            kind,
            is_start: true,
        }
    }

    /// A closing marker.
    pub const fn end(kind: TextKind) -> Self {
        Self {
            kind,
            is_start: false,
        }
    }
}

/// Opens a hyperlink span. Hyperlinks are closed by an ordinary [`ControlEntry::end`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HyperlinkControlEntry {
    /// Kind of the span, normally one of the hyperlink kinds.
    pub kind: TextKind,
    /// Link target.
    pub label: Rc<str>,
}

/// Reference to an image stored in the model's image map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    /// Key into the model's image map.
    pub id: Rc<str>,
}

/// Encoded image bytes, resolved by id from the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    /// MIME type reported by the format reader.
    pub mime: Rc<str>,
    /// Encoded image data.
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Creates image data.
    pub fn new(mime: impl Into<Rc<str>>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }
}

/// One entry of a logical paragraph.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    /// A run of UTF-8 text.
    Text(Rc<str>),
    /// Inline style overrides.
    Style(Rc<StyleEntry>),
    /// A fixed-width horizontal space, measured in spaces.
    FixedHSpace(u8),
    /// Opens or closes a styled span.
    Control(ControlEntry),
    /// Opens a hyperlink span.
    HyperlinkControl(HyperlinkControlEntry),
    /// An image reference.
    Image(ImageEntry),
    /// Returns the bidi embedding level to the paragraph's base level.
    ResetBidi,
}

impl Entry {
    /// A text entry.
    pub fn text(text: impl Into<Rc<str>>) -> Self {
        Self::Text(text.into())
    }

    /// An image entry.
    pub fn image(id: impl Into<Rc<str>>) -> Self {
        Self::Image(ImageEntry { id: id.into() })
    }

    /// A hyperlink entry.
    pub fn hyperlink(kind: TextKind, label: impl Into<Rc<str>>) -> Self {
        Self::HyperlinkControl(HyperlinkControlEntry {
            kind,
            label: label.into(),
        })
    }

    /// A style entry.
    pub fn style(style: StyleEntry) -> Self {
        Self::Style(Rc::new(style))
    }
}
