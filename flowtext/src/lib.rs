// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph building, cursors and caching for paginated e-book text.
//!
//! `flowtext` turns a logical document model (paragraphs made of text runs, control markers,
//! images and style entries) into a linear sequence of renderable [`Element`]s that a
//! pagination layer can walk. The pieces, leaf to root:
//!
//! - [`ElementPool`] recycles word and control elements and hands out the shared marker
//!   singletons (spaces, paragraph spacers, bidi sequence markers).
//! - The paragraph builder segments text runs into words and spaces using UAX #14 line-break
//!   opportunities and UAX #9 embedding levels, and overlays search marks onto words.
//! - [`ParagraphCursor`] owns the built elements for one paragraph and navigates to its
//!   neighbours, skipping closed subtrees in tree models.
//! - [`ParagraphCursorCache`] weakly remembers built cursors so repeated navigation reuses them.
//! - [`WordCursor`] is a totally ordered position used for viewports, selection and the
//!   persisted reading position.
//!
//! All state is owned by an explicit [`LayoutContext`] and is single threaded.
//!
//! ## Features
//!
//! - `std` (enabled by default): Forwards to `unicode-bidi/std`. Without it the crate is
//!   `no_std` + `alloc`.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use flowtext::{Element, Language, LayoutContext, Mark, Paragraph, TextModel};
//!
//! let model = Rc::new(TextModel::plain(vec![Paragraph::from_text(["hello world"])]));
//! model.set_marks(vec![Mark::new(0, 6, 5)]);
//!
//! let mut cx = LayoutContext::new();
//! let cursor = cx.cursor(&model, Language::UND, 0).unwrap();
//! assert_eq!(cursor.paragraph_length(), 3);
//! let world = cursor.element(2).unwrap();
//! let Element::Word(word) = &*world else { panic!("expected a word") };
//! assert_eq!(word.text(), "world");
//! assert_eq!(word.paragraph_offset(), 6);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod analysis;
mod builder;
mod cache;
mod context;
mod cursor;
mod element;
mod error;
mod language;
mod model;
mod pool;

pub use crate::analysis::BidiLevel;
pub use crate::cache::{ParagraphCursorCache, ParagraphKey};
pub use crate::context::{LayoutConfig, LayoutContext, WordBreak};
pub use crate::cursor::{ParagraphCursor, WordCursor};
pub use crate::element::{
    ControlElement, Element, ElementKind, FixedHSpaceElement, ImageElement, MarkSpan,
    SpecialElement, SpecialKind, StyleElement, Word,
};
pub use crate::error::{Error, ErrorKind};
pub use crate::language::{Language, ParseLanguageError};
pub use crate::model::{
    Alignment, ControlEntry, Entry, HyperlinkControlEntry, ImageData, ImageEntry, Mark,
    ModelId, ModelKind, Paragraph, ParagraphKind, StyleEntry, TextKind, TextModel,
    TreeModelBuilder,
};
pub use crate::pool::{ElementPool, ElementVec, PoolStats};
