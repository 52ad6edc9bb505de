// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::{Rc, Weak};

use hashbrown::HashMap;

use crate::cursor::ParagraphCursor;
use crate::language::Language;
use crate::model::ModelId;

/// Identity of a built paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParagraphKey {
    /// The model the paragraph belongs to.
    pub model: ModelId,
    /// Logical index of the paragraph.
    pub index: usize,
    /// Language the paragraph was built for.
    pub language: Language,
}

impl ParagraphKey {
    /// Creates a key.
    pub fn new(model: ModelId, index: usize, language: Language) -> Self {
        Self {
            model,
            index,
            language,
        }
    }
}

/// Weakly remembers built paragraph cursors.
///
/// While any navigation frame holds a cursor, lookups return that same instance. The cache
/// additionally keeps the most recently added cursor alive so it survives until the caller
/// takes hold of it. Expired entries are only dropped by [`cleanup`](Self::cleanup).
#[derive(Debug, Default)]
pub struct ParagraphCursorCache {
    entries: HashMap<ParagraphKey, Weak<ParagraphCursor>>,
    last_added: Option<Rc<ParagraphCursor>>,
}

impl ParagraphCursorCache {
    /// The live cursor for `key`, if any.
    pub fn get(&self, key: &ParagraphKey) -> Option<Rc<ParagraphCursor>> {
        self.entries.get(key)?.upgrade()
    }

    /// Registers `cursor` under `key` and makes it the retained most recent cursor.
    pub fn put(&mut self, key: ParagraphKey, cursor: Rc<ParagraphCursor>) {
        self.entries.insert(key, Rc::downgrade(&cursor));
        self.last_added = Some(cursor);
    }

    /// Drops every entry whose cursor has expired and returns the number dropped.
    pub fn cleanup(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, cursor| cursor.strong_count() > 0);
        let dropped = before - self.entries.len();
        log::debug!(
            "paragraph cursor cache cleanup dropped {dropped} of {before} entries"
        );
        dropped
    }

    /// Drops everything, including the retained most recent cursor.
    pub fn clear(&mut self) {
        self.last_added = None;
        self.entries.clear();
    }

    /// Number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
