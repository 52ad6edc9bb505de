// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The explicit owner of all layout state.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::analysis::{AnalysisDataSources, CharInfo};
use crate::cache::{ParagraphCursorCache, ParagraphKey};
use crate::cursor::ParagraphCursor;
use crate::language::Language;
use crate::model::TextModel;
use crate::pool::ElementPool;

/// Where lines may be broken inside words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WordBreak {
    /// The default UAX #14 behavior.
    #[default]
    Normal,
    /// Allow breaks between any two letters.
    BreakAll,
    /// Forbid breaks between letters, including in CJK text.
    KeepAll,
}

/// Configuration of a [`LayoutContext`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Line-break behavior inside words.
    pub word_break: WordBreak,
    /// Maximum number of words (and, separately, controls) kept for reuse by the pool.
    pub max_pooled_elements: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            word_break: WordBreak::Normal,
            max_pooled_elements: 1024,
        }
    }
}

/// Owns the element pool, the paragraph cursor cache and the segmentation data.
///
/// Create one per layout thread at startup and pass it to every operation that may build a
/// paragraph. Nothing in it is shared across threads.
#[derive(Debug)]
pub struct LayoutContext {
    config: LayoutConfig,
    pool: Rc<RefCell<ElementPool>>,
    cache: ParagraphCursorCache,
    pub(crate) analysis: AnalysisDataSources,
    pub(crate) info: Vec<CharInfo>,
}

impl LayoutContext {
    /// Creates a context with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Creates a context with the given configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            pool: Rc::new(RefCell::new(ElementPool::new(config.max_pooled_elements))),
            config,
            cache: ParagraphCursorCache::default(),
            analysis: AnalysisDataSources::default(),
            info: Vec::new(),
        }
    }

    /// The configuration this context was created with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The element pool shared by every cursor built through this context.
    pub fn pool(&self) -> &Rc<RefCell<ElementPool>> {
        &self.pool
    }

    /// The paragraph cursor cache.
    pub fn cache(&self) -> &ParagraphCursorCache {
        &self.cache
    }

    /// Returns the cursor for paragraph `index` of `model`, building it on a cache miss.
    ///
    /// `index` is clamped to the last paragraph. Returns `None` only for an empty model.
    pub fn cursor(
        &mut self,
        model: &Rc<TextModel>,
        language: Language,
        index: usize,
    ) -> Option<Rc<ParagraphCursor>> {
        let last = model.len().checked_sub(1)?;
        let index = index.min(last);
        let key = ParagraphKey::new(model.id(), index, language);
        if let Some(cursor) = self.cache.get(&key) {
            return Some(cursor);
        }

        let cursor = Rc::new(ParagraphCursor::new(
            model.clone(),
            language,
            index,
            self.pool.clone(),
        ));
        cursor.fill(self);
        self.cache.put(key, cursor.clone());
        Some(cursor)
    }

    /// Drops cache entries whose cursors are no longer held anywhere and returns how many
    /// were dropped.
    ///
    /// Call this on page turns or when a model is closed; the cache never evicts on its own.
    pub fn cleanup_cache(&mut self) -> usize {
        self.cache.cleanup()
    }

    /// Forgets every cached cursor, including the most recently built one.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}
