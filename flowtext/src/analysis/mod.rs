// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-character line-break and bidi analysis of text runs.

use alloc::vec::Vec;

use hashbrown::HashMap;
use icu_segmenter::options::{LineBreakOptions, LineBreakWordOption};
use icu_segmenter::{LineSegmenter, LineSegmenterBorrowed};
use unicode_bidi::{BidiClass, BidiInfo, Level};

use crate::context::WordBreak;
use crate::language::Language;

/// A bidi embedding level (even = LTR, odd = RTL).
pub type BidiLevel = u8;

/// Line-break classification of the position before a character.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug)]
#[repr(u8)]
pub(crate) enum Boundary {
    /// A line may not be broken here.
    None = 0,
    /// Potential line break.
    Line = 1,
    /// Mandatory line break.
    Mandatory = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CharInfo {
    /// Byte offset of the character within the run.
    pub(crate) offset: usize,
    pub(crate) ch: char,
    /// Whether a line may be broken before this character.
    pub(crate) boundary: Boundary,
    /// The bidi embedding level of the character.
    pub(crate) bidi_level: BidiLevel,
}

/// Ordinary whitespace; runs of it become breakable spaces.
pub(crate) fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Non-breaking spaces.
pub(crate) fn is_nb_space(ch: char) -> bool {
    matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

fn is_mandatory_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Segmenters are created on first use for each language and word-break option.
#[derive(Default)]
pub(crate) struct AnalysisDataSources {
    line_segmenters: HashMap<(Language, WordBreak), LineSegmenterBorrowed<'static>>,
}

impl core::fmt::Debug for AnalysisDataSources {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnalysisDataSources")
            .field("line_segmenters", &self.line_segmenters.len())
            .finish()
    }
}

impl AnalysisDataSources {
    fn line_segmenter(
        &mut self,
        language: Language,
        word_break: WordBreak,
    ) -> LineSegmenterBorrowed<'static> {
        *self
            .line_segmenters
            .entry((language, word_break))
            .or_insert_with(|| {
                let locale = language.to_icu();
                let mut options = LineBreakOptions::default();
                options.word_option = Some(match word_break {
                    WordBreak::Normal => LineBreakWordOption::Normal,
                    WordBreak::BreakAll => LineBreakWordOption::BreakAll,
                    WordBreak::KeepAll => LineBreakWordOption::KeepAll,
                });
                options.content_locale = locale.as_ref();
                log::trace!("creating line segmenter for {language} ({word_break:?})");
                LineSegmenter::new_auto(options)
            })
    }

    /// Analyzes one non-empty text run into `info`, one entry per character.
    ///
    /// `latest_level` is the level the previous run ended at; leading whitespace keeps it.
    /// Trailing whitespace takes the level of the last non-space character. Returns the level
    /// the run ends at.
    pub(crate) fn analyze_run(
        &mut self,
        text: &str,
        language: Language,
        word_break: WordBreak,
        base_level: BidiLevel,
        latest_level: BidiLevel,
        info: &mut Vec<CharInfo>,
    ) -> BidiLevel {
        info.clear();
        info.extend(text.char_indices().map(|(offset, ch)| CharInfo {
            offset,
            ch,
            boundary: Boundary::None,
            bidi_level: latest_level,
        }));

        // ICU reports boundaries at the start and end of the text, which we don't use.
        let mut chars = 0;
        for position in self.line_segmenter(language, word_break).segment_str(text) {
            if position == 0 || position >= text.len() {
                continue;
            }
            while chars < info.len() && info[chars].offset < position {
                chars += 1;
            }
            if chars == 0 || chars == info.len() || info[chars].offset != position {
                continue;
            }
            info[chars].boundary = if is_mandatory_break(info[chars - 1].ch) {
                Boundary::Mandatory
            } else {
                Boundary::Line
            };
        }

        let Some(first) = info.iter().position(|c| !is_space(c.ch)) else {
            return latest_level;
        };
        let last = info.iter().rposition(|c| !is_space(c.ch)).unwrap_or(first);

        let start = info[first].offset;
        let end = info[last].offset + info[last].ch.len_utf8();
        let trimmed = &text[start..end];
        if needs_bidi_resolution(trimmed, base_level) {
            let level = Level::new(base_level).unwrap_or_else(|_| Level::ltr());
            let levels = BidiInfo::new(trimmed, Some(level)).levels;
            for c in &mut info[first..=last] {
                c.bidi_level = levels[c.offset - start].number();
            }
        } else {
            for c in &mut info[first..=last] {
                c.bidi_level = base_level;
            }
        }

        let end_level = info[last].bidi_level;
        for c in &mut info[last + 1..] {
            c.bidi_level = end_level;
        }
        end_level
    }
}

/// Whether resolving `text` at `base_level` can produce any level other than `base_level`.
fn needs_bidi_resolution(text: &str, base_level: BidiLevel) -> bool {
    base_level % 2 == 1
        || text.chars().any(|ch| {
            matches!(
                unicode_bidi::bidi_class(ch),
                BidiClass::R
                    | BidiClass::AL
                    | BidiClass::AN
                    | BidiClass::RLE
                    | BidiClass::RLO
                    | BidiClass::RLI
                    | BidiClass::LRE
                    | BidiClass::LRO
                    | BidiClass::LRI
                    | BidiClass::FSI
            )
        })
}
