// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use super::{Entry, Paragraph};

/// A highlighted span of a paragraph, such as a search hit or a selection.
///
/// `offset` and `length` are UTF-8 byte counts relative to the concatenation of the
/// paragraph's text entries. Marks order by paragraph, then offset, then length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mark {
    /// Logical index of the paragraph.
    pub paragraph: usize,
    /// Byte offset of the span within the paragraph text.
    pub offset: usize,
    /// Byte length of the span.
    pub length: usize,
}

impl Mark {
    /// Creates a mark.
    pub const fn new(paragraph: usize, offset: usize, length: usize) -> Self {
        Self {
            paragraph,
            offset,
            length,
        }
    }

    /// The end of the span (exclusive).
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Returns the marks of paragraph `index` from a slice sorted by paragraph.
pub(crate) fn marks_for_paragraph(marks: &[Mark], index: usize) -> &[Mark] {
    let start = marks.partition_point(|mark| mark.paragraph < index);
    let len = marks[start..]
        .iter()
        .take_while(|mark| mark.paragraph == index)
        .count();
    &marks[start..start + len]
}

/// Appends a mark for every non-overlapping occurrence of `pattern` in the text entries of
/// `paragraph`.
///
/// Matches never span two text entries.
pub(crate) fn search_paragraph(
    paragraph: &Paragraph,
    index: usize,
    pattern: &str,
    ignore_case: bool,
    out: &mut Vec<Mark>,
) {
    let mut offset = 0;
    for entry in paragraph.entries() {
        let Entry::Text(text) = entry else {
            continue;
        };
        let mut start = 0;
        while start < text.len() {
            match match_at(&text[start..], pattern, ignore_case) {
                Some(len) => {
                    out.push(Mark::new(index, offset + start, len));
                    start += len;
                }
                None => {
                    start += text[start..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        offset += text.len();
    }
}

/// Returns the byte length of the prefix of `haystack` that matches `pattern`.
fn match_at(haystack: &str, pattern: &str, ignore_case: bool) -> Option<usize> {
    if !ignore_case {
        return haystack.starts_with(pattern).then_some(pattern.len());
    }
    let mut haystack_chars = haystack.char_indices();
    for p in pattern.chars() {
        let (_, h) = haystack_chars.next()?;
        if h != p && !h.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    Some(
        haystack_chars
            .next()
            .map_or(haystack.len(), |(position, _)| position),
    )
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Mark, marks_for_paragraph, search_paragraph};
    use crate::model::{Entry, Paragraph};

    #[test]
    fn marks_window() {
        let marks = vec![
            Mark::new(0, 1, 1),
            Mark::new(2, 0, 3),
            Mark::new(2, 5, 1),
            Mark::new(4, 0, 1),
        ];
        assert_eq!(marks_for_paragraph(&marks, 2), &marks[1..3]);
        assert!(marks_for_paragraph(&marks, 3).is_empty());
        assert!(marks_for_paragraph(&marks, 9).is_empty());
    }

    #[test]
    fn search_accumulates_entry_offsets() {
        let paragraph = Paragraph::from_text(["one two ", "two"]);
        let mut marks = Vec::new();
        search_paragraph(&paragraph, 7, "two", false, &mut marks);
        assert_eq!(marks, vec![Mark::new(7, 4, 3), Mark::new(7, 8, 3)]);
    }

    #[test]
    fn search_ignores_case_and_skips_non_text() {
        let paragraph = Paragraph::from_entries(
            crate::ParagraphKind::Text,
            [
                Entry::text("Straße"),
                Entry::FixedHSpace(2),
                Entry::text("STRASSE straße"),
            ],
        );
        let mut marks = Vec::new();
        search_paragraph(&paragraph, 0, "STRAßE", true, &mut marks);
        assert_eq!(marks, vec![Mark::new(0, 0, 7), Mark::new(0, 15, 7)]);
    }

    #[test]
    fn search_does_not_overlap() {
        let paragraph = Paragraph::from_text(["aaaa"]);
        let mut marks = Vec::new();
        search_paragraph(&paragraph, 0, "aa", false, &mut marks);
        assert_eq!(marks, vec![Mark::new(0, 0, 2), Mark::new(0, 2, 2)]);
    }
}
