// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns one logical paragraph into renderable elements.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::ops::Range;

use crate::analysis::{
    AnalysisDataSources, BidiLevel, Boundary, CharInfo, is_nb_space, is_space,
};
use crate::context::WordBreak;
use crate::element::{Element, FixedHSpaceElement, ImageElement, SpecialKind, StyleElement};
use crate::language::Language;
use crate::model::{Entry, Mark, Paragraph, TextModel};
use crate::pool::ElementPool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpaceState {
    NoSpace,
    Space,
    NonBreakableSpace,
}

/// Builds the elements of one text or tree paragraph.
pub(crate) struct ParagraphBuilder<'a> {
    model: &'a TextModel,
    paragraph: &'a Paragraph,
    /// Marks of this paragraph only.
    marks: &'a [Mark],
    language: Language,
    word_break: WordBreak,
    pool: &'a mut ElementPool,
    elements: &'a mut Vec<Element>,
    analysis: &'a mut AnalysisDataSources,
    info: &'a mut Vec<CharInfo>,
    base_level: BidiLevel,
    current_level: BidiLevel,
    latest_level: BidiLevel,
    /// Byte offset of the current text entry within the paragraph text.
    offset: usize,
}

impl<'a> ParagraphBuilder<'a> {
    pub(crate) fn new(
        model: &'a TextModel,
        paragraph: &'a Paragraph,
        marks: &'a [Mark],
        language: Language,
        word_break: WordBreak,
        pool: &'a mut ElementPool,
        elements: &'a mut Vec<Element>,
        analysis: &'a mut AnalysisDataSources,
        info: &'a mut Vec<CharInfo>,
    ) -> Self {
        let base_level = BidiLevel::from(language.is_rtl());
        Self {
            model,
            paragraph,
            marks,
            language,
            word_break,
            pool,
            elements,
            analysis,
            info,
            base_level,
            current_level: base_level,
            latest_level: base_level,
            offset: 0,
        }
    }

    pub(crate) fn fill(mut self) {
        for entry in self.paragraph.entries() {
            match entry {
                Entry::Style(style) => {
                    self.elements
                        .push(Element::Style(StyleElement::new(style.clone())));
                }
                Entry::FixedHSpace(length) => {
                    self.elements
                        .push(Element::FixedHSpace(FixedHSpaceElement::new(*length)));
                }
                Entry::Control(control) => {
                    let element = self.pool.acquire_control(control);
                    self.elements.push(element);
                }
                Entry::HyperlinkControl(hyperlink) => {
                    let element = self.pool.acquire_hyperlink(hyperlink);
                    self.elements.push(element);
                }
                Entry::Image(image) => match self.model.image(&image.id) {
                    Some(data) => self.elements.push(Element::Image(ImageElement::new(
                        image.id.clone(),
                        data.clone(),
                    ))),
                    None => log::trace!("skipping unresolved image {:?}", image.id),
                },
                Entry::Text(text) => self.process_text(text),
                Entry::ResetBidi => {
                    self.update_bidi_level(self.base_level);
                    self.latest_level = self.base_level;
                }
            }
        }
        self.update_bidi_level(self.base_level);
    }

    fn process_text(&mut self, text: &Rc<str>) {
        if text.is_empty() {
            return;
        }

        self.latest_level = self.analysis.analyze_run(
            text,
            self.language,
            self.word_break,
            self.base_level,
            self.latest_level,
            self.info,
        );
        let info = core::mem::take(self.info);

        let mut state = SpaceState::NoSpace;
        let mut word_start = 0;
        let mut previous = None;
        // The character before the current run of spaces.
        let mut before_spaces = None;
        self.update_bidi_level(info[0].bidi_level);

        for (i, c) in info.iter().enumerate() {
            let position = c.offset;
            if is_space(c.ch) {
                if state == SpaceState::NoSpace {
                    if position != word_start {
                        self.add_word(text, word_start..position);
                    }
                    before_spaces = previous;
                }
                state = SpaceState::Space;
            } else if is_nb_space(c.ch) {
                if state == SpaceState::NoSpace {
                    if position != word_start {
                        self.add_word(text, word_start..position);
                    }
                    before_spaces = previous;
                    state = SpaceState::NonBreakableSpace;
                }
            } else {
                match state {
                    SpaceState::Space => {
                        let kind =
                            if c.boundary == Boundary::None || before_spaces == Some('-') {
                                SpecialKind::NbHSpace
                            } else {
                                SpecialKind::HSpace
                            };
                        self.elements.push(ElementPool::pooled_marker(kind));
                        word_start = position;
                    }
                    SpaceState::NonBreakableSpace => {
                        self.elements
                            .push(ElementPool::pooled_marker(SpecialKind::NbHSpace));
                        word_start = position;
                    }
                    SpaceState::NoSpace => {
                        let can_break = c.boundary != Boundary::None
                            && previous != Some('-')
                            && position != word_start;
                        if position > 0
                            && (can_break || info[i - 1].bidi_level != c.bidi_level)
                        {
                            self.add_word(text, word_start..position);
                            word_start = position;
                        }
                    }
                }
                state = SpaceState::NoSpace;
            }
            self.update_bidi_level(c.bidi_level);
            previous = Some(c.ch);
        }

        match state {
            SpaceState::Space => self
                .elements
                .push(ElementPool::pooled_marker(SpecialKind::HSpace)),
            SpaceState::NonBreakableSpace => self
                .elements
                .push(ElementPool::pooled_marker(SpecialKind::NbHSpace)),
            SpaceState::NoSpace => self.add_word(text, word_start..text.len()),
        }

        *self.info = info;
        self.offset += text.len();
    }

    fn add_word(&mut self, text: &Rc<str>, range: Range<usize>) {
        let paragraph_offset = self.offset + range.start;
        let mut element =
            self.pool
                .acquire_word(text.clone(), range, paragraph_offset, self.current_level);
        if let Element::Word(word) = &mut element {
            for mark in self.marks {
                word.add_mark(mark.offset, mark.length);
            }
        }
        self.elements.push(element);
    }

    fn update_bidi_level(&mut self, level: BidiLevel) {
        while self.current_level > level {
            self.current_level -= 1;
            self.elements.push(ElementPool::pooled_marker(
                SpecialKind::EndReversedSequence,
            ));
        }
        while self.current_level < level {
            self.current_level += 1;
            self.elements.push(ElementPool::pooled_marker(
                SpecialKind::StartReversedSequence,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::{
        ControlEntry, ElementKind, Entry, ImageData, Language, LayoutContext, Mark,
        MarkSpan, Paragraph, ParagraphKind, TextKind, TextModel,
    };

    fn build(model: TextModel, language: &str) -> Vec<(ElementKind, String)> {
        let model = Rc::new(model);
        let mut cx = LayoutContext::new();
        let language = Language::parse(language).unwrap();
        let cursor = cx.cursor(&model, language, 0).unwrap();
        let elements = cursor
            .elements()
            .iter()
            .map(|element| {
                let text = element.as_word().map(|w| w.text().into()).unwrap_or_default();
                (element.kind(), text)
            })
            .collect();
        elements
    }

    fn words(elements: &[(ElementKind, String)]) -> Vec<&str> {
        elements
            .iter()
            .filter(|(kind, _)| *kind == ElementKind::Word)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    fn kinds(elements: &[(ElementKind, String)]) -> Vec<ElementKind> {
        elements.iter().map(|(kind, _)| *kind).collect()
    }

    #[test]
    fn hello_world_with_mark() {
        let model = Rc::new(TextModel::plain(vec![Paragraph::from_text(["hello world"])]));
        model.set_marks(vec![Mark::new(0, 6, 5)]);
        let mut cx = LayoutContext::new();
        let cursor = cx.cursor(&model, Language::UND, 0).unwrap();
        let elements = cursor.elements();
        assert_eq!(elements.len(), 3);

        let hello = elements[0].as_word().unwrap();
        assert_eq!(
            (hello.text(), hello.paragraph_offset(), hello.size()),
            ("hello", 0, 5)
        );
        assert!(hello.marks().is_empty());
        assert_eq!(elements[1].kind(), ElementKind::HSpace);
        let world = elements[2].as_word().unwrap();
        assert_eq!(
            (world.text(), world.paragraph_offset(), world.size()),
            ("world", 6, 5)
        );
        assert_eq!(world.marks(), &[MarkSpan { start: 0, len: 5 }]);
    }

    #[test]
    fn space_runs_collapse() {
        let elements = build(
            TextModel::plain(vec![Paragraph::from_text(["  a   b  "])]),
            "en",
        );
        assert_eq!(
            kinds(&elements),
            [
                ElementKind::HSpace,
                ElementKind::Word,
                ElementKind::HSpace,
                ElementKind::Word,
                ElementKind::HSpace,
            ]
        );
    }

    #[test]
    fn non_breaking_spaces() {
        let elements = build(
            TextModel::plain(vec![Paragraph::from_text(["10\u{a0}km"])]),
            "en",
        );
        assert_eq!(
            kinds(&elements),
            [ElementKind::Word, ElementKind::NbHSpace, ElementKind::Word]
        );
    }

    #[test]
    fn space_before_closing_punctuation_does_not_break() {
        // UAX #14 forbids a break before `!`, so the space is not breakable.
        let elements = build(
            TextModel::plain(vec![Paragraph::from_text(["wow !"])]),
            "en",
        );
        assert_eq!(
            kinds(&elements),
            [ElementKind::Word, ElementKind::NbHSpace, ElementKind::Word]
        );
    }

    #[test]
    fn space_after_hyphen_does_not_break() {
        let elements = build(
            TextModel::plain(vec![Paragraph::from_text(["pre- and post-war"])]),
            "en",
        );
        assert_eq!(words(&elements), ["pre-", "and", "post-war"]);
        assert_eq!(elements[1].0, ElementKind::NbHSpace);
        assert_eq!(elements[3].0, ElementKind::HSpace);
    }

    #[test]
    fn ideographs_split_into_words() {
        let elements = build(
            TextModel::plain(vec![Paragraph::from_text(["漢字です"])]),
            "ja",
        );
        assert_eq!(words(&elements).concat(), "漢字です");
        assert!(words(&elements).len() > 1);
        assert!(!kinds(&elements).contains(&ElementKind::HSpace));
    }

    #[test]
    fn offsets_accumulate_across_entries() {
        let model = Rc::new(TextModel::plain(vec![Paragraph::from_text([
            "one ", "", "two",
        ])]));
        model.set_marks(vec![Mark::new(0, 2, 4)]);
        let mut cx = LayoutContext::new();
        let cursor = cx.cursor(&model, Language::UND, 0).unwrap();
        let elements = cursor.elements();
        assert_eq!(elements.len(), 3);
        let one = elements[0].as_word().unwrap();
        assert_eq!(one.marks(), &[MarkSpan { start: 2, len: 1 }]);
        let two = elements[2].as_word().unwrap();
        assert_eq!(two.paragraph_offset(), 4);
        assert_eq!(two.marks(), &[MarkSpan { start: 0, len: 2 }]);
    }

    #[test]
    fn entries_become_elements() {
        let model = TextModel::plain(vec![Paragraph::from_entries(
            ParagraphKind::Text,
            [
                Entry::Control(ControlEntry::start(TextKind::EMPHASIS)),
                Entry::style(crate::StyleEntry::default()),
                Entry::text("x"),
                Entry::FixedHSpace(3),
                Entry::image("cover"),
                Entry::image("missing"),
                Entry::hyperlink(TextKind::EXTERNAL_HYPERLINK, "https://example.com"),
                Entry::Control(ControlEntry::end(TextKind::EMPHASIS)),
            ],
        )])
        .with_image("cover", ImageData::new("image/png", vec![1, 2, 3]));
        let elements = build(model, "en");
        assert_eq!(
            kinds(&elements),
            [
                ElementKind::Control,
                ElementKind::Style,
                ElementKind::Word,
                ElementKind::FixedHSpace,
                ElementKind::Image,
                ElementKind::Control,
                ElementKind::Control,
            ]
        );
    }

    #[test]
    fn rtl_run_is_wrapped_in_reversed_sequence() {
        let elements = build(
            TextModel::plain(vec![Paragraph::from_text(["see שלום now"])]),
            "en",
        );
        assert_eq!(
            kinds(&elements),
            [
                ElementKind::Word,
                ElementKind::HSpace,
                ElementKind::StartReversedSequence,
                ElementKind::Word,
                ElementKind::EndReversedSequence,
                ElementKind::HSpace,
                ElementKind::Word,
            ]
        );
    }

    #[test]
    fn level_change_splits_words() {
        let elements = build(
            TextModel::plain(vec![Paragraph::from_text(["abcשלום"])]),
            "en",
        );
        assert_eq!(words(&elements), ["abc", "שלום"]);
        assert_eq!(
            kinds(&elements),
            [
                ElementKind::Word,
                ElementKind::StartReversedSequence,
                ElementKind::Word,
                ElementKind::EndReversedSequence,
            ]
        );
    }

    #[test]
    fn rtl_paragraph_base_level() {
        let model = Rc::new(TextModel::plain(vec![Paragraph::from_text(["שלום"])]));
        let mut cx = LayoutContext::new();
        let cursor = cx
            .cursor(&model, Language::parse("he").unwrap(), 0)
            .unwrap();
        let elements = cursor.elements();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].as_word().unwrap().bidi_level(), 1);
    }

    #[test]
    fn reset_bidi_returns_to_base() {
        let model = TextModel::plain(vec![Paragraph::from_entries(
            ParagraphKind::Text,
            [Entry::text("שלום"), Entry::ResetBidi, Entry::text("abc")],
        )]);
        let elements = build(model, "en");
        assert_eq!(
            kinds(&elements),
            [
                ElementKind::StartReversedSequence,
                ElementKind::Word,
                ElementKind::EndReversedSequence,
                ElementKind::Word,
            ]
        );
    }
}
