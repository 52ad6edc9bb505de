// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures and helpers shared across tests.

use std::rc::Rc;

use flowtext::{
    Element, Entry, Language, LayoutContext, Paragraph, ParagraphCursor, SpecialKind,
    TextModel, TreeModelBuilder,
};

/// A compact view of an element for assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Item {
    Word(String),
    Space,
    NbSpace,
    Start,
    End,
    Other,
}

pub(crate) fn items(cursor: &ParagraphCursor) -> Vec<Item> {
    cursor
        .elements()
        .iter()
        .map(|element| match element {
            Element::Word(word) => Item::Word(word.text().to_owned()),
            Element::Special(special) => match special.kind() {
                SpecialKind::HSpace => Item::Space,
                SpecialKind::NbHSpace => Item::NbSpace,
                SpecialKind::StartReversedSequence => Item::Start,
                SpecialKind::EndReversedSequence => Item::End,
                _ => Item::Other,
            },
            _ => Item::Other,
        })
        .collect()
}

pub(crate) fn word(text: &str) -> Item {
    Item::Word(text.to_owned())
}

/// A flat model with one text paragraph per string.
pub(crate) fn plain_model(texts: &[&str]) -> Rc<TextModel> {
    Rc::new(TextModel::plain(
        texts
            .iter()
            .map(|text| Paragraph::from_text([*text]))
            .collect(),
    ))
}

/// Builds the single paragraph of `text` and returns its items.
pub(crate) fn build(text: &str, language: &str) -> Vec<Item> {
    let model = plain_model(&[text]);
    let mut cx = LayoutContext::new();
    let language = Language::parse(language).unwrap();
    let cursor = cx.cursor(&model, language, 0).unwrap();
    items(&cursor)
}

/// The tree `A(B, C), D`, with A at index 0 and D at index 3. All nodes start closed.
pub(crate) fn tree_model() -> Rc<TextModel> {
    let mut builder = TreeModelBuilder::new();
    let a = builder.push(None, [Entry::text("A")]).unwrap();
    builder.push(Some(a), [Entry::text("B")]).unwrap();
    builder.push(Some(a), [Entry::text("C")]).unwrap();
    builder.push(None, [Entry::text("D")]).unwrap();
    Rc::new(builder.build())
}

/// Rejoins words and spaces, writing one space per space element.
pub(crate) fn rejoin(items: &[Item]) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            Item::Word(word) => text.push_str(word),
            Item::Space | Item::NbSpace => text.push(' '),
            _ => {}
        }
    }
    text
}
