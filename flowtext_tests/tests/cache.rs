// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph cursor cache tests.

use std::rc::Rc;

use flowtext::{Language, LayoutContext};

use crate::util::plain_model;

#[test]
fn cache_returns_the_same_cursor() {
    let model = plain_model(&["one", "two"]);
    let mut cx = LayoutContext::new();
    let first = cx.cursor(&model, Language::UND, 0).unwrap();
    let again = cx.cursor(&model, Language::UND, 0).unwrap();
    assert!(Rc::ptr_eq(&first, &again));

    let via_next = cx.cursor(&model, Language::UND, 1).unwrap();
    let back = via_next.previous(&mut cx).unwrap();
    assert!(Rc::ptr_eq(&first, &back));
}

#[test]
fn cache_expired_cursors_are_rebuilt() {
    let model = plain_model(&["one", "two"]);
    let mut cx = LayoutContext::new();
    let first = cx.cursor(&model, Language::UND, 0).unwrap();
    let weak = Rc::downgrade(&first);
    drop(first);
    // Still retained as the most recently built cursor.
    assert!(weak.upgrade().is_some());

    drop(cx.cursor(&model, Language::UND, 1));
    assert!(weak.upgrade().is_none());
    assert_eq!(cx.cleanup_cache(), 1);
    assert_eq!(cx.cache().len(), 1);

    let rebuilt = cx.cursor(&model, Language::UND, 0).unwrap();
    assert_eq!(rebuilt.paragraph_length(), 1);
    assert_eq!(cx.cache().len(), 2);
}

#[test]
fn cache_is_keyed_by_model() {
    let model = plain_model(&["one"]);
    let other = plain_model(&["one"]);
    let mut cx = LayoutContext::new();
    let first = cx.cursor(&model, Language::UND, 0).unwrap();
    let second = cx.cursor(&other, Language::UND, 0).unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
    assert!(Rc::ptr_eq(second.model(), &other));
}

#[test]
fn cache_recycles_elements_of_dropped_cursors() {
    let model = plain_model(&["a b c"]);
    let mut cx = LayoutContext::new();
    drop(cx.cursor(&model, Language::UND, 0));
    cx.clear_cache();
    let stats = cx.pool().borrow().stats();
    assert_eq!(stats.words_allocated, 3);
    assert_eq!(stats.free_words, 3);

    let _cursor = cx.cursor(&model, Language::UND, 0).unwrap();
    let stats = cx.pool().borrow().stats();
    assert_eq!(stats.words_allocated, 3);
    assert_eq!(stats.words_reused, 3);
}
