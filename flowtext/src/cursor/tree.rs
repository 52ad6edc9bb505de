// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adjacency in tree models, skipping the contents of closed nodes.
//!
//! Top-level paragraphs are treated as the children of an implicit root, so "last child"
//! checks apply to them as well.

use crate::model::TextModel;

/// The next visible paragraph after `index`.
///
/// End-of-text paragraphs are not treated as boundaries here; only the model length is.
pub(super) fn next(model: &TextModel, index: usize) -> Option<usize> {
    if index + 1 == model.len() {
        return None;
    }
    if model.is_open(index) && !model.children(index).is_empty() {
        return Some(index + 1);
    }
    let mut current = index;
    while model.is_last_child(current) {
        current = model.parent(current)?;
    }
    model.next_sibling(current)
}

/// The previous visible paragraph before `index`, which must not be first.
///
/// The node just before `index` in document order is visible unless one of its ancestors
/// below the parent of `index` is closed; the outermost such ancestor stands in for it.
pub(super) fn previous(model: &TextModel, index: usize) -> usize {
    let candidate = index - 1;
    let parent = model.parent(index);
    if Some(candidate) == parent {
        return candidate;
    }
    let mut last_not_open = candidate;
    let mut ancestor = model.parent(candidate);
    while ancestor != parent {
        let Some(node) = ancestor else {
            break;
        };
        if !model.is_open(node) {
            last_not_open = node;
        }
        ancestor = model.parent(node);
    }
    last_not_open
}

/// Whether no visible paragraph follows `index`.
pub(super) fn is_last(model: &TextModel, index: usize) -> bool {
    if model.is_open(index) && !model.children(index).is_empty() {
        return false;
    }
    let mut current = index;
    loop {
        if !model.is_last_child(current) {
            return false;
        }
        match model.parent(current) {
            Some(parent) => current = parent,
            None => return true,
        }
    }
}
