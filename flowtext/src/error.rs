// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::model::ParagraphKind;

/// Error returned when a document model cannot be assembled.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the paragraph that was being added and, for
/// tree models, the parent that was requested for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    paragraph: usize,
    parent: Option<usize>,
    paragraph_kind: Option<ParagraphKind>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The index the offending paragraph would have had in the model.
    pub fn paragraph(&self) -> usize {
        self.paragraph
    }

    /// The parent index requested for the paragraph, if any.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub(crate) fn invalid_parent(paragraph: usize, parent: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidParent,
            paragraph,
            parent: Some(parent),
            paragraph_kind: None,
        }
    }

    pub(crate) fn not_preorder(paragraph: usize, parent: usize) -> Self {
        Self {
            kind: ErrorKind::NotPreorder,
            paragraph,
            parent: Some(parent),
            paragraph_kind: None,
        }
    }

    pub(crate) fn kind_mismatch(paragraph: usize, kind: ParagraphKind) -> Self {
        Self {
            kind: ErrorKind::ParagraphKindMismatch,
            paragraph,
            parent: None,
            paragraph_kind: Some(kind),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidParent => write!(
                f,
                "paragraph {}: parent {} does not exist",
                self.paragraph,
                self.parent.unwrap_or_default()
            ),
            ErrorKind::NotPreorder => write!(
                f,
                "paragraph {}: parent {} is closed to further children (paragraphs must be added in preorder)",
                self.paragraph,
                self.parent.unwrap_or_default()
            ),
            ErrorKind::ParagraphKindMismatch => match self.paragraph_kind {
                Some(kind) => write!(
                    f,
                    "paragraph {}: {kind:?} paragraphs are not allowed in tree models",
                    self.paragraph
                ),
                None => write!(f, "paragraph {}: unexpected paragraph kind", self.paragraph),
            },
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The requested parent index is not a paragraph of the model.
    InvalidParent,

    /// The requested parent already has a later sibling or descendant, so appending a child
    /// to it would break the preorder layout of the paragraph sequence.
    NotPreorder,

    /// The paragraph kind cannot appear in this kind of model.
    ParagraphKindMismatch,
}
