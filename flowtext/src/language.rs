// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use icu_locale_core::LanguageIdentifier;

/// Primary language subtags whose text runs default to a right-to-left base direction.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "ckb", "dv", "fa", "he", "iw", "ps", "sd", "ug", "ur", "yi",
];

/// A compact, zero-allocation document language tag.
///
/// Only the `language[-Script][-REGION]` shape is accepted, normalized to common casing
/// conventions (lowercase language, titlecase script, uppercase region). `_` is accepted as a
/// separator and normalized to `-`.
///
/// The language drives two things in paragraph building: the content locale handed to the
/// line segmenter and the base bidi direction of every paragraph.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    bytes: [u8; 12],
    len: u8,
    language_len: u8,
}

impl Language {
    /// The maximum length of the canonical form.
    pub const MAX_LEN: usize = 12;

    /// The “undefined” language (`und`).
    pub const UND: Self = Self {
        bytes: *b"und\0\0\0\0\0\0\0\0\0",
        len: 3,
        language_len: 3,
    };

    /// Parses a language tag.
    #[inline(always)]
    pub fn parse(s: &str) -> Result<Self, ParseLanguageError> {
        s.parse()
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored.
        core::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("und")
    }

    /// Returns the primary language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.as_str()[..self.language_len as usize]
    }

    /// Whether paragraphs in this language have a right-to-left base direction.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(&self.language())
    }

    /// Converts to an ICU language identifier for locale-sensitive segmentation.
    ///
    /// Returns `None` for the undefined language, which selects the root rules.
    pub(crate) fn to_icu(self) -> Option<LanguageIdentifier> {
        if self == Self::UND {
            return None;
        }
        LanguageIdentifier::try_from_str(self.as_str()).ok()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::UND
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Language").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseLanguageError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(ParseLanguageError::TooLong);
        }

        let mut out = Self {
            bytes: [0; 12],
            len: 0,
            language_len: 0,
        };
        let mut previous = None;
        for (subtag_index, subtag) in s.split(['-', '_']).enumerate() {
            if subtag.is_empty() || !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(ParseLanguageError::InvalidSubtag);
            }
            let kind = match (subtag_index, subtag.len()) {
                (0, 2..=3) if subtag.bytes().all(|b| b.is_ascii_alphabetic()) => Subtag::Language,
                (1, 4) if subtag.bytes().all(|b| b.is_ascii_alphabetic()) => Subtag::Script,
                (1, 2) | (2, 2) if subtag.bytes().all(|b| b.is_ascii_alphabetic()) => Subtag::Region,
                (1, 3) | (2, 3) if subtag.bytes().all(|b| b.is_ascii_digit()) => Subtag::Region,
                _ => return Err(ParseLanguageError::InvalidSubtag),
            };
            // A region may only follow the language or the script.
            if subtag_index == 2 && !matches!(previous, Some(Subtag::Script)) {
                return Err(ParseLanguageError::InvalidSubtag);
            }
            previous = Some(kind);
            let mut pos = out.len as usize;
            if subtag_index > 0 {
                out.bytes[pos] = b'-';
                pos += 1;
            }
            for (i, b) in subtag.bytes().enumerate() {
                out.bytes[pos + i] = match kind {
                    Subtag::Language => b.to_ascii_lowercase(),
                    Subtag::Script if i == 0 => b.to_ascii_uppercase(),
                    Subtag::Script => b.to_ascii_lowercase(),
                    Subtag::Region => b.to_ascii_uppercase(),
                };
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "the total length is checked against `MAX_LEN` above"
            )]
            {
                out.len = (pos + subtag.len()) as u8;
            }
            if subtag_index == 0 {
                out.language_len = out.len;
            }
        }
        Ok(out)
    }
}

#[derive(Clone, Copy, Debug)]
enum Subtag {
    Language,
    Script,
    Region,
}

/// An error produced when parsing a [`Language`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseLanguageError {
    /// The tag was empty.
    Empty,
    /// The tag is longer than [`Language::MAX_LEN`].
    TooLong,
    /// A subtag is malformed or appears in an unsupported position.
    InvalidSubtag,
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("language tag is empty"),
            Self::TooLong => write!(f, "language tag exceeds {} bytes", Language::MAX_LEN),
            Self::InvalidSubtag => f.write_str("language tag has a malformed subtag"),
        }
    }
}

impl core::error::Error for ParseLanguageError {}

#[cfg(test)]
mod tests {
    use super::{Language, ParseLanguageError};

    #[test]
    fn parse_normalizes_case() {
        let lang = Language::parse("ZH_hant_tw").unwrap();
        assert_eq!(lang.as_str(), "zh-Hant-TW");
        assert_eq!(lang.language(), "zh");
    }

    #[test]
    fn parse_longest_tag() {
        let lang = Language::parse("yue_latn_419").unwrap();
        assert_eq!(lang.as_str(), "yue-Latn-419");
        assert_eq!(lang.as_str().len(), Language::MAX_LEN);
        assert_eq!(lang.language(), "yue");
    }

    #[test]
    fn parse_region_only() {
        let lang = Language::parse("en-us").unwrap();
        assert_eq!(lang.as_str(), "en-US");
        let lang = Language::parse("es-419").unwrap();
        assert_eq!(lang.as_str(), "es-419");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Language::parse(""), Err(ParseLanguageError::Empty));
        assert_eq!(
            Language::parse("english-language"),
            Err(ParseLanguageError::TooLong)
        );
        assert_eq!(
            Language::parse("e"),
            Err(ParseLanguageError::InvalidSubtag)
        );
        assert_eq!(
            Language::parse("en--US"),
            Err(ParseLanguageError::InvalidSubtag)
        );
    }

    #[test]
    fn rtl_languages() {
        assert!(Language::parse("he").unwrap().is_rtl());
        assert!(Language::parse("ar-EG").unwrap().is_rtl());
        assert!(!Language::parse("en").unwrap().is_rtl());
        assert!(!Language::UND.is_rtl());
    }

    #[test]
    fn und_has_no_icu_locale() {
        assert!(Language::UND.to_icu().is_none());
        assert!(Language::parse("ja").unwrap().to_icu().is_some());
    }
}
