//! Versioned texts: several modifier-selected variants packed into one string
//!
//! A versioned text is stored as
//!
//! ```text
//! S1 base S1 label1 S2 text1 S1 label2 S2 text2 ...
//! ```
//!
//! where `S1` and `S2` are the noncharacters U+FFFF and U+FFFE. A text without
//! variants is stored as the plain base text. The sentinels must never appear
//! in author-supplied text; decoding only validates the basic segment shape.
//!
//! # Example
//!
//! ```
//! use versioned_i18n::version::{VersionedText, decode_variant};
//!
//! let text: String = VersionedText::new("%d items")
//!     .one("one item")
//!     .many("many items")
//!     .into();
//!
//! assert_eq!(decode_variant(&text, "1").unwrap(), "one item");
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::error::{I18nError, I18nResult};

/// Separates the base text and each variant
pub const VARIANT_SEPARATOR: char = '\u{FFFF}';
/// Separates a variant label from its text
pub const LABEL_SEPARATOR: char = '\u{FFFE}';

pub const ZERO: &str = "0";
pub const ONE: &str = "1";
pub const TWO: &str = "2";
pub const THREE: &str = "3";
pub const FOUR: &str = "4";
pub const FIVE: &str = "5";
pub const SIX: &str = "6";
pub const TEN: &str = "T";
pub const TWO_THREE_FOUR: &str = "C";
pub const MANY: &str = "M";

/// Decoded variants of a text, keyed by label. The base text is stored under `None`.
pub type DecodedVersions = IndexMap<Option<String>, String>;

pub fn is_versioned(text: &str) -> bool {
    text.starts_with(VARIANT_SEPARATOR)
}

/// Decode every variant of a text.
///
/// A text that is not versioned decodes to a single base entry.
///
/// # Errors
/// `MalformedVersionSegment` if a variant segment does not split into exactly
/// one non-empty label and one non-empty text.
pub fn decode_all(text: &str) -> I18nResult<DecodedVersions> {
    let mut versions = DecodedVersions::new();

    if !is_versioned(text) {
        versions.insert(None, text.to_string());
        return Ok(versions);
    }

    // Leading separator leaves an empty first split
    let mut segments = text.split(VARIANT_SEPARATOR).skip(1);
    if let Some(base) = segments.next() {
        versions.insert(None, base.to_string());
    }

    for segment in segments {
        let (label, variant) = split_segment(segment)?;
        versions.insert(Some(label.to_string()), variant.to_string());
    }

    Ok(versions)
}

/// The text of the variant with exactly this label.
///
/// # Errors
/// - `NoMatchingVariant` if the text is not versioned or has no such label
/// - `MalformedVersionSegment` if a segment before the match is malformed
pub fn decode_variant(text: &str, label: &str) -> I18nResult<String> {
    if is_versioned(text) {
        for segment in text.split(VARIANT_SEPARATOR).skip(2) {
            let (segment_label, variant) = split_segment(segment)?;
            if segment_label == label {
                return Ok(variant.to_string());
            }
        }
    }

    Err(I18nError::NoMatchingVariant {
        modifier: label.to_string(),
        text: text.to_string(),
    })
}

/// The unversioned base of a text. Plain texts are returned unchanged.
pub fn base_text(text: &str) -> &str {
    if is_versioned(text) {
        text.split(VARIANT_SEPARATOR).nth(1).unwrap_or_default()
    } else {
        text
    }
}

fn split_segment(segment: &str) -> I18nResult<(&str, &str)> {
    let mut parts = segment.split(LABEL_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(label), Some(text), None) if !label.is_empty() && !text.is_empty() => {
            Ok((label, text))
        }
        _ => Err(I18nError::MalformedVersionSegment {
            segment: segment.to_string(),
        }),
    }
}

/// Builder for a versioned text
///
/// Variants are kept in the order they were added. Adding the same label twice
/// keeps both in the encoded string; decoding keeps the last one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionedText {
    base: String,
    variants: Vec<(String, String)>,
}

impl VersionedText {
    pub fn new(base: impl Into<String>) -> Self {
        VersionedText {
            base: base.into(),
            variants: Vec::new(),
        }
    }

    /// Parse an encoded string back into its base and variants
    pub fn decode(text: &str) -> I18nResult<Self> {
        let mut base = String::new();
        let mut variants = Vec::new();
        for (label, variant) in decode_all(text)? {
            match label {
                Some(label) => variants.push((label, variant)),
                None => base = variant,
            }
        }
        Ok(VersionedText { base, variants })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn variants(&self) -> &[(String, String)] {
        &self.variants
    }

    /// Add a variant under an arbitrary label
    pub fn modifier(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.variants.push((label.into(), text.into()));
        self
    }

    pub fn zero(self, text: impl Into<String>) -> Self {
        self.modifier(ZERO, text)
    }

    pub fn one(self, text: impl Into<String>) -> Self {
        self.modifier(ONE, text)
    }

    pub fn two(self, text: impl Into<String>) -> Self {
        self.modifier(TWO, text)
    }

    pub fn three(self, text: impl Into<String>) -> Self {
        self.modifier(THREE, text)
    }

    pub fn four(self, text: impl Into<String>) -> Self {
        self.modifier(FOUR, text)
    }

    pub fn five(self, text: impl Into<String>) -> Self {
        self.modifier(FIVE, text)
    }

    pub fn six(self, text: impl Into<String>) -> Self {
        self.modifier(SIX, text)
    }

    pub fn ten(self, text: impl Into<String>) -> Self {
        self.modifier(TEN, text)
    }

    /// Variant for an exact count, e.g. `times(12, "a dozen")`
    pub fn times(self, count: i64, text: impl Into<String>) -> Self {
        self.modifier(count.to_string(), text)
    }

    /// Variant shared by 2, 3 and 4
    pub fn two_three_four(self, text: impl Into<String>) -> Self {
        self.modifier(TWO_THREE_FOUR, text)
    }

    /// Catch-all variant for counts without a more specific one
    pub fn many(self, text: impl Into<String>) -> Self {
        self.modifier(MANY, text)
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VersionedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variants.is_empty() {
            return write!(f, "{}", self.base);
        }
        write!(f, "{}{}", VARIANT_SEPARATOR, self.base)?;
        for (label, text) in &self.variants {
            write!(f, "{}{}{}{}", VARIANT_SEPARATOR, label, LABEL_SEPARATOR, text)?;
        }
        Ok(())
    }
}

impl From<VersionedText> for String {
    fn from(text: VersionedText) -> Self {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(parts: &[&str]) -> String {
        let mut text = String::new();
        for part in parts {
            text.push(VARIANT_SEPARATOR);
            text.push_str(part);
        }
        text
    }

    #[test]
    fn test_plain_text_is_not_versioned() {
        let text = VersionedText::new("Hello").encode();
        assert_eq!(text, "Hello");
        assert!(!is_versioned(&text));
    }

    #[test]
    fn test_encoding_layout() {
        let text = VersionedText::new("base").one("single").many("lots").encode();
        assert_eq!(
            text,
            "\u{FFFF}base\u{FFFF}1\u{FFFE}single\u{FFFF}M\u{FFFE}lots"
        );
        assert!(is_versioned(&text));
    }

    #[test]
    fn test_decode_all_round_trip() {
        let text: String = VersionedText::new("You have %d apples")
            .zero("You have no apples")
            .one("You have one apple")
            .two_three_four("You have a few apples")
            .modifier("green", "You have green apples")
            .into();

        let versions = decode_all(&text).unwrap();
        assert_eq!(versions.len(), 5);
        assert_eq!(versions[&None], "You have %d apples");
        assert_eq!(versions[&Some("0".to_string())], "You have no apples");
        assert_eq!(versions[&Some("1".to_string())], "You have one apple");
        assert_eq!(versions[&Some("C".to_string())], "You have a few apples");
        assert_eq!(versions[&Some("green".to_string())], "You have green apples");

        let rebuilt = VersionedText::decode(&text).unwrap();
        assert_eq!(rebuilt.encode(), text);
    }

    #[test]
    fn test_decode_all_plain_text() {
        let versions = decode_all("Hello").unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[&None], "Hello");
    }

    #[test]
    fn test_decode_all_malformed_segments() {
        let missing_text = encoded(&["base", "1\u{FFFE}"]);
        assert!(matches!(
            decode_all(&missing_text),
            Err(I18nError::MalformedVersionSegment { .. })
        ));

        let missing_label = encoded(&["base", "\u{FFFE}text"]);
        assert!(decode_all(&missing_label).is_err());

        let no_label_separator = encoded(&["base", "just text"]);
        assert!(decode_all(&no_label_separator).is_err());

        let too_many_parts = encoded(&["base", "1\u{FFFE}a\u{FFFE}b"]);
        assert!(decode_all(&too_many_parts).is_err());
    }

    #[test]
    fn test_decode_variant() {
        let text = VersionedText::new("base").times(12, "a dozen").encode();
        assert_eq!(decode_variant(&text, "12").unwrap(), "a dozen");

        let err = decode_variant(&text, "13").unwrap_err();
        assert_eq!(
            err,
            I18nError::NoMatchingVariant {
                modifier: "13".to_string(),
                text: text.clone(),
            }
        );

        // Plain text never has variants
        assert!(matches!(
            decode_variant("plain", "1"),
            Err(I18nError::NoMatchingVariant { .. })
        ));
    }

    #[test]
    fn test_base_text() {
        let text = VersionedText::new("%d cats").one("one cat").encode();
        assert_eq!(base_text(&text), "%d cats");
        assert_eq!(base_text("dog"), "dog");
    }

    #[test]
    fn test_all_helper_labels() {
        let text = VersionedText::new("b")
            .zero("0x")
            .one("1x")
            .two("2x")
            .three("3x")
            .four("4x")
            .five("5x")
            .six("6x")
            .ten("10x")
            .two_three_four("Cx")
            .many("Mx")
            .encode();

        let labels: Vec<String> = decode_all(&text)
            .unwrap()
            .keys()
            .flatten()
            .cloned()
            .collect();
        assert_eq!(labels, vec!["0", "1", "2", "3", "4", "5", "6", "T", "C", "M"]);
    }
}
