//! Unicode helpers shared by the index builder and the matcher.
//!
//! Headwords and query contexts must go through the same normalization,
//! otherwise lookups never hit. Offsets throughout the crate count
//! codepoints, not UTF-8 bytes, so characters outside the BMP count once.

use std::borrow::Cow;

use icu::normalizer::ComposingNormalizerBorrowed;
use icu::properties::props::CanonicalCombiningClass;
use icu::properties::{CodePointMapData, CodePointMapDataBorrowed};

const NFC: ComposingNormalizerBorrowed<'static> = ComposingNormalizerBorrowed::new_nfc();
const CCC: CodePointMapDataBorrowed<'static, CanonicalCombiningClass> =
    CodePointMapData::<CanonicalCombiningClass>::new();

/// NFC-normalize `text`. Borrows when the input is already normalized.
pub fn nfc(text: &str) -> Cow<'_, str> {
    NFC.normalize(text)
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of every codepoint in `text`, followed by `text.len()`.
///
/// `offsets[i]..offsets[j]` is the byte range of codepoints `i..j`.
pub fn char_boundaries(text: &str) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(text.len() + 1);
    offsets.extend(text.char_indices().map(|(idx, _)| idx));
    offsets.push(text.len());
    offsets
}

/// NFC form of a caller's text that can translate codepoint offsets between
/// the two.
#[derive(Debug)]
pub struct NormalizedText<'a> {
    text: Cow<'a, str>,
    boundaries: Vec<usize>,
    raw_len: usize,
    /// `None` when normalization changed nothing and offsets coincide.
    offsets: Option<OffsetMap>,
}

/// Offset tables over segments of the source that normalize independently.
#[derive(Debug)]
struct OffsetMap {
    /// Source offset -> normalized start of the segment holding it.
    to_normalized: Vec<usize>,
    /// Normalized offset -> source start of the segment holding it.
    raw_start: Vec<usize>,
    /// Normalized offset -> source end of the segment ending at or spanning it.
    raw_end: Vec<usize>,
}

impl<'a> NormalizedText<'a> {
    pub fn new(raw: &'a str) -> Self {
        let raw_len = char_len(raw);
        match nfc(raw) {
            Cow::Borrowed(text) => Self {
                boundaries: char_boundaries(text),
                text: Cow::Borrowed(text),
                raw_len,
                offsets: None,
            },
            Cow::Owned(_) => {
                let (text, offsets) = OffsetMap::build(raw);
                Self {
                    boundaries: char_boundaries(&text),
                    text: Cow::Owned(text),
                    raw_len,
                    offsets: Some(offsets),
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte offsets of the normalized codepoints, see [`char_boundaries`].
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    pub fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn raw_char_count(&self) -> usize {
        self.raw_len
    }

    /// Normalized codepoints `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }

    /// Normalized position of source offset `offset` (clamped). An offset
    /// inside a composed sequence maps to the composed character.
    pub fn to_normalized(&self, offset: usize) -> usize {
        let offset = offset.min(self.raw_len);
        match &self.offsets {
            Some(map) => map.to_normalized[offset],
            None => offset,
        }
    }

    /// Source span covering normalized codepoints `start..end`.
    pub fn to_raw_span(&self, start: usize, end: usize) -> (usize, usize) {
        match &self.offsets {
            Some(map) => (map.raw_start[start], map.raw_end[end]),
            None => (start, end),
        }
    }
}

impl OffsetMap {
    /// Splits `raw` before every starter that neither composes with nor
    /// reorders against what precedes it, and normalizes each segment.
    fn build(raw: &str) -> (String, Self) {
        let mut normalized = String::with_capacity(raw.len());
        let mut to_normalized = Vec::with_capacity(raw.len() + 1);
        let mut raw_start = Vec::with_capacity(raw.len() + 1);
        let mut raw_end = vec![0];

        let mut push_segment = |segment: &str, seg_raw_start: usize, seg_raw_len: usize| {
            let piece = nfc(segment);
            let piece_len = char_len(&piece);
            to_normalized.extend(std::iter::repeat(char_len(&normalized)).take(seg_raw_len));
            raw_start.extend(std::iter::repeat(seg_raw_start).take(piece_len));
            raw_end.extend(std::iter::repeat(seg_raw_start + seg_raw_len).take(piece_len));
            normalized.push_str(&piece);
        };

        let mut seg_byte = 0;
        let mut seg_char = 0;
        for (idx, (byte, c)) in raw.char_indices().enumerate() {
            if idx == seg_char || CCC.get(c) != CanonicalCombiningClass::NotReordered {
                continue;
            }
            let segment = &raw[seg_byte..byte];
            let extended = &raw[seg_byte..byte + c.len_utf8()];
            let mut separate = nfc(segment).into_owned();
            separate.push_str(&nfc(&extended[segment.len()..]));
            if nfc(extended) == separate {
                push_segment(segment, seg_char, idx - seg_char);
                seg_byte = byte;
                seg_char = idx;
            }
        }
        let total = char_len(raw);
        if seg_char < total {
            push_segment(&raw[seg_byte..], seg_char, total - seg_char);
        }

        let normalized_len = char_len(&normalized);
        to_normalized.push(normalized_len);
        raw_start.push(total);

        (
            normalized,
            Self {
                to_normalized,
                raw_start,
                raw_end,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfc_composes_decomposed_input() {
        let decomposed = "e\u{0301}";
        assert_eq!(nfc(decomposed), "\u{00e9}");
    }

    #[test]
    fn nfc_keeps_thai_unchanged() {
        for text in ["กินข้าว", "เย็น", "แม่"] {
            assert_eq!(nfc(text), text);
        }
    }

    #[test]
    fn char_len_counts_astral_once() {
        assert_eq!(char_len("a😀b"), 3);
        assert_eq!(char_len("กิน"), 3);
    }

    #[test]
    fn boundaries_index_codepoints() {
        let text = "aกข😀";
        let offsets = char_boundaries(text);
        assert_eq!(offsets.len(), 5);
        assert_eq!(&text[offsets[1]..offsets[3]], "กข");
        assert_eq!(&text[offsets[3]..offsets[4]], "😀");
        assert_eq!(offsets[4], text.len());
    }

    #[test]
    fn normalized_text_maps_offsets_back_to_source() {
        let raw = "e\u{0301}e\u{0301}กิน";
        let text = NormalizedText::new(raw);
        assert_eq!(text.as_str(), "\u{00e9}\u{00e9}กิน");
        assert_eq!((text.raw_char_count(), text.char_count()), (7, 5));

        assert_eq!(text.to_normalized(0), 0);
        assert_eq!(text.to_normalized(1), 0);
        assert_eq!(text.to_normalized(2), 1);
        assert_eq!(text.to_normalized(5), 3);
        assert_eq!(text.to_normalized(7), 5);
        assert_eq!(text.to_normalized(99), 5);

        assert_eq!(text.slice(2, 5), "กิน");
        assert_eq!(text.to_raw_span(2, 5), (4, 7));
        assert_eq!(text.to_raw_span(0, 1), (0, 2));
    }

    #[test]
    fn reordered_marks_stay_in_one_segment() {
        // Dot below sorts before the acute accent, across the `x`.
        let raw = "ax\u{0301}\u{0323}b";
        let text = NormalizedText::new(raw);
        assert_eq!(text.as_str(), nfc(raw));
        assert_eq!(text.to_raw_span(1, 4), (1, 4));
        assert_eq!(text.to_normalized(4), 4);
    }

    #[test]
    fn normalized_input_keeps_offsets() {
        let text = NormalizedText::new("ฉันกินข้าว");
        assert_eq!(text.to_normalized(4), 4);
        assert_eq!(text.to_raw_span(3, 6), (3, 6));
        assert_eq!(text.slice(3, 6), "กิน");
    }
}
