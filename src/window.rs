//! Slicing a query context out of a larger text and mapping matches back.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LookupError, Result};
use crate::normalize::char_boundaries;
use crate::types::MatchResult;

/// The Unicode Thai block.
pub const THAI_CLASS: &str = r"[\x{0E00}-\x{0E7F}]";

pub const DEFAULT_RADIUS: usize = 50;

static THAI: LazyLock<Regex> = LazyLock::new(|| Regex::new(THAI_CLASS).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// Codepoints kept on each side of the offset. Must be at least the
    /// longest headword for matches not to be cut short.
    pub radius: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// A bounded slice of text around an offset of interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    pub context: String,
    /// Codepoint offset of `context` within the source text.
    pub start: usize,
    /// The requested offset, relative to `context`.
    pub relative_offset: usize,
}

impl ContextWindow {
    pub fn around(text: &str, offset: usize, options: &WindowOptions) -> Self {
        let boundaries = char_boundaries(text);
        let char_count = boundaries.len() - 1;
        let offset = offset.min(char_count);
        let start = offset.saturating_sub(options.radius);
        let end = offset.saturating_add(options.radius).min(char_count);

        Self {
            context: text[boundaries[start]..boundaries[end]].to_string(),
            start,
            relative_offset: offset - start,
        }
    }

    /// Match offsets in the source text's coordinates.
    pub fn to_absolute(&self, found: &MatchResult) -> (usize, usize) {
        (self.start + found.start, self.start + found.end)
    }
}

/// Cheap pre-check that a context contains any character of the script the
/// lexicon covers.
#[derive(Debug, Clone)]
pub struct ScriptFilter {
    pattern: Regex,
}

impl ScriptFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| LookupError::InvalidArgument(format!("invalid script pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    pub fn thai() -> Self {
        Self {
            pattern: THAI.clone(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for ScriptFilter {
    fn default() -> Self {
        Self::thai()
    }
}
