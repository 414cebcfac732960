use std::sync::Arc;

/// Transliterations of a headword. Either variant may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct Romanization {
    pub paiboon: Option<String>,
    pub royal: Option<String>,
}

impl Romanization {
    /// Preferred display form: Paiboon (carries tone marks), then Royal.
    pub fn preferred(&self) -> Option<&str> {
        self.paiboon.as_deref().or(self.royal.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.paiboon.is_none() && self.royal.is_none()
    }
}

/// One dictionary word. Immutable once the lexicon is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct DictionaryEntry {
    /// NFC-normalized key; unique within a lexicon.
    pub headword: String,
    pub romanization: Romanization,
    pub tone: Option<String>,
    /// Author order, duplicates kept.
    pub parts_of_speech: Vec<String>,
    /// Glosses in presentation order.
    pub senses: Vec<String>,
    pub components: Vec<String>,
    pub derived: Vec<String>,
    pub idioms: Vec<String>,
    pub compounds: Vec<String>,
    pub priority: Option<u32>,
}

/// A dictionary word found at a cursor position.
///
/// `start` and `end` are codepoint offsets into the context exactly as it
/// was passed to the query, with `start < end`. `word` is the normalized
/// headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub word: String,
    pub entry: Arc<DictionaryEntry>,
    pub start: usize,
    pub end: usize,
}

/// Match result with offsets translated into the caller's full text.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct HoverMatch {
    pub word: String,
    pub entry: DictionaryEntry,
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct PrefixSearchCursor {
    pub after_word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct PrefixSearchPage {
    pub words: Vec<String>,
    pub next_cursor: Option<PrefixSearchCursor>,
}
