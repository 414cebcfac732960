use serde::Deserialize;

use crate::types::{DictionaryEntry, Romanization};

/// One entry as it appears in the dictionary resource, before its key is
/// normalized. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub romanization: Option<String>,
    pub romanization_paiboon: Option<String>,
    pub romanization_royal: Option<String>,
    pub tone: Option<String>,
    pub pos: Vec<String>,
    pub senses: Vec<String>,
    pub definitions: Vec<String>,
    pub components: Vec<String>,
    pub derived: Vec<String>,
    pub idioms: Vec<String>,
    pub compounds: Vec<String>,
    pub priority: Option<u32>,
}

/// `_meta` block of the versioned resource layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct LexiconMeta {
    pub version: Option<u32>,
    pub source: Option<String>,
    pub description: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl RawEntry {
    /// Attach the normalized `headword` and fold the resource's field
    /// variants into a `DictionaryEntry`.
    pub fn into_entry(self, headword: String) -> DictionaryEntry {
        // `senses` (v2) supersedes `definitions` (v1) unless it is empty.
        let senses = if self.senses.is_empty() {
            self.definitions
        } else {
            self.senses
        };

        DictionaryEntry {
            headword,
            romanization: Romanization {
                paiboon: non_empty(self.romanization_paiboon).or(non_empty(self.romanization)),
                royal: non_empty(self.romanization_royal),
            },
            tone: non_empty(self.tone),
            parts_of_speech: self.pos,
            senses,
            components: self.components,
            derived: self.derived,
            idioms: self.idioms,
            compounds: self.compounds,
            priority: self.priority,
        }
    }
}
