use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use fnv::FnvHashMap;
use fst::Set;
use log::{error, info, warn};
use rayon::prelude::*;

use crate::error::{LookupError, Result};
use crate::lexicon::bucket::{Bucket, BucketBuilder};
use crate::lexicon::prefix::{build_prefix_set, prefix_page};
use crate::normalize::{char_len, nfc};
use crate::source::{LexiconMeta, RawLexicon};
use crate::types::{DictionaryEntry, PrefixSearchCursor, PrefixSearchPage};

/// Build-time knobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Headwords longer than this many codepoints are dropped. Bounds the
    /// per-query cost, which grows with the square of the longest word.
    pub max_headword_chars: Option<usize>,
}

/// What happened to the raw entries during a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub indexed: usize,
    pub malformed: usize,
    pub empty_keys: usize,
    pub too_long: usize,
    /// Distinct raw keys that normalized onto an already indexed headword.
    pub collisions: usize,
}

/// Read-only dictionary index: exact lookup, first-character buckets and the
/// longest headword length.
pub struct LexiconIndex {
    entries: HashMap<String, Arc<DictionaryEntry>>,
    buckets: FnvHashMap<char, Bucket>,
    max_word_length: usize,
    prefix_set: Option<Set<Vec<u8>>>,
    meta: Option<LexiconMeta>,
    report: BuildReport,
}

impl std::fmt::Debug for LexiconIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconIndex")
            .field("entries", &self.entries.len())
            .field("buckets", &self.buckets.len())
            .field("max_word_length", &self.max_word_length)
            .field("report", &self.report)
            .finish()
    }
}

impl Default for LexiconIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl LexiconIndex {
    /// An index with no words; every query against it finds nothing.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            buckets: FnvHashMap::default(),
            max_word_length: 0,
            prefix_set: None,
            meta: None,
            report: BuildReport::default(),
        }
    }

    pub fn build(raw: RawLexicon) -> Self {
        Self::build_with_options(raw, &IndexOptions::default())
    }

    /// Normalize every key to NFC and index it.
    ///
    /// Empty keys and over-long keys are dropped. When several raw keys
    /// normalize to the same headword, the one appearing last in `raw`
    /// wins.
    pub fn build_with_options(raw: RawLexicon, options: &IndexOptions) -> Self {
        let RawLexicon {
            meta,
            entries: raw_entries,
            skipped,
        } = raw;

        let normalized: Vec<_> = raw_entries
            .into_par_iter()
            .map(|(word, entry)| (nfc(&word).into_owned(), entry))
            .collect();

        let mut report = BuildReport {
            malformed: skipped,
            ..Default::default()
        };
        let mut entries = HashMap::with_capacity(normalized.len());
        let mut bucket_builders: FnvHashMap<char, BucketBuilder> = FnvHashMap::default();
        let mut max_word_length = 0usize;

        for (headword, raw_entry) in normalized {
            let Some(first) = headword.chars().next() else {
                warn!("skipping entry with empty headword");
                report.empty_keys += 1;
                continue;
            };

            let word_len = char_len(&headword);
            if options.max_headword_chars.is_some_and(|limit| word_len > limit) {
                warn!(
                    "skipping {:?}: {} codepoints exceeds the configured limit",
                    headword, word_len
                );
                report.too_long += 1;
                continue;
            }

            let entry = Arc::new(raw_entry.into_entry(headword.clone()));
            if entries.insert(headword.clone(), entry).is_some() {
                warn!("{:?} normalizes onto an existing headword; keeping the later entry", headword);
                report.collisions += 1;
                continue;
            }

            bucket_builders
                .entry(first)
                .or_default()
                .push(headword, word_len);
            max_word_length = max_word_length.max(word_len);
        }

        let buckets: FnvHashMap<char, Bucket> = bucket_builders
            .into_iter()
            .map(|(first, builder)| (first, builder.finish()))
            .collect();

        let prefix_set = match build_prefix_set(entries.keys().map(String::as_str)) {
            Ok(set) => Some(set),
            Err(e) => {
                error!("prefix search unavailable: {}", e);
                None
            }
        };

        report.indexed = entries.len();
        info!(
            "lexicon built: {} words in {} buckets, longest {} codepoints ({} malformed, {} empty, {} too long, {} collisions)",
            report.indexed,
            buckets.len(),
            max_word_length,
            report.malformed,
            report.empty_keys,
            report.too_long,
            report.collisions
        );

        Self {
            entries,
            buckets,
            max_word_length,
            prefix_set,
            meta,
            report,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::build(RawLexicon::from_json_str(json)?))
    }

    /// Read and index the dictionary resource at `path`.
    pub fn load(path: impl AsRef<Path>, options: &IndexOptions) -> Result<Self> {
        let raw = RawLexicon::from_path(path)?;
        Ok(Self::build_with_options(raw, options))
    }

    /// Like [`LexiconIndex::load`], but an unreadable or unparsable resource
    /// yields the empty index.
    pub fn load_or_empty(path: impl AsRef<Path>, options: &IndexOptions) -> Self {
        match Self::load(path.as_ref(), options) {
            Ok(index) => index,
            Err(e) => {
                warn!(
                    "failed to load dictionary {}: {}; continuing with an empty lexicon",
                    path.as_ref().display(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// Exact lookup of an already normalized headword.
    pub fn entry(&self, headword: &str) -> Option<&Arc<DictionaryEntry>> {
        self.entries.get(headword)
    }

    /// Exact lookup after normalizing `word`.
    pub fn lookup(&self, word: &str) -> Option<&Arc<DictionaryEntry>> {
        self.entries.get(nfc(word).as_ref())
    }

    pub fn bucket_for(&self, first: char) -> Option<&Bucket> {
        self.buckets.get(&first)
    }

    /// Codepoint length of the longest headword; 0 for an empty index.
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn meta(&self) -> Option<&LexiconMeta> {
        self.meta.as_ref()
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }

    pub fn headwords(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Page through headwords starting with `prefix` in byte order.
    pub fn words_with_prefix(
        &self,
        prefix: &str,
        cursor: Option<&PrefixSearchCursor>,
        page_size: usize,
    ) -> Result<PrefixSearchPage> {
        let prefix = nfc(prefix);
        match &self.prefix_set {
            Some(set) => prefix_page(set, &prefix, cursor, page_size),
            None if self.entries.is_empty() => {
                if page_size == 0 {
                    return Err(LookupError::InvalidArgument(
                        "page_size must be greater than 0".to_string(),
                    ));
                }
                Ok(PrefixSearchPage {
                    words: Vec::new(),
                    next_cursor: None,
                })
            }
            None => Err(LookupError::NotLoaded(
                "prefix index was not built".to_string(),
            )),
        }
    }
}
