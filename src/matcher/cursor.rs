use std::hash::Hasher;
use std::sync::Arc;

use fnv::FnvHasher;
use log::{debug, trace};

use crate::lexicon::LexiconIndex;
use crate::normalize::NormalizedText;
use crate::types::MatchResult;

/// Counters for observing how queries were answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, uniffi::Record)]
pub struct MatcherStats {
    pub queries: u64,
    /// Queries answered from the active match without scanning.
    pub sticky_hits: u64,
    pub scans: u64,
    /// Exact dictionary lookups performed while scanning.
    pub lookups: u64,
}

/// The last match and the context it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMatch {
    pub result: MatchResult,
    /// `result`'s span in the normalized context.
    span: (usize, usize),
    context_fingerprint: u64,
}

impl ActiveMatch {
    fn still_valid(&self, context: &NormalizedText<'_>, fingerprint: u64, cursor: usize) -> bool {
        let (start, end) = self.span;
        self.context_fingerprint == fingerprint
            && end <= context.char_count()
            && start < cursor
            && cursor <= end
            && context.slice(start, end) == self.result.word
    }
}

pub(crate) fn fingerprint(text: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(text.as_bytes());
    hasher.finish()
}

/// Finds the dictionary word under a cursor, remembering the last hit so
/// that moving within the same word returns the same result.
///
/// One matcher serves one call site. The index behind it can be shared by
/// any number of matchers.
#[derive(Debug)]
pub struct CursorMatcher {
    index: Arc<LexiconIndex>,
    active: Option<ActiveMatch>,
    stats: MatcherStats,
}

impl CursorMatcher {
    pub fn new(index: Arc<LexiconIndex>) -> Self {
        Self {
            index,
            active: None,
            stats: MatcherStats::default(),
        }
    }

    pub fn index(&self) -> &Arc<LexiconIndex> {
        &self.index
    }

    pub fn active(&self) -> Option<&ActiveMatch> {
        self.active.as_ref()
    }

    pub fn stats(&self) -> MatcherStats {
        self.stats
    }

    /// Forget the active match, e.g. when the pointer leaves the document.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Longest dictionary word at `cursor` (a codepoint offset into
    /// `context`, clamped to its length).
    ///
    /// Among candidates covering the cursor, the earliest start wins and,
    /// at equal starts, the longer word. A word ending exactly at the
    /// cursor does not cover it, except when the cursor sits at the very
    /// end of `context`, where it refers to the last character.
    ///
    /// Matching runs on the NFC form of `context`; the returned `start` and
    /// `end` are offsets into `context` as given.
    pub fn query(&mut self, context: &str, cursor: usize) -> Option<MatchResult> {
        self.stats.queries += 1;

        let context_fingerprint = fingerprint(context);
        let text = NormalizedText::new(context);
        if cursor > text.raw_char_count() {
            trace!("cursor {} clamped to context length {}", cursor, text.raw_char_count());
        }
        let cursor = text.to_normalized(cursor);

        if let Some(active) = &self.active {
            if active.still_valid(&text, context_fingerprint, cursor) {
                self.stats.sticky_hits += 1;
                return Some(active.result.clone());
            }
        }

        let Some((start, end)) = self.scan(&text, cursor) else {
            self.active = None;
            return None;
        };
        let word = text.slice(start, end);
        let entry = self.index.entry(word)?.clone();
        let (raw_start, raw_end) = text.to_raw_span(start, end);
        debug!("matched {:?} at {}..{} for cursor {}", word, raw_start, raw_end, cursor);

        let result = MatchResult {
            word: word.to_string(),
            entry,
            start: raw_start,
            end: raw_end,
        };
        self.active = Some(ActiveMatch {
            result: result.clone(),
            span: (start, end),
            context_fingerprint,
        });
        Some(result)
    }

    /// Normalized span of the best candidate for `cursor`.
    fn scan(&mut self, text: &NormalizedText<'_>, cursor: usize) -> Option<(usize, usize)> {
        self.stats.scans += 1;

        let char_count = text.char_count();
        let max_word_length = self.index.max_word_length();
        if max_word_length == 0 || char_count == 0 {
            return None;
        }

        let context = text.as_str();
        let boundaries = text.boundaries();
        let cursor = if cursor == char_count { cursor - 1 } else { cursor };
        let lowest_start = cursor.saturating_sub(max_word_length - 1);

        let mut best: Option<(usize, usize)> = None;
        for start in (lowest_start..=cursor).rev() {
            let first = context[boundaries[start]..].chars().next();
            let Some(bucket) = first.and_then(|c| self.index.bucket_for(c)) else {
                continue;
            };

            let longest = bucket.max_word_length().min(char_count - start);
            for len in (1..=longest).rev() {
                let end = start + len;
                if end <= cursor {
                    break;
                }
                self.stats.lookups += 1;
                if self.index.entry(text.slice(start, end)).is_none() {
                    continue;
                }

                let better = match best {
                    None => true,
                    Some((best_start, best_end)) => {
                        start < best_start || (start == best_start && end - start > best_end - best_start)
                    }
                };
                if better {
                    best = Some((start, end));
                }
                // Shorter words at this start cannot win.
                break;
            }
        }
        best
    }
}
