//! UniFFI-exported entry point for hosts that map pointer positions to text.
//!
//! A session owns one matcher and therefore one sticky match; open one per
//! document or view. Offsets crossing the boundary are codepoints.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::LookupError;
use crate::lexicon::{IndexOptions, LexiconIndex};
use crate::matcher::{fingerprint, CursorMatcher, MatcherStats};
use crate::source::LexiconMeta;
use crate::types::{DictionaryEntry, HoverMatch, PrefixSearchCursor, PrefixSearchPage};
use crate::window::{ContextWindow, ScriptFilter, WindowOptions};

/// Last hover in the caller's full-text coordinates. Windows move with the
/// pointer, so stickiness is also checked here, before slicing.
struct LastHover {
    text_fingerprint: u64,
    start: usize,
    end: usize,
    hover: HoverMatch,
}

struct SessionState {
    matcher: CursorMatcher,
    last: Option<LastHover>,
}

impl SessionState {
    fn clear(&mut self) {
        self.matcher.reset();
        self.last = None;
    }
}

#[derive(uniffi::Object)]
pub struct LookupSession {
    index: Arc<LexiconIndex>,
    state: Mutex<SessionState>,
    window: WindowOptions,
    filter: ScriptFilter,
}

impl LookupSession {
    pub fn new(index: LexiconIndex) -> Self {
        Self::with_options(Arc::new(index), WindowOptions::default(), ScriptFilter::default())
    }

    pub fn with_options(index: Arc<LexiconIndex>, window: WindowOptions, filter: ScriptFilter) -> Self {
        // A window narrower than the longest word would truncate matches.
        let window = WindowOptions {
            radius: window.radius.max(index.max_word_length()),
        };
        Self {
            state: Mutex::new(SessionState {
                matcher: CursorMatcher::new(index.clone()),
                last: None,
            }),
            index,
            window,
            filter,
        }
    }

    pub fn index(&self) -> &Arc<LexiconIndex> {
        &self.index
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dictionary word under `offset` in `text`, with offsets into `text`.
    pub fn hover_at(&self, text: &str, offset: usize) -> Option<HoverMatch> {
        let mut state = self.state();
        let text_fingerprint = fingerprint(text);

        if let Some(last) = &state.last {
            if last.text_fingerprint == text_fingerprint && last.start < offset && offset <= last.end {
                return Some(last.hover.clone());
            }
        }

        let window = ContextWindow::around(text, offset, &self.window);
        if !self.filter.matches(&window.context) {
            state.clear();
            return None;
        }

        let Some(found) = state.matcher.query(&window.context, window.relative_offset) else {
            state.last = None;
            return None;
        };

        let (start, end) = window.to_absolute(&found);
        let hover = HoverMatch {
            word: found.word,
            entry: DictionaryEntry::clone(&found.entry),
            start: start as u64,
            end: end as u64,
        };
        state.last = Some(LastHover {
            text_fingerprint,
            start,
            end,
            hover: hover.clone(),
        });
        Some(hover)
    }
}

#[uniffi::export]
pub fn open_lookup_session(path: String) -> LookupSession {
    LookupSession::new(LexiconIndex::load_or_empty(Path::new(&path), &IndexOptions::default()))
}

#[uniffi::export]
pub fn lookup_session_from_json(json: String) -> Result<LookupSession, LookupError> {
    Ok(LookupSession::new(LexiconIndex::from_json_str(&json)?))
}

#[uniffi::export]
impl LookupSession {
    pub fn hover(&self, text: String, offset: u64) -> Option<HoverMatch> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        self.hover_at(&text, offset)
    }

    pub fn lookup(&self, word: String) -> Option<DictionaryEntry> {
        self.index.lookup(&word).map(|entry| DictionaryEntry::clone(entry))
    }

    pub fn prefix_page(
        &self,
        prefix: String,
        cursor: Option<PrefixSearchCursor>,
        page_size: u64,
    ) -> Result<PrefixSearchPage, LookupError> {
        let page_size = usize::try_from(page_size)
            .map_err(|_| LookupError::InvalidArgument("page_size overflow".to_string()))?;
        self.index.words_with_prefix(&prefix, cursor.as_ref(), page_size)
    }

    /// Forget the current match, e.g. when the pointer leaves the document.
    pub fn reset(&self) {
        self.state().clear();
    }

    pub fn stats(&self) -> MatcherStats {
        self.state().matcher.stats()
    }

    pub fn max_word_length(&self) -> u64 {
        self.index.max_word_length() as u64
    }

    pub fn word_count(&self) -> u64 {
        self.index.len() as u64
    }

    pub fn meta(&self) -> Option<LexiconMeta> {
        self.index.meta().cloned()
    }
}
