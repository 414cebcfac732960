use fst::{IntoStreamer, Set, Streamer};

use crate::error::{LookupError, Result};
use crate::types::{PrefixSearchCursor, PrefixSearchPage};

/// Build an fst set over all headwords. Keys need not be sorted on input.
pub(crate) fn build_prefix_set<'a, I>(words: I) -> Result<Set<Vec<u8>>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sorted: Vec<&str> = words.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();
    Ok(Set::from_iter(sorted)?)
}

/// Smallest byte string greater than every string starting with `prefix`.
/// `None` means the range is unbounded above.
pub(crate) fn upper_bound_from_prefix(prefix: &str) -> Option<Vec<u8>> {
    let mut bytes = prefix.as_bytes().to_vec();
    while let Some(last) = bytes.pop() {
        if last < u8::MAX {
            bytes.push(last + 1);
            return Some(bytes);
        }
    }
    None
}

/// One page of words starting with `prefix`, resuming after `cursor`.
pub(crate) fn prefix_page(
    set: &Set<Vec<u8>>,
    prefix: &str,
    cursor: Option<&PrefixSearchCursor>,
    page_size: usize,
) -> Result<PrefixSearchPage> {
    if page_size == 0 {
        return Err(LookupError::InvalidArgument(
            "page_size must be greater than 0".to_string(),
        ));
    }

    let mut builder = set.range();
    builder = match cursor {
        Some(cursor) if cursor.after_word.as_str() >= prefix => builder.gt(&cursor.after_word),
        _ => builder.ge(prefix),
    };
    if let Some(upper_bound) = upper_bound_from_prefix(prefix) {
        builder = builder.lt(upper_bound);
    }

    let mut stream = builder.into_stream();
    let mut words = Vec::with_capacity(page_size + 1);
    while words.len() < page_size + 1 {
        let Some(raw) = stream.next() else {
            break;
        };
        words.push(String::from_utf8_lossy(raw).into_owned());
    }

    let has_more = words.len() > page_size;
    if has_more {
        words.truncate(page_size);
    }

    let next_cursor = if has_more {
        words.last().map(|word| PrefixSearchCursor {
            after_word: word.clone(),
        })
    } else {
        None
    };

    Ok(PrefixSearchPage { words, next_cursor })
}
