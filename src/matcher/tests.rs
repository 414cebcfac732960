use std::sync::Arc;

use super::CursorMatcher;
use crate::lexicon::LexiconIndex;
use crate::normalize::char_len;
use crate::source::{RawEntry, RawLexicon};

fn index_of(words: &[&str]) -> Arc<LexiconIndex> {
    let raw = RawLexicon::from_entries(words.iter().map(|w| {
        (
            w.to_string(),
            RawEntry {
                senses: vec![format!("gloss of {}", w)],
                ..Default::default()
            },
        )
    }));
    Arc::new(LexiconIndex::build(raw))
}

fn thai() -> Arc<LexiconIndex> {
    index_of(&["กิน", "กินข้าว", "ข้าว", "เย็น", "น"])
}

fn word_at(index: &Arc<LexiconIndex>, context: &str, cursor: usize) -> Option<String> {
    CursorMatcher::new(index.clone())
        .query(context, cursor)
        .map(|m| m.word)
}

#[test]
fn longest_word_at_earliest_start_wins() {
    let mut matcher = CursorMatcher::new(thai());
    let found = matcher.query("กินข้าวเย็น", 1).unwrap();
    assert_eq!(found.word, "กินข้าว");
    assert_eq!((found.start, found.end), (0, 7));
    assert_eq!(found.entry.senses, vec!["gloss of กินข้าว"]);
}

#[test]
fn every_word_is_found_alone_at_every_cursor() {
    let index = thai();
    for word in ["กิน", "กินข้าว", "ข้าว", "เย็น", "น"] {
        for cursor in 1..=char_len(word) {
            assert_eq!(
                word_at(&index, word, cursor).as_deref(),
                Some(word),
                "{} at cursor {}",
                word,
                cursor
            );
        }
    }
}

#[test]
fn word_ending_at_cursor_is_behind_it() {
    let index = index_of(&["กิน", "ข้าว"]);

    // cursor 3 sits between กิน (0..3) and ข้าว (3..7)
    let mut matcher = CursorMatcher::new(index.clone());
    let found = matcher.query("กินข้าว", 3).unwrap();
    assert_eq!(found.word, "ข้าว");
    assert_eq!((found.start, found.end), (3, 7));

    assert_eq!(word_at(&index, "กิน ไป", 3), None);
    assert_eq!(word_at(&index, "กิน ไป", 2).as_deref(), Some("กิน"));
}

#[test]
fn cursor_at_end_of_context_refers_to_last_character() {
    let index = index_of(&["กิน"]);
    assert_eq!(word_at(&index, "กิน", 3).as_deref(), Some("กิน"));
    assert_eq!(word_at(&index, "ไปกิน", 5).as_deref(), Some("กิน"));
}

#[test]
fn single_character_words_match() {
    let index = index_of(&["น"]);
    let found = CursorMatcher::new(index.clone()).query("กนก", 1).unwrap();
    assert_eq!((found.word.as_str(), found.start, found.end), ("น", 1, 2));
    assert_eq!(word_at(&index, "กนก", 0), None);
    assert_eq!(word_at(&index, "กนก", 2), None);
}

#[test]
fn repeated_queries_inside_a_word_do_not_rescan() {
    let mut matcher = CursorMatcher::new(thai());
    let first = matcher.query("กินข้าวเย็น", 1).unwrap();
    assert_eq!(matcher.stats().scans, 1);

    for cursor in 2..=7 {
        assert_eq!(matcher.query("กินข้าวเย็น", cursor).as_ref(), Some(&first));
    }
    let stats = matcher.stats();
    assert_eq!(stats.queries, 7);
    assert_eq!(stats.sticky_hits, 6);
    assert_eq!(stats.scans, 1);

    let next = matcher.query("กินข้าวเย็น", 8).unwrap();
    assert_eq!(next.word, "เย็น");
    assert_eq!((next.start, next.end), (7, 11));
    assert_eq!(matcher.stats().scans, 2);
}

#[test]
fn sticky_match_keeps_word_a_fresh_scan_would_replace() {
    let index = index_of(&["ab", "abcd", "cdef"]);

    // Without history, cursor 4 prefers cdef: abcd starts outside the window.
    assert_eq!(word_at(&index, "abcdef", 4).as_deref(), Some("cdef"));

    let mut matcher = CursorMatcher::new(index);
    assert_eq!(matcher.query("abcdef", 1).unwrap().word, "abcd");
    assert_eq!(matcher.query("abcdef", 4).unwrap().word, "abcd");
    assert_eq!(matcher.query("abcdef", 5).unwrap().word, "cdef");
}

#[test]
fn cursor_at_match_start_rescans() {
    let mut matcher = CursorMatcher::new(thai());
    matcher.query("กินข้าวเย็น", 8).unwrap();
    let found = matcher.query("กินข้าวเย็น", 7).unwrap();
    assert_eq!(found.word, "เย็น");
    assert_eq!(matcher.stats().sticky_hits, 0);
    assert_eq!(matcher.stats().scans, 2);
}

#[test]
fn different_context_invalidates_active_match() {
    let mut matcher = CursorMatcher::new(index_of(&["ab", "xy"]));
    assert_eq!(matcher.query("abab", 1).unwrap().word, "ab");

    // same span, different text
    let found = matcher.query("xyab", 1).unwrap();
    assert_eq!(found.word, "xy");
    assert_eq!(matcher.stats().sticky_hits, 0);
}

#[test]
fn miss_and_reset_clear_active_match() {
    let mut matcher = CursorMatcher::new(thai());
    matcher.query("กินข้าว", 1).unwrap();
    assert!(matcher.active().is_some());

    assert!(matcher.query("hello", 2).is_none());
    assert!(matcher.active().is_none());

    matcher.query("กินข้าว", 1).unwrap();
    matcher.reset();
    assert!(matcher.active().is_none());
    matcher.query("กินข้าว", 2).unwrap();
    assert_eq!(matcher.stats().sticky_hits, 0);
}

#[test]
fn starts_without_a_bucket_are_never_looked_up() {
    let mut matcher = CursorMatcher::new(index_of(&["กา", "ขา"]));
    assert!(matcher.query("คา", 1).is_none());
    assert!(matcher.query("hello world", 3).is_none());
    assert_eq!(matcher.stats().lookups, 0);
}

#[test]
fn pruned_start_does_not_borrow_a_match_from_another_bucket() {
    // "ขา" exists, but a candidate starting at ค must not resolve to it.
    let index = index_of(&["ขา"]);
    assert_eq!(word_at(&index, "คา", 0), None);
    assert_eq!(word_at(&index, "คขา", 1).as_deref(), Some("ขา"));
}

#[test]
fn out_of_range_cursor_is_clamped() {
    let index = index_of(&["กิน"]);
    assert_eq!(word_at(&index, "กิน", 100).as_deref(), Some("กิน"));
}

#[test]
fn empty_inputs_find_nothing() {
    let empty = Arc::new(LexiconIndex::empty());
    assert_eq!(word_at(&empty, "กินข้าว", 1), None);
    assert_eq!(word_at(&thai(), "", 0), None);
}

#[test]
fn context_is_normalized_before_matching() {
    let index = index_of(&["caf\u{00e9}"]);
    let found = CursorMatcher::new(index).query("cafe\u{0301}!", 2).unwrap();
    assert_eq!(found.word, "caf\u{00e9}");
    assert_eq!((found.start, found.end), (0, 5));
}

#[test]
fn offsets_point_into_the_unnormalized_context() {
    let mut matcher = CursorMatcher::new(thai());
    let context = format!("{}กินข้าว", "e\u{0301}".repeat(10));

    let found = matcher.query(&context, 21).unwrap();
    assert_eq!(found.word, "กินข้าว");
    assert_eq!((found.start, found.end), (20, 27));
    assert_eq!(context.chars().skip(20).take(7).collect::<String>(), "กินข้าว");

    // Sticky span is in the same coordinates as the returned offsets.
    assert_eq!(matcher.query(&context, 27).unwrap(), found);
    assert_eq!(matcher.stats().sticky_hits, 1);
    assert_eq!(matcher.query(&context, 20), None);
}

#[test]
fn matchers_sharing_an_index_are_independent() {
    let index = thai();
    let mut left = CursorMatcher::new(index.clone());
    let mut right = CursorMatcher::new(index);

    left.query("กินข้าว", 1).unwrap();
    assert!(right.active().is_none());
    assert_eq!(right.query("ข้าวเย็น", 5).unwrap().word, "เย็น");
    assert_eq!(left.active().unwrap().result.word, "กินข้าว");
}
