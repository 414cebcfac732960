//! Cursor-anchored longest-match lookup.

mod cursor;

pub use cursor::{ActiveMatch, CursorMatcher, MatcherStats};
pub(crate) use cursor::fingerprint;

#[cfg(test)]
mod tests;
