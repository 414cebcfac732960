//! Dictionary resource parsing.
//!
//! How the resource is fetched is up to the caller; this module turns its
//! bytes into raw `(word, entry)` pairs for [`crate::lexicon::LexiconIndex`].

pub mod json;
pub mod raw;

pub use json::RawLexicon;
pub use raw::{LexiconMeta, RawEntry};
