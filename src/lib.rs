uniffi::setup_scaffolding!();

pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod normalize;
pub mod session;
pub mod source;
pub mod types;
pub mod window;

pub use lexicon::{IndexOptions, LexiconIndex};
pub use matcher::CursorMatcher;
pub use session::LookupSession;
pub use source::RawLexicon;
pub use types::{DictionaryEntry, MatchResult};
