mod bucket;
mod index;
mod prefix;

pub use bucket::Bucket;
pub use index::{BuildReport, IndexOptions, LexiconIndex};
