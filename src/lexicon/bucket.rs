use sorted_vec::SortedSet;

/// Headwords sharing a first codepoint.
///
/// Words are kept sorted so iteration order does not depend on the order
/// the dictionary listed them in.
#[derive(Debug, Clone)]
pub struct Bucket {
    words: SortedSet<String>,
    max_word_length: usize,
}

impl Bucket {
    pub(crate) fn from_words(words: Vec<String>, max_word_length: usize) -> Self {
        Self {
            words: SortedSet::from_unsorted(words),
            max_word_length,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Codepoint length of the longest word in this bucket.
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }
}

/// Accumulates bucket contents during a build.
#[derive(Debug, Default)]
pub(crate) struct BucketBuilder {
    words: Vec<String>,
    max_word_length: usize,
}

impl BucketBuilder {
    pub(crate) fn push(&mut self, word: String, char_len: usize) {
        self.max_word_length = self.max_word_length.max(char_len);
        self.words.push(word);
    }

    pub(crate) fn finish(self) -> Bucket {
        Bucket::from_words(self.words, self.max_word_length)
    }
}
