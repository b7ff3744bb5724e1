#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use itertools::Itertools;
use rustc_hash::FxHashMap;

/// A handle into a [`WordList`].
///
/// The list interns words in sorted order, so comparing ids compares words
/// lexicographically. The solver relies on that for reproducible value
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(u32);

impl WordId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The candidate dictionary: uppercased, deduplicated, sorted, with a
/// by-length index for seeding slot domains.
///
/// Words are matched byte-wise, so the expected alphabet is ASCII.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Box<str>>,
    by_length: FxHashMap<usize, Vec<WordId>>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Box<str>> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .sorted()
            .dedup()
            .map(String::into_boxed_str)
            .collect();

        let mut by_length: FxHashMap<usize, Vec<WordId>> = FxHashMap::default();
        for (i, word) in words.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            by_length.entry(word.len()).or_default().push(WordId(i as u32));
        }

        Self { words, by_length }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: WordId) -> &str {
        &self.words[id.index()]
    }

    /// The byte at position `k` of the word, the unit crossing constraints
    /// compare.
    #[must_use]
    pub fn byte_at(&self, id: WordId, k: usize) -> u8 {
        self.words[id.index()].as_bytes()[k]
    }

    /// Every word of exactly `length` bytes, in lexicographic order. Empty
    /// when no word has that length.
    #[must_use]
    pub fn of_length(&self, length: usize) -> &[WordId] {
        self.by_length.get(&length).map_or(&[], Vec::as_slice)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> {
        self.words
            .iter()
            .enumerate()
            .map(|(i, word)| (WordId(i as u32), word.as_ref()))
    }
}
