use std::collections::HashSet;

use crate::error::{Error, Result};

/// Decides whether a candidate word is playable.
pub trait WordValidator {
    /// Case-insensitive membership check.
    fn is_valid_word(&self, word: &str) -> bool;

    /// False until the backing word list is available.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Word list loaded once from newline-delimited text.
///
/// Until [`Dictionary::load`] succeeds every lookup fails, so commits made
/// before the host finished fetching the list are rejected.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    lookup: HashSet<String>,
    /// Words in list order, first occurrence only.
    words: Vec<String>,
    loaded: bool,
}

impl Dictionary {
    /// An empty, not yet loaded dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loaded dictionary built from `words`.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for word in words {
            dict.add(word.as_ref());
        }
        dict.loaded = true;
        dict
    }

    /// Ingest a newline-delimited word list. Returns the number of distinct words.
    pub fn load(&mut self, text: &str) -> Result<usize> {
        if self.loaded {
            return Err(Error::DictionaryAlreadyLoaded);
        }
        for line in text.lines() {
            self.add(line);
        }
        self.loaded = true;
        log::info!("dictionary: loaded {} words", self.words.len());
        Ok(self.words.len())
    }

    fn add(&mut self, raw: &str) {
        let word = raw.trim().to_lowercase();
        if !word.is_empty() && self.lookup.insert(word.clone()) {
            self.words.push(word);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every word of at least `min_len` letters that uses only letters found
    /// in `letters`. Letters may repeat freely. Results keep list order.
    pub fn words_from_letters(&self, letters: &str, min_len: usize) -> Vec<&str> {
        let available: HashSet<char> = letters.to_lowercase().chars().collect();
        if available.is_empty() {
            return Vec::new();
        }
        self.words
            .iter()
            .filter(|w| w.chars().count() >= min_len)
            .filter(|w| w.chars().all(|c| available.contains(&c)))
            .map(String::as_str)
            .collect()
    }
}

impl WordValidator for Dictionary {
    fn is_valid_word(&self, word: &str) -> bool {
        if !self.loaded {
            log::warn!("dictionary: lookup of '{word}' before the word list was loaded");
            return false;
        }
        self.lookup.contains(&word.to_lowercase())
    }

    fn is_ready(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_trims_and_lowercases() {
        let mut dict = Dictionary::new();
        let count = dict.load("Stone\n  tones \n\none\r\nstone\n").unwrap();
        assert_eq!(count, 3);
        assert!(dict.is_valid_word("STONE"));
        assert!(dict.is_valid_word("tOnEs"));
        assert!(dict.is_valid_word("one"));
        assert!(!dict.is_valid_word("ston"));
    }

    #[test]
    fn unloaded_dictionary_rejects_everything() {
        let dict = Dictionary::new();
        assert!(!dict.is_ready());
        assert!(!dict.is_valid_word("stone"));
    }

    #[test]
    fn second_load_is_refused() {
        let mut dict = Dictionary::new();
        dict.load("a\nb").unwrap();
        assert!(matches!(dict.load("c"), Err(Error::DictionaryAlreadyLoaded)));
        assert!(!dict.is_valid_word("c"));
    }

    #[test]
    fn words_from_letters_filters_by_subset_and_length() {
        let dict = Dictionary::from_words(["stone", "notes", "onset", "toes", "tone", "stones", "snot", "ten", "oxen"]);
        let found = dict.words_from_letters("STONE", 4);
        assert_eq!(found, vec!["stone", "notes", "onset", "toes", "tone", "stones", "snot"]);
        assert!(dict.words_from_letters("", 1).is_empty());
        assert_eq!(dict.words_from_letters("ten", 3), vec!["ten"]);
    }
}
