use crate::results::WordleError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Contains all the words of a vocabulary. Every word has the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordBank {
    words: Vec<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word will be trimmed and converted to
    /// lower case. Empty lines and repeated words are skipped.
    ///
    /// After trimming, all words must be the same length, else this returns an error.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let words = word_reader
            .lines()
            .collect::<Result<Vec<String>, std::io::Error>>()?;
        WordBank::from_iterator(words)
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// Each word will be trimmed and converted to lower case. Empty words and repeats are
    /// skipped.
    ///
    /// After trimming, all words must be the same length, else this returns an error.
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut word_length = 0;
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut all_words: Vec<Arc<str>> = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            let length = word.chars().count();
            if word_length == 0 {
                word_length = length;
            } else if length != word_length {
                return Err(WordleError::LengthMismatch {
                    expected: word_length,
                    actual: length,
                });
            }
            let word: Arc<str> = Arc::from(word);
            if seen.insert(Arc::clone(&word)) {
                all_words.push(word);
            }
        }
        Ok(WordBank {
            words: all_words,
            word_length,
        })
    }

    /// Returns a new bank holding at most `limit` randomly chosen words from this one.
    ///
    /// The same seed always selects the same words. Without a seed, the sample is drawn from
    /// entropy.
    pub fn sample(&self, limit: usize, seed: Option<u64>) -> WordBank {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        WordBank {
            words: self.words.choose_multiple(&mut rng, limit).cloned().collect(),
            word_length: self.word_length,
        }
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true iff this bank has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the length of each word in the bank, or zero if it is empty.
    pub fn word_length(&self) -> usize {
        self.word_length
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_iterator_keeps_first_of_repeats() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(["worda", "WORDA", "wordb", "worda "])?;

        assert_eq!(bank.len(), 2);
        assert_eq!(bank[0].as_ref(), "worda");
        assert_eq!(bank[1].as_ref(), "wordb");
        Ok(())
    }

    #[test]
    fn sample_with_seed_is_repeatable() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(["abc", "abd", "abe", "abf", "abg", "abh"])?;

        let first = bank.sample(3, Some(7));
        let second = bank.sample(3, Some(7));

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first.word_length(), 3);
        assert!(first.iter().all(|word| bank.contains(word)));
        Ok(())
    }

    #[test]
    fn sample_larger_than_bank_takes_everything() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(["abc", "abd"])?;

        assert_eq!(bank.sample(10, Some(1)).len(), 2);
        Ok(())
    }
}
