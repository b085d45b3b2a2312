use crate::results::LegalityViolation;
use crate::results::LetterResult;
use crate::results::WordleError;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::result::Result;

/// Everything known about how one letter occurs in the secret.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Constraint {
    pub letter: char,
    /// The minimum number of times this letter appears in the secret.
    pub min_count: usize,
    /// If true, the letter appears exactly `min_count` times.
    pub exact: bool,
    /// Locations where the letter is known to be.
    pub known_positions: BTreeSet<usize>,
}

impl Constraint {
    /// Returns the constraint implied by the results at the given positions, which must be every
    /// position of `letter` within a guess.
    pub fn from_result(letter: char, positions: &[usize], results: &[LetterResult]) -> Constraint {
        let mut min_count = 0;
        let mut exact = false;
        let mut known_positions = BTreeSet::new();
        for &position in positions {
            match results[position] {
                LetterResult::Exact => {
                    min_count += 1;
                    known_positions.insert(position);
                }
                LetterResult::Present => min_count += 1,
                // The guess held more copies than the secret, so the count is now pinned.
                LetterResult::Absent => exact = true,
            }
        }
        Constraint {
            letter,
            min_count,
            exact,
            known_positions,
        }
    }

    /// Merges the information known in the other constraint into this one.
    ///
    /// The larger minimum wins. Fails if that would move a count that is already known exactly.
    pub fn merge(&mut self, other: &Constraint) -> Result<(), WordleError> {
        if other.min_count > self.min_count {
            if self.exact {
                return Err(WordleError::ConstraintConflict(self.letter));
            }
            self.min_count = other.min_count;
            self.exact = other.exact;
        } else if other.min_count == self.min_count {
            self.exact |= other.exact;
        } else if other.exact {
            return Err(WordleError::ConstraintConflict(self.letter));
        }
        self.known_positions.extend(other.known_positions.iter().copied());
        debug_assert!(self.known_positions.len() <= self.min_count);
        Ok(())
    }

    /// Checks the given word against this constraint.
    fn check(&self, word: &[char]) -> Result<(), LegalityViolation> {
        let letter = self.letter;
        let count = word.iter().filter(|c| **c == letter).count();
        if self.exact && count != self.min_count {
            return Err(LegalityViolation::WrongCount {
                letter,
                count,
                required: self.min_count,
            });
        } else if count < self.min_count {
            return Err(LegalityViolation::TooFew {
                letter,
                count,
                min: self.min_count,
            });
        }
        for &position in &self.known_positions {
            if word.get(position) != Some(&letter) {
                return Err(LegalityViolation::MissingKnownPosition { letter, position });
            }
        }
        Ok(())
    }
}

/// The constraints accumulated from every guess scored so far, keyed by letter.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Constraints {
    by_letter: BTreeMap<char, Constraint>,
}

impl Constraints {
    pub fn new() -> Constraints {
        Constraints::default()
    }

    /// Adds the constraints arising from the given guess and its results.
    pub fn update(&mut self, guess: &[char], results: &[LetterResult]) -> Result<(), WordleError> {
        let mut positions_by_letter: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for (index, letter) in guess.iter().enumerate() {
            positions_by_letter.entry(*letter).or_default().push(index);
        }

        for (letter, positions) in positions_by_letter {
            let constraint = Constraint::from_result(letter, &positions, results);
            match self.by_letter.entry(letter) {
                Entry::Occupied(mut existing) => existing.get_mut().merge(&constraint)?,
                Entry::Vacant(entry) => {
                    entry.insert(constraint);
                }
            }
        }
        Ok(())
    }

    /// Returns the first rule the given word breaks, checking letters in alphabetical order.
    pub fn check(&self, word: &[char]) -> Result<(), LegalityViolation> {
        for constraint in self.by_letter.values() {
            constraint.check(word)?;
        }
        Ok(())
    }

    /// Returns `true` iff the given word satisfies every constraint.
    pub fn is_satisfied_by(&self, word: &[char]) -> bool {
        self.check(word).is_ok()
    }

    pub fn get(&self, letter: char) -> Option<&Constraint> {
        self.by_letter.get(&letter)
    }

    pub fn len(&self) -> usize {
        self.by_letter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_letter.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.by_letter.values()
    }
}

/// Counts how many times each letter appears.
pub(crate) fn count_letters(word: &[char]) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for letter in word {
        *counts.entry(*letter).or_insert(0) += 1;
    }
    counts
}
