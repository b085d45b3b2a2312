use crate::constraints::count_letters;
use crate::constraints::Constraints;
use crate::results::*;
use std::collections::BTreeMap;
use std::iter::zip;
use std::result::Result;
use std::sync::Arc;

/// A secret word, together with everything that the guesses scored against it so far have
/// revealed.
///
/// In strict (hard) mode, every guess must be consistent with that accumulated knowledge.
///
/// Cloning is how the search explores independent branches: the secret's letters are shared, but
/// the constraints are copied, so branches never see each other's guesses.
///
/// ```
/// use rs_eldrow::*;
///
/// let mut secret = SecretState::new("abate", true)?;
///
/// assert_eq!(feedback_string(&secret.score("abbey")?), "GGXYX");
/// assert!(!secret.is_legal("agora"));
/// assert!(is_solved(&secret.score("abate")?));
/// # Ok::<(), WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SecretState {
    word: Arc<str>,
    letters: Arc<[char]>,
    letter_counts: Arc<BTreeMap<char, usize>>,
    strict: bool,
    constraints: Constraints,
}

impl SecretState {
    /// Creates a new secret. The word is converted to lower case.
    pub fn new(word: &str, strict: bool) -> Result<SecretState, WordleError> {
        let letters = normalize(word);
        if letters.is_empty() {
            return Err(WordleError::EmptyWord);
        }
        let letter_counts = count_letters(&letters);
        Ok(SecretState {
            word: Arc::from(letters.iter().collect::<String>()),
            letters: Arc::from(letters),
            letter_counts: Arc::new(letter_counts),
            strict,
            constraints: Constraints::new(),
        })
    }

    /// The secret word, in lower case.
    pub fn word(&self) -> &Arc<str> {
        &self.word
    }

    /// The number of letters in the secret.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false: secrets cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Whether guesses must respect the constraints learned so far.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Scores the guess against the secret, then records what the result reveals.
    ///
    /// In strict mode the guess is validated first, and an illegal guess leaves the state
    /// untouched.
    pub fn score(&mut self, guess: &str) -> Result<Vec<LetterResult>, WordleError> {
        let guess = normalize(guess);
        if guess.is_empty() {
            return Err(WordleError::EmptyWord);
        }
        if guess.len() != self.letters.len() {
            return Err(WordleError::LengthMismatch {
                expected: self.letters.len(),
                actual: guess.len(),
            });
        }
        if self.strict {
            self.check_legal_letters(&guess)?;
        }

        let results = self.compare(&guess);
        self.constraints.update(&guess, &results)?;
        Ok(results)
    }

    /// Copies this state and scores the guess against the copy, leaving this state unchanged.
    pub fn copy_and_score(
        &self,
        guess: &str,
    ) -> Result<(SecretState, Vec<LetterResult>), WordleError> {
        let mut copy = self.clone();
        let results = copy.score(guess)?;
        Ok((copy, results))
    }

    /// Returns `true` iff the guess satisfies every constraint learned so far.
    ///
    /// This does not check the guess's length, although a guess too short to hold a letter at a
    /// known position is illegal.
    pub fn is_legal(&self, guess: &str) -> bool {
        self.constraints.is_satisfied_by(&normalize(guess))
    }

    /// Like [`SecretState::is_legal`], but explains which constraint the guess breaks.
    pub fn check_legal(&self, guess: &str) -> Result<(), WordleError> {
        self.check_legal_letters(&normalize(guess))
    }

    fn check_legal_letters(&self, guess: &[char]) -> Result<(), WordleError> {
        self.constraints
            .check(guess)
            .map_err(|violation| WordleError::IllegalGuess {
                guess: guess.iter().collect(),
                violation,
            })
    }

    fn compare(&self, guess: &[char]) -> Vec<LetterResult> {
        // Each letter can earn at most as many Exact and Present results as it appears in both
        // words.
        let mut overlap: BTreeMap<char, usize> = count_letters(guess)
            .into_iter()
            .filter_map(|(letter, count)| {
                self.letter_counts
                    .get(&letter)
                    .map(|secret_count| (letter, count.min(*secret_count)))
            })
            .collect();
        let mut results = vec![LetterResult::Absent; guess.len()];

        for (index, (correct, guessed)) in zip(self.letters.iter(), guess).enumerate() {
            if correct == guessed {
                results[index] = LetterResult::Exact;
                if let Some(remaining) = overlap.get_mut(guessed) {
                    *remaining -= 1;
                }
            }
        }

        for (index, guessed) in guess.iter().enumerate() {
            if results[index] == LetterResult::Exact {
                continue;
            }
            if let Some(remaining) = overlap.get_mut(guessed) {
                if *remaining > 0 {
                    results[index] = LetterResult::Present;
                    *remaining -= 1;
                }
            }
        }
        results
    }
}

fn normalize(word: &str) -> Vec<char> {
    word.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lowercases_word() -> Result<(), WordleError> {
        let secret = SecretState::new("AbAtE", false)?;

        assert_eq!(secret.word().as_ref(), "abate");
        assert_eq!(secret.len(), 5);
        assert!(!secret.is_strict());
        assert!(secret.constraints().is_empty());
        Ok(())
    }

    #[test]
    fn new_empty_word_errors() {
        assert_eq!(SecretState::new("", true).unwrap_err(), WordleError::EmptyWord);
    }

    #[test]
    fn compare_credits_exact_before_present() -> Result<(), WordleError> {
        let secret = SecretState::new("abate", false)?;

        // Only two 'a's can be credited. The first is exact, so just one more earns Present.
        assert_eq!(
            secret.compare(&normalize("aaxxa")),
            vec![
                LetterResult::Exact,
                LetterResult::Present,
                LetterResult::Absent,
                LetterResult::Absent,
                LetterResult::Absent,
            ]
        );
        assert_eq!(
            secret.compare(&normalize("xaxax")),
            vec![
                LetterResult::Absent,
                LetterResult::Present,
                LetterResult::Absent,
                LetterResult::Present,
                LetterResult::Absent,
            ]
        );
        Ok(())
    }

    #[test]
    fn score_strict_illegal_guess_leaves_state_unchanged() -> Result<(), WordleError> {
        let mut secret = SecretState::new("abate", true)?;
        secret.score("abbey")?;
        let before = secret.constraints().clone();

        assert!(matches!(
            secret.score("agora"),
            Err(WordleError::IllegalGuess { .. })
        ));
        assert_eq!(secret.constraints(), &before);
        Ok(())
    }

    #[test]
    fn copy_and_score_leaves_original_unchanged() -> Result<(), WordleError> {
        let secret = SecretState::new("abate", true)?;

        let (copy, results) = secret.copy_and_score("flake")?;

        assert_eq!(feedback_string(&results), "XXGXG");
        assert!(secret.constraints().is_empty());
        assert!(!copy.constraints().is_empty());
        assert!(secret.is_legal("zzzzz"));
        assert!(!copy.is_legal("zzzzz"));
        Ok(())
    }
}
