use crate::secret::SecretState;
use std::error::Error;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of a given letter at a specific location.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LetterResult {
    /// The letter is in the secret at this location.
    Exact,
    /// The letter is in the secret, but somewhere else.
    Present,
    /// The letter is not in the secret, or every copy of it has already been credited.
    Absent,
}

impl LetterResult {
    /// Returns the single-character form of this result: `G`, `Y`, or `X`.
    pub fn to_char(self) -> char {
        match self {
            LetterResult::Exact => 'G',
            LetterResult::Present => 'Y',
            LetterResult::Absent => 'X',
        }
    }

    /// Parses the single-character form of a result. Accepts either case, and `.` for absent.
    pub fn from_char(c: char) -> Option<LetterResult> {
        match c {
            'G' | 'g' => Some(LetterResult::Exact),
            'Y' | 'y' => Some(LetterResult::Present),
            'X' | 'x' | '.' => Some(LetterResult::Absent),
            _ => None,
        }
    }
}

/// Renders results in their compact string form, e.g. `XXGXG`.
pub fn feedback_string(results: &[LetterResult]) -> String {
    results.iter().map(|result| result.to_char()).collect()
}

/// Returns `true` iff every letter was [`LetterResult::Exact`].
pub fn is_solved(results: &[LetterResult]) -> bool {
    results.iter().all(|result| *result == LetterResult::Exact)
}

/// The rule that an illegal hard-mode guess broke.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LegalityViolation {
    /// The secret is known to contain the letter exactly `required` times.
    WrongCount {
        letter: char,
        count: usize,
        required: usize,
    },
    /// The secret is known to contain the letter at least `min` times.
    TooFew {
        letter: char,
        count: usize,
        min: usize,
    },
    /// The letter is known to be at this position.
    MissingKnownPosition { letter: char, position: usize },
}

impl fmt::Display for LegalityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegalityViolation::WrongCount {
                letter,
                count,
                required,
            } => write!(
                f,
                "count of '{}' ({}) does not match known count ({})",
                letter, count, required
            ),
            LegalityViolation::TooFew { letter, count, min } => write!(
                f,
                "count of '{}' ({}) does not meet minimum count ({})",
                letter, count, min
            ),
            LegalityViolation::MissingKnownPosition { letter, position } => write!(
                f,
                "letter {} does not match known letter '{}'",
                position, letter
            ),
        }
    }
}

/// Indicates that an error occurred while scoring guesses or searching for a worst solve.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum WordleError {
    /// A secret or guess was empty.
    EmptyWord,
    /// A word did not have the expected length.
    LengthMismatch { expected: usize, actual: usize },
    /// A hard-mode guess ignored what earlier feedback revealed.
    IllegalGuess {
        guess: String,
        violation: LegalityViolation,
    },
    /// A worst solve was requested over an empty set of candidates.
    EmptyCandidatePool,
    /// Two constraints for this letter disagree about how often it occurs.
    ConstraintConflict(char),
    /// The candidates were narrowed down to this word, but it is not the secret.
    SecretNotInPool(String),
    /// Words could not be read.
    Io(String),
}

impl fmt::Display for WordleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordleError::EmptyWord => write!(f, "cannot use an empty word"),
            WordleError::LengthMismatch { expected, actual } => write!(
                f,
                "word length ({}) does not match the expected length ({})",
                actual, expected
            ),
            WordleError::IllegalGuess { guess, violation } => {
                write!(f, "invalid hard mode guess '{}': {}", guess, violation)
            }
            WordleError::EmptyCandidatePool => write!(f, "there are no candidate words to search"),
            WordleError::ConstraintConflict(letter) => {
                write!(f, "conflicting counts for letter '{}'", letter)
            }
            WordleError::SecretNotInPool(word) => {
                write!(f, "'{}' is the only candidate left, but it is not the secret", word)
            }
            WordleError::Io(message) => write!(f, "io error: {}", message),
        }
    }
}

impl Error for WordleError {}

impl From<io::Error> for WordleError {
    fn from(e: io::Error) -> Self {
        WordleError::Io(e.to_string())
    }
}

/// The result of a single word guess.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GuessResult<'a> {
    pub guess: &'a str,
    /// The result of each letter, provided in the same letter order as in the guess.
    pub results: Vec<LetterResult>,
}

/// An owned guess together with the feedback it received.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredGuess {
    pub guess: Arc<str>,
    pub results: Vec<LetterResult>,
}

impl fmt::Display for ScoredGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.guess, feedback_string(&self.results))
    }
}

/// The longest chain of legal guesses found for one secret, in the order a solver would make them.
///
/// The last guess is always the secret itself.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorstSolve {
    pub secret: Arc<str>,
    pub guesses: Vec<ScoredGuess>,
    /// How long the search took, including building the filter cache.
    pub elapsed: Duration,
}

impl WorstSolve {
    /// The number of guesses in the chain, including the final correct guess.
    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    /// The guessed words in chronological order.
    pub fn words(&self) -> Vec<Arc<str>> {
        self.guesses.iter().map(|g| Arc::clone(&g.guess)).collect()
    }
}

impl fmt::Display for WorstSolve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} guesses): ", self.secret, self.len())?;
        for (index, guess) in self.guesses.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", guess)?;
        }
        Ok(())
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Box<str>>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Box<str>>),
}

/// Determines the result of the given `guess` when applied to the given `objective`.
///
/// This scores a single guess outside of hard mode. Use [`SecretState`] to score a sequence of
/// guesses that must respect earlier feedback.
///
/// ```
/// use rs_eldrow::*;
///
/// let result = get_result_for_guess("abate", "flake").unwrap();
/// assert_eq!(feedback_string(&result.results), "XXGXG");
/// ```
pub fn get_result_for_guess<'a>(
    objective: &str,
    guess: &'a str,
) -> Result<GuessResult<'a>, WordleError> {
    let mut secret = SecretState::new(objective, false)?;
    let results = secret.score(guess)?;
    Ok(GuessResult { guess, results })
}
