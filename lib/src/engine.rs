use crate::constraints::Constraints;
use crate::data::WordBank;
use crate::results::*;
use crate::secret::SecretState;
use rand::seq::SliceRandom;
use rand::Rng;
use std::result::Result;
use std::sync::Arc;

/// Guesses words in order to solve a single game.
pub trait Guesser {
    /// Updates this guesser with information about a word.
    fn update<'a>(&mut self, result: &'a GuessResult) -> Result<(), WordleError>;

    /// Selects a new guess for the game, or `None` if this guesser has run out of words.
    fn select_next_guess(&mut self) -> Option<Arc<str>>;
}

/// Attempts to guess the given word within the maximum number of guesses, using the given
/// guesser.
///
/// Guesses are scored outside of hard mode, so a guesser may ignore earlier feedback. A guesser
/// that runs out of words loses the game.
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rs_eldrow::*;
///
/// let bank = WordBank::from_iterator(&["abc", "abd", "abe"])?;
/// let guesser = ExhaustiveGuesser::new(&bank, &mut StdRng::seed_from_u64(1));
///
/// let result = play_game("abe", 3, guesser)?;
///
/// assert!(matches!(result, GameResult::Success(_)));
/// # Ok::<(), WordleError>(())
/// ```
pub fn play_game<G: Guesser>(
    word_to_guess: &str,
    max_num_guesses: u32,
    mut guesser: G,
) -> Result<GameResult, WordleError> {
    let mut secret = SecretState::new(word_to_guess, false)?;
    let mut guesses: Vec<Box<str>> = Vec::new();
    for _ in 1..=max_num_guesses {
        let guess = match guesser.select_next_guess() {
            Some(guess) => guess,
            None => return Ok(GameResult::Failure(guesses)),
        };
        let results = secret.score(&guess)?;
        guesses.push(Box::from(guess.as_ref()));
        if is_solved(&results) {
            return Ok(GameResult::Success(guesses));
        }
        guesser.update(&GuessResult {
            guess: &guess,
            results,
        })?;
    }
    Ok(GameResult::Failure(guesses))
}

/// Guesses every word in the bank exactly once, in a random order, ignoring all feedback.
#[derive(Clone, Debug)]
pub struct ExhaustiveGuesser {
    remaining: Vec<Arc<str>>,
}

impl ExhaustiveGuesser {
    pub fn new<R: Rng + ?Sized>(bank: &WordBank, rng: &mut R) -> ExhaustiveGuesser {
        let mut remaining = bank.to_vec();
        remaining.shuffle(rng);
        ExhaustiveGuesser { remaining }
    }
}

impl Guesser for ExhaustiveGuesser {
    fn update<'a>(&mut self, _result: &'a GuessResult) -> Result<(), WordleError> {
        Ok(())
    }

    fn select_next_guess(&mut self) -> Option<Arc<str>> {
        self.remaining.pop()
    }
}

/// Guesses uniformly at random among the words that are still legal in hard mode.
///
/// Since the secret always satisfies its own feedback, this guesser never runs out of words
/// while the secret is in its bank.
#[derive(Clone, Debug)]
pub struct LegalHardModeGuesser<R: Rng> {
    possible_words: Vec<Arc<str>>,
    constraints: Constraints,
    rng: R,
}

impl<R: Rng> LegalHardModeGuesser<R> {
    pub fn new(bank: &WordBank, rng: R) -> LegalHardModeGuesser<R> {
        LegalHardModeGuesser {
            possible_words: bank.to_vec(),
            constraints: Constraints::new(),
            rng,
        }
    }

    /// The words this guesser may still choose from.
    pub fn possible_words(&self) -> &[Arc<str>] {
        &self.possible_words
    }
}

impl<R: Rng> Guesser for LegalHardModeGuesser<R> {
    fn update<'a>(&mut self, result: &'a GuessResult) -> Result<(), WordleError> {
        let guess: Vec<char> = result.guess.chars().flat_map(char::to_lowercase).collect();
        self.constraints.update(&guess, &result.results)?;

        let constraints = &self.constraints;
        self.possible_words.retain(|word| {
            let letters: Vec<char> = word.chars().collect();
            letters != guess && constraints.is_satisfied_by(&letters)
        });
        Ok(())
    }

    fn select_next_guess(&mut self) -> Option<Arc<str>> {
        self.possible_words.choose(&mut self.rng).cloned()
    }
}
