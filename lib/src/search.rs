use crate::results::*;
use crate::secret::SecretState;
use log::debug;
use log::info;
use rayon::prelude::*;
use std::collections::HashMap;
use std::collections::HashSet;
use std::result::Result;
use std::sync::Arc;
use std::time::Instant;

/// Whether the search may skip branches that cannot produce a longer chain than the best one
/// found so far.
///
/// Pruning never changes the result, only how long it takes to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    Enabled,
    Disabled,
}

/// For each word in a vocabulary, the vocabulary words that are still legal after guessing it
/// against one particular secret.
///
/// Feedback depends only on the secret and the guess, so this can be computed once per secret and
/// then intersected with the shrinking candidate lists at every level of the search.
#[derive(Debug, Clone)]
pub struct FilterCache {
    secret: Arc<str>,
    filters: HashMap<Arc<str>, HashSet<Arc<str>>>,
}

impl FilterCache {
    /// Scores every word in the vocabulary against a copy of `secret`, and records which words
    /// remain legal afterwards.
    pub fn new(secret: &SecretState, vocabulary: &[Arc<str>]) -> Result<FilterCache, WordleError> {
        let mut filters = HashMap::with_capacity(vocabulary.len());
        for guess in vocabulary {
            let (branch, _) = secret.copy_and_score(guess)?;
            let filter: HashSet<Arc<str>> = vocabulary
                .iter()
                .filter(|word| branch.is_legal(word))
                .cloned()
                .collect();
            filters.insert(Arc::clone(guess), filter);
        }
        Ok(FilterCache {
            secret: Arc::clone(secret.word()),
            filters,
        })
    }

    /// The secret this cache was computed for.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// The words that remain legal after guessing `guess`, if it was in the vocabulary.
    pub fn filter(&self, guess: &str) -> Option<&HashSet<Arc<str>>> {
        self.filters.get(guess)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Finds the longest sequence of legal guesses, from `possibilities`, that a solver could make
/// before it is forced to guess the secret.
///
/// Every possibility must be legal under the secret's current constraints, and the secret must
/// be one of them. The secret state should be strict, so that each trial guess is validated.
///
/// The chain is returned in **reverse** order: the first element is the secret itself, and the
/// last element is the first guess a solver would make.
///
/// ```
/// use rs_eldrow::*;
/// use std::sync::Arc;
///
/// let secret = SecretState::new("abe", true)?;
/// let words: Vec<Arc<str>> = vec!["abc".into(), "abd".into(), "abe".into()];
///
/// let chain = worst_solve(&secret, &words)?;
///
/// assert_eq!(chain, vec![Arc::from("abe"), Arc::from("abd"), Arc::from("abc")]);
/// # Ok::<(), WordleError>(())
/// ```
pub fn worst_solve(
    secret: &SecretState,
    possibilities: &[Arc<str>],
) -> Result<Vec<Arc<str>>, WordleError> {
    worst_solve_with(secret, possibilities, None, Pruning::Enabled)
}

/// Like [`worst_solve`], but can reuse filters precomputed for this secret, and can disable
/// pruning.
///
/// Possibilities missing from the cache have their filters computed directly.
///
/// Branches are visited in descending order of how many candidates they leave, with ties broken
/// alphabetically, and the first longest chain found wins. This order is what decides between
/// equally long chains.
pub fn worst_solve_with(
    secret: &SecretState,
    possibilities: &[Arc<str>],
    filters: Option<&FilterCache>,
    pruning: Pruning,
) -> Result<Vec<Arc<str>>, WordleError> {
    if possibilities.is_empty() {
        return Err(WordleError::EmptyCandidatePool);
    }
    if let Some(filters) = filters {
        debug_assert_eq!(filters.secret(), secret.word().as_ref());
    }

    let mut search = Search {
        filters,
        pruning,
        num_nodes: 0,
    };
    let chain = search.solve(secret, possibilities)?;
    debug!(
        "searched {} nodes for '{}', longest chain has {} guesses",
        search.num_nodes,
        secret.word(),
        chain.len()
    );
    Ok(chain)
}

/// Computes the worst solve for one secret over the whole vocabulary, in hard mode.
///
/// This checks that the vocabulary is usable, builds the filter cache, runs the search, and
/// then replays the chain so that each guess is paired with its feedback.
pub fn run_worst_solve(vocabulary: &[Arc<str>], secret: &str) -> Result<WorstSolve, WordleError> {
    let start = Instant::now();
    let state = SecretState::new(secret, true)?;
    check_vocabulary(&state, vocabulary)?;

    let filters = FilterCache::new(&state, vocabulary)?;
    debug!(
        "built {} filters for '{}' in {:?}",
        filters.len(),
        state.word(),
        start.elapsed()
    );

    let chain = worst_solve_with(&state, vocabulary, Some(&filters), Pruning::Enabled)?;
    let guesses = replay(state.word(), chain.iter().rev())?;
    let solve = WorstSolve {
        secret: Arc::clone(state.word()),
        guesses,
        elapsed: start.elapsed(),
    };
    info!("calculated worst solve in {:?} for {}", solve.elapsed, solve);
    Ok(solve)
}

/// Runs [`run_worst_solve`] for each secret, in parallel on the current rayon thread pool.
///
/// Each secret gets its own filter cache; nothing is shared between them.
pub fn run_worst_solves(
    vocabulary: &[Arc<str>],
    secrets: &[Arc<str>],
) -> Result<Vec<WorstSolve>, WordleError> {
    secrets
        .par_iter()
        .map(|secret| run_worst_solve(vocabulary, secret))
        .collect()
}

/// Picks the longest of the given solves. Ties go to the alphabetically first secret.
pub fn longest(solves: &[WorstSolve]) -> Option<&WorstSolve> {
    solves
        .iter()
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| b.secret.cmp(&a.secret)))
}

fn check_vocabulary(secret: &SecretState, vocabulary: &[Arc<str>]) -> Result<(), WordleError> {
    if vocabulary.is_empty() {
        return Err(WordleError::EmptyCandidatePool);
    }
    for word in vocabulary {
        let length = word.chars().count();
        if length != secret.len() {
            return Err(WordleError::LengthMismatch {
                expected: secret.len(),
                actual: length,
            });
        }
    }
    if !vocabulary
        .iter()
        .any(|word| word.to_lowercase() == secret.word().as_ref())
    {
        return Err(WordleError::SecretNotInPool(secret.word().to_string()));
    }
    Ok(())
}

fn replay<'a>(
    secret: &str,
    chronological: impl Iterator<Item = &'a Arc<str>>,
) -> Result<Vec<ScoredGuess>, WordleError> {
    let mut state = SecretState::new(secret, true)?;
    let mut guesses = Vec::new();
    for guess in chronological {
        guesses.push(ScoredGuess {
            guess: Arc::clone(guess),
            results: state.score(guess)?,
        });
    }
    Ok(guesses)
}

struct Search<'a> {
    filters: Option<&'a FilterCache>,
    pruning: Pruning,
    num_nodes: u64,
}

/// One trial guess, the state after making it, and the candidates it leaves.
struct Branch {
    guess: Arc<str>,
    state: SecretState,
    remaining: Vec<Arc<str>>,
}

impl Search<'_> {
    fn solve(
        &mut self,
        secret: &SecretState,
        possibilities: &[Arc<str>],
    ) -> Result<Vec<Arc<str>>, WordleError> {
        self.num_nodes += 1;
        match possibilities {
            [] => return Err(WordleError::EmptyCandidatePool),
            [only] => {
                let (_, results) = secret.copy_and_score(only)?;
                if !is_solved(&results) {
                    return Err(WordleError::SecretNotInPool(only.to_string()));
                }
                return Ok(vec![Arc::clone(only)]);
            }
            _ => {}
        }

        let mut branches = self.branches(secret, possibilities)?;
        branches.sort_by(|a, b| {
            b.remaining
                .len()
                .cmp(&a.remaining.len())
                .then_with(|| a.guess.cmp(&b.guess))
        });

        let mut worst: Vec<Arc<str>> = Vec::new();
        for branch in branches {
            if self.pruning == Pruning::Enabled && branch.remaining.len() < worst.len() {
                // Branches are sorted by size, so none of the rest can be longer either.
                break;
            }
            let mut chain = self.solve(&branch.state, &branch.remaining)?;
            if chain.len() + 1 > worst.len() {
                chain.push(branch.guess);
                worst = chain;
            }
        }

        if worst.is_empty() {
            return Err(WordleError::EmptyCandidatePool);
        }
        Ok(worst)
    }

    fn branches(
        &self,
        secret: &SecretState,
        possibilities: &[Arc<str>],
    ) -> Result<Vec<Branch>, WordleError> {
        let mut branches = Vec::with_capacity(possibilities.len());
        for guess in possibilities {
            let (state, results) = secret.copy_and_score(guess)?;
            if is_solved(&results) {
                // Guessing the secret ends the chain, and there is always another word to try
                // first.
                continue;
            }
            // The guess itself is dropped: repeating it reveals nothing new.
            let remaining = match self.filters.and_then(|filters| filters.filter(guess)) {
                Some(filter) => possibilities
                    .iter()
                    .filter(|word| *word != guess && filter.contains(*word))
                    .cloned()
                    .collect(),
                None => possibilities
                    .iter()
                    .filter(|word| *word != guess && state.is_legal(word))
                    .cloned()
                    .collect(),
            };
            branches.push(Branch {
                guess: Arc::clone(guess),
                state,
                remaining,
            });
        }
        Ok(branches)
    }
}
