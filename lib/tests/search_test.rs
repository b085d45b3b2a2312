#[macro_use]
extern crate assert_matches;

use rs_eldrow::*;

use std::collections::HashSet;
use std::result::Result;
use std::sync::Arc;
use std::time::Duration;

macro_rules! assert_arc_eq {
    ($arc_vec:expr, $non_arc_vec:expr) => {
        assert_eq!(
            $arc_vec as &[Arc<str>],
            $non_arc_vec
                .iter()
                .map(|thing| Arc::from(*thing))
                .collect::<Vec<Arc<_>>>()
        );
    };
}

fn words(words: &[&str]) -> Vec<Arc<str>> {
    words.iter().map(|word| Arc::from(*word)).collect()
}

fn vocabulary() -> Vec<Arc<str>> {
    words(&[
        "alpha", "omega", "trope", "movie", "crowd", "froze", "ozone", "heels",
    ])
}

#[test]
fn worst_solve_follows_every_legal_guess() -> Result<(), WordleError> {
    let secret = SecretState::new("abe", true)?;

    let chain = worst_solve(&secret, &words(&["abc", "abd", "abe"]))?;

    // Reverse order: the secret comes first.
    assert_arc_eq!(&chain, &["abe", "abd", "abc"]);
    Ok(())
}

#[test]
fn worst_solve_skips_words_ruled_out_by_feedback() -> Result<(), WordleError> {
    let secret = SecretState::new("abe", true)?;

    let chain = worst_solve(&secret, &words(&["abc", "xbc", "abe"]))?;

    // Either first guess rules out the other, since both contain 'c'.
    assert_arc_eq!(&chain, &["abe", "abc"]);
    Ok(())
}

#[test]
fn worst_solve_only_the_secret() -> Result<(), WordleError> {
    let secret = SecretState::new("abe", true)?;

    let chain = worst_solve(&secret, &words(&["abe"]))?;

    assert_arc_eq!(&chain, &["abe"]);
    Ok(())
}

#[test]
fn worst_solve_ends_with_secret() -> Result<(), WordleError> {
    let vocabulary = vocabulary();
    let secret = SecretState::new("froze", true)?;

    let chain = worst_solve(&secret, &vocabulary)?;

    assert_eq!(chain[0].as_ref(), "froze");
    assert!(chain.len() >= 2);
    assert!(chain.len() <= vocabulary.len());
    assert_eq!(chain.iter().collect::<HashSet<_>>().len(), chain.len());
    Ok(())
}

#[test]
fn worst_solve_chain_is_legal_in_hard_mode() -> Result<(), WordleError> {
    let mut secret = SecretState::new("froze", true)?;

    let chain = worst_solve(&secret, &vocabulary())?;

    for (index, guess) in chain.iter().rev().enumerate() {
        let results = secret.score(guess)?;
        assert_eq!(is_solved(&results), index == chain.len() - 1);
    }
    Ok(())
}

#[test]
fn worst_solve_pruning_does_not_change_result() -> Result<(), WordleError> {
    let vocabulary = vocabulary();
    for word in vocabulary.iter() {
        let secret = SecretState::new(word, true)?;

        let pruned = worst_solve_with(&secret, &vocabulary, None, Pruning::Enabled)?;
        let unpruned = worst_solve_with(&secret, &vocabulary, None, Pruning::Disabled)?;

        assert_eq!(pruned, unpruned, "secret {}", word);
    }
    Ok(())
}

#[test]
fn worst_solve_filter_cache_does_not_change_result() -> Result<(), WordleError> {
    let vocabulary = vocabulary();
    for word in vocabulary.iter() {
        let secret = SecretState::new(word, true)?;
        let filters = FilterCache::new(&secret, &vocabulary)?;

        let cached = worst_solve_with(&secret, &vocabulary, Some(&filters), Pruning::Enabled)?;
        let uncached = worst_solve(&secret, &vocabulary)?;

        assert_eq!(cached, uncached, "secret {}", word);
    }
    Ok(())
}

#[test]
fn worst_solve_empty_pool_fails() -> Result<(), WordleError> {
    let secret = SecretState::new("froze", true)?;

    assert_matches!(
        worst_solve(&secret, &[]),
        Err(WordleError::EmptyCandidatePool)
    );
    Ok(())
}

#[test]
fn worst_solve_without_secret_fails() -> Result<(), WordleError> {
    let secret = SecretState::new("abe", true)?;

    assert_matches!(
        worst_solve(&secret, &words(&["abc"])),
        Err(WordleError::SecretNotInPool(word)) if word == "abc"
    );
    Ok(())
}

#[test]
fn worst_solve_illegal_candidate_fails() -> Result<(), WordleError> {
    let mut secret = SecretState::new("abate", true)?;
    secret.score("abbey")?;

    assert_matches!(
        worst_solve(&secret, &words(&["abate", "agora"])),
        Err(WordleError::IllegalGuess { guess, .. }) if guess == "agora"
    );
    Ok(())
}

#[test]
fn run_worst_solve_replays_feedback() -> Result<(), WordleError> {
    let solve = run_worst_solve(&words(&["abc", "abd", "abe"]), "ABE")?;

    assert_eq!(solve.secret.as_ref(), "abe");
    assert_eq!(solve.len(), 3);
    assert_eq!(
        solve.to_string(),
        "abe (3 guesses): abc (GGX), abd (GGX), abe (GGG)"
    );
    Ok(())
}

#[test]
fn run_worst_solve_matches_worst_solve() -> Result<(), WordleError> {
    let vocabulary = vocabulary();
    let secret = SecretState::new("froze", true)?;

    let solve = run_worst_solve(&vocabulary, "froze")?;
    let mut chain = worst_solve(&secret, &vocabulary)?;
    chain.reverse();

    assert_eq!(solve.words(), chain);
    assert!(solve.guesses.last().map_or(false, |last| is_solved(&last.results)));
    Ok(())
}

#[test]
fn run_worst_solve_checks_vocabulary() {
    assert_matches!(
        run_worst_solve(&[], "froze"),
        Err(WordleError::EmptyCandidatePool)
    );
    assert_matches!(
        run_worst_solve(&words(&["alpha", "omega"]), "froze"),
        Err(WordleError::SecretNotInPool(word)) if word == "froze"
    );
    assert_matches!(
        run_worst_solve(&words(&["froze", "heel"]), "froze"),
        Err(WordleError::LengthMismatch {
            expected: 5,
            actual: 4
        })
    );
    assert_matches!(
        run_worst_solve(&vocabulary(), ""),
        Err(WordleError::EmptyWord)
    );
}

#[test]
fn run_worst_solves_covers_every_secret() -> Result<(), WordleError> {
    let vocabulary = vocabulary();

    let solves = run_worst_solves(&vocabulary, &vocabulary)?;

    assert_eq!(solves.len(), vocabulary.len());
    for (secret, solve) in vocabulary.iter().zip(solves.iter()) {
        assert_eq!(&solve.secret, secret);
        assert_eq!(solve.guesses, run_worst_solve(&vocabulary, secret)?.guesses);
    }
    let worst = longest(&solves).map(WorstSolve::len);
    assert_eq!(worst, solves.iter().map(WorstSolve::len).max());
    Ok(())
}

#[test]
fn longest_prefers_first_secret_on_ties() {
    let solve = |secret: &str, len: usize| WorstSolve {
        secret: Arc::from(secret),
        guesses: vec![
            ScoredGuess {
                guess: Arc::from(secret),
                results: vec![LetterResult::Exact; 3],
            };
            len
        ],
        elapsed: Duration::ZERO,
    };
    let solves = vec![solve("xyz", 2), solve("abc", 3), solve("abd", 3), solve("aaa", 1)];

    assert_eq!(longest(&solves).map(|s| s.secret.as_ref()), Some("abc"));
    assert_eq!(longest(&[]), None);
}
