#![cfg_attr(feature = "unstable", feature(test))]

//! Scores guesses for a word-guessing game, and searches for the longest sequence of legal
//! hard-mode guesses a solver could make before it is forced to guess the secret.

mod constraints;
mod data;
mod engine;
mod results;
mod search;
mod secret;

pub use constraints::Constraint;
pub use constraints::Constraints;
pub use data::WordBank;
pub use engine::*;
pub use results::*;
pub use search::*;
pub use secret::SecretState;
