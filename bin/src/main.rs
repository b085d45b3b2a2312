use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rs_eldrow::*;
use std::error::Error;
use std::fs::File;
use std::io;
use std::time::Instant;

/// Plays Wordle in reverse: finds the longest run of legal hard-mode guesses a solver could be
/// forced to make before it guesses the secret word.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[clap(short = 'f', long)]
    words_file: String,

    /// Log search statistics, not just results. `RUST_LOG` takes precedence.
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the worst solve for a single secret word.
    Single { word: String },
    /// Find the worst solve for every word in the words file, and report the longest.
    All {
        /// Only use this many randomly chosen words, as both the secrets and the vocabulary.
        #[clap(short, long)]
        limit: Option<usize>,
        /// Seed used to choose the words when `--limit` is set.
        #[clap(short, long)]
        seed: Option<u64>,
        /// Number of worker threads. Defaults to one per CPU.
        #[clap(short = 'j', long)]
        threads: Option<usize>,
    },
    /// Play a game against the given word with each simulated solver.
    Play {
        word: String,
        /// Seed for the solvers' random choices.
        #[clap(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("File: {}", args.words_file);

    let words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(words_reader)?;
    println!("There are {} possible words.", word_bank.len());

    match args.command {
        Command::Single { word } => run_single(&word, &word_bank)?,
        Command::All {
            limit,
            seed,
            threads,
        } => run_all(&word_bank, limit, seed, threads)?,
        Command::Play { word, seed } => play_games(&word, &word_bank, seed)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_single(word: &str, word_bank: &WordBank) -> Result<(), WordleError> {
    let solve = run_worst_solve(word_bank, word)?;
    print_solve(&solve);
    Ok(())
}

fn run_all(
    word_bank: &WordBank,
    limit: Option<usize>,
    seed: Option<u64>,
    threads: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let vocabulary = match limit {
        Some(limit) => word_bank.sample(limit, seed),
        None => word_bank.clone(),
    };
    println!(
        "Solving {} secrets using {} words on {} threads...",
        vocabulary.len(),
        vocabulary.len(),
        rayon::current_num_threads()
    );

    let solves = run_worst_solves(&vocabulary, &vocabulary)?;
    match longest(&solves) {
        Some(solve) => {
            println!("Longest worst solve across all secrets:");
            print_solve(solve);
        }
        None => println!("There were no words to solve."),
    }
    Ok(())
}

fn print_solve(solve: &WorstSolve) {
    println!(
        "The worst solve for '{}' takes {} guesses ({:.3}s):",
        solve.secret,
        solve.len(),
        solve.elapsed.as_secs_f64()
    );
    for guess in solve.guesses.iter() {
        println!("\t{}", guess);
    }
}

fn play_games(word: &str, word_bank: &WordBank, seed: Option<u64>) -> Result<(), WordleError> {
    let max_num_guesses = word_bank.len() as u32;

    let result = play_game(
        word,
        max_num_guesses,
        ExhaustiveGuesser::new(word_bank, &mut create_rng(seed)),
    )?;
    print_game_result("Exhaustive", &result);

    let result = play_game(
        word,
        max_num_guesses,
        LegalHardModeGuesser::new(word_bank, create_rng(seed)),
    )?;
    print_game_result("Legal hard mode", &result);
    Ok(())
}

fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_game_result(name: &str, result: &GameResult) {
    match result {
        GameResult::Success(guesses) => {
            info!("{} solver succeeded", name);
            println!("{}: solved it in {} guesses.", name, guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::Failure(guesses) => {
            info!("{} solver failed", name);
            println!(
                "{}: still couldn't solve it after {} guesses :(",
                name,
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
    }
}
