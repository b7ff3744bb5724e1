#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use crossword_solver::crossword::parse::{load_structure, load_words};
use crossword_solver::crossword::render::render_assignment;
use crossword_solver::crossword::solver::{CrosswordSolver, Solution, SolveStats, verify};
use log::info;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the crossword solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "crossword_solver", version, about = "A crossword fill-in puzzle solver")]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute (e.g. `solve`, `dir`).
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands for the crossword solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Fill a single puzzle from a structure file and a word list.
    Solve {
        /// Path to the structure file (`_` marks an open cell, anything
        /// else a blocked one).
        #[arg(long)]
        structure: PathBuf,

        /// Path to the word-list file (one candidate word per line).
        #[arg(long)]
        words: PathBuf,

        /// Optional path to write the rendered fill to.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Fill every `.grid` structure file under a directory against one
    /// shared word list.
    Dir {
        /// Path to the directory to walk for `.grid` files.
        #[arg(long)]
        path: PathBuf,

        /// Path to the word-list file used for every puzzle.
        #[arg(long)]
        words: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable verification of the found fill. If a fill is found, it's
    /// re-checked against the grid constraints.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the rendered fill if the puzzle is solvable.
    #[arg(short, long, default_value_t = true)]
    pub(crate) print_solution: bool,

    /// Abort the search after this many milliseconds. Reported as
    /// "aborted", distinct from "no solution".
    #[arg(long)]
    pub(crate) timeout_ms: Option<u64>,
}

/// Loads and solves a single puzzle, then reports the fill, verification
/// and statistics per `common`.
///
/// # Errors
///
/// File and structure errors as strings, for the top-level reporter.
pub(crate) fn solve_puzzle(
    structure: &Path,
    words_path: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = Instant::now();
    let grid = load_structure(structure).map_err(|e| e.to_string())?;
    let words = load_words(words_path).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    info!(
        "solving {} ({} slots, {} words)",
        structure.display(),
        grid.num_slots(),
        words.len()
    );

    epoch::advance().unwrap();

    let time = Instant::now();
    let mut solver = CrosswordSolver::new(&grid, &words);
    if let Some(ms) = common.timeout_ms {
        solver = solver.with_deadline(Instant::now() + Duration::from_millis(ms));
    }
    let solution = solver.solve();
    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    match &solution {
        Solution::Filled(assignment) => {
            if common.verify {
                let ok = verify(&grid, &words, assignment);
                println!("Verified: {ok:?}");
                assert!(ok, "Fill failed verification!");
            }

            if common.print_solution {
                print!("{}", render_assignment(&grid, &words, assignment));
            }

            if let Some(path) = output {
                let rendered = render_assignment(&grid, &words, assignment);
                if let Err(e) = std::fs::write(path, rendered) {
                    return Err(format!("Unable to write {}: {e}", path.display()));
                }
                println!("Fill written to: {}", path.display());
            }
        }
        Solution::NoSolution => println!("No solution."),
        Solution::Aborted => println!("Search aborted: deadline exceeded."),
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            solver.stats(),
            allocated_mib,
            resident_mib,
            &solution,
        );
    }

    Ok(())
}

/// Solves a directory of puzzles: every `.grid` file under `path`, each
/// against the same word list.
///
/// # Errors
///
/// If the path is not a directory, or any puzzle fails to load.
pub(crate) fn solve_dir(path: &Path, words: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "Provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "grid") {
            eprintln!("Skipping non-structure file: {}", file_path.display());
            continue;
        }

        solve_puzzle(file_path, words, None, common)?;
    }

    Ok(())
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    s: &SolveStats,
    allocated: f64,
    resident: f64,
    solution: &Solution,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Slots", s.slots);
    stat_line("Candidates (initial)", s.candidates_initial);
    stat_line("Candidates (post AC-3)", s.candidates_after_propagation);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    match solution {
        Solution::Filled(_) => println!("\nFILLED"),
        Solution::NoSolution => println!("\nUNSOLVABLE"),
        Solution::Aborted => println!("\nABORTED"),
    }
}
