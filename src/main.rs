//! # Crossword solver
//!
//! A command-line crossword fill-in solver. A puzzle is a grid structure
//! file plus a word list; the solver models the puzzle as a binary
//! constraint-satisfaction problem, propagates crossing constraints to a
//! fixpoint with AC-3, and completes the fill with heuristic backtracking
//! search.
//!
//! ## Features
//!
//! -   **Structure files**: one row per line, `_` marks an open cell,
//!     anything else a blocked one.
//! -   **Word lists**: one candidate word per line; case and duplicates
//!     are normalized away.
//! -   **Verification**: a found fill is independently re-checked against
//!     the grid constraints.
//! -   **Statistics**: parse time, candidate counts before and after
//!     propagation, decisions, backtracks, and memory usage.
//! -   **Deterministic**: the same puzzle and word list always produce the
//!     same fill.
//! -   **Memory Management**: uses `tikv-jemallocator` for memory
//!     allocation and provides memory usage statistics.
//!
//! ## Usage
//!
//! ```sh
//! # Fill a single puzzle
//! crossword_solver solve --structure puzzle.grid --words words.txt
//!
//! # Write the rendered fill to a file as well
//! crossword_solver solve --structure puzzle.grid --words words.txt -o fill.txt
//!
//! # Fill every .grid file under a directory against one word list
//! crossword_solver dir --path puzzles/ --words words.txt
//!
//! # Abort long searches after 5 seconds
//! crossword_solver solve --structure big.grid --words words.txt --timeout-ms 5000
//!
//! # Generate shell completions
//! crossword_solver completions bash
//! ```

use clap::{CommandFactory, Parser};
use command_line::cli::{Cli, Commands};
use env_logger::Env;

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            structure,
            words,
            output,
            common,
        } => command_line::cli::solve_puzzle(&structure, &words, output.as_deref(), &common),
        Commands::Dir {
            path,
            words,
            common,
        } => command_line::cli::solve_dir(&path, &words, &common),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
