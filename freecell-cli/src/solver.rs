mod utils;

use crate::utils::*;

use anyhow::{Context, Result};
use clap::Parser;
use freecell_common::{action::format_actions, board::Board};
use freecell_solver::{SolverConfig, Strategy};

use std::{path::PathBuf, time::Duration};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Search method: breadth, depth, best or astar
    method: Strategy,
    /// Path to the deal file
    input: PathBuf,
    /// Where to write the solution (stdout when omitted)
    output: Option<PathBuf>,
    /// Give up after this many seconds
    #[arg(short, long, default_value_t = 300, value_name = "SECS")]
    timeout: u64,
    /// Max search states to create before reporting memory exhaustion
    #[arg(short = 's', long, default_value_t = 1_000_000, value_name = "NUM")]
    max_states: usize,
    /// Preview the deal without solving
    #[arg(short, long)]
    preview: bool,
    /// Print every move with the piles it connects
    #[arg(long)]
    steps: bool,
}

fn main() -> Result<()> {
    let Cli {
        method,
        input,
        output,
        timeout,
        max_states,
        preview,
        steps,
    } = Cli::parse();

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let board = Board::parse(&content).context("Failed to parse deal")?;
    if preview {
        println!("{}", board.pretty_print());
        return Ok(());
    }

    println!("Solving {} using {method}...", input.display());
    let config = SolverConfig {
        strategy: method,
        timeout: Duration::from_secs(timeout),
        max_states,
    };
    let Some(actions) = do_solve(board.clone(), config)? else {
        return Ok(());
    };
    if steps {
        print_steps(&board, &actions)?;
    }

    let solution = format_actions(&actions);
    match output {
        Some(path) => {
            std::fs::write(&path, solution)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            println!("Solution written to {}", path.display());
        }
        None => print!("{solution}"),
    }
    Ok(())
}
