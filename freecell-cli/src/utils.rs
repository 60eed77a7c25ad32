use anyhow::{Context, Result};
use freecell_common::{
    action::{Action, apply_action, describe_action},
    board::Board,
};
use freecell_solver::{Outcome, SolveResult, SolverConfig, solve};

use std::{
    io::{IsTerminal, Write, stderr},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

/// Runs the search and reports the outcome. Returns the moves when the deal
/// was solved.
pub fn do_solve(board: Board, config: SolverConfig) -> Result<Option<Vec<Action>>> {
    let message = format!("Searching ({})...", config.strategy);
    let outcome = with_spinner(&message, move || solve(board, config))?;
    match outcome {
        Outcome::Solved(SolveResult {
            strategy,
            states,
            expanded,
            elapsed,
            actions,
        }) => {
            let elapsed_str = format_elapsed(elapsed);
            println!(
                "✓ Solved in {} Moves — Method: {strategy}, Time: {elapsed_str}, States: {states}, Expanded: {expanded}\n",
                actions.len()
            );
            Ok(Some(actions))
        }
        Outcome::Unsolved {
            states,
            expanded,
            elapsed,
        } => {
            let elapsed_str = format_elapsed(elapsed);
            println!(
                "✗ No solution exists — Time: {elapsed_str}, States: {states}, Expanded: {expanded}"
            );
            Ok(None)
        }
    }
}

/// Replays `actions` from `board`, printing the piles each move connects.
pub fn print_steps(board: &Board, actions: &[Action]) -> Result<()> {
    let mut board = board.clone();
    for (step, action) in actions.iter().enumerate() {
        let description = describe_action(&board, action)
            .with_context(|| format!("Step {} '{action}' cannot be replayed", step + 1))?;
        println!("{:>4}. {:<20} {description}", step + 1, action.to_string());
        apply_action(&mut board, action)?;
    }
    println!();
    Ok(())
}

fn with_spinner<T, F: FnOnce() -> T>(message: &str, f: F) -> T {
    if stderr().is_terminal() {
        let spinning = Arc::new(AtomicBool::new(true));
        let spinning_clone = Arc::clone(&spinning);
        let message = message.to_string();

        let handle = std::thread::spawn(move || {
            let spinner_chars = ['|', '/', '-', '\\'];
            let mut i = 0;
            let stderr = stderr();
            let mut handle = stderr.lock();

            let _ = write!(handle, "\x1b[?25l"); // hide cursor
            let _ = handle.flush();

            while spinning_clone.load(Ordering::Relaxed) {
                let spinner_char = spinner_chars[i % spinner_chars.len()];
                let _ = write!(handle, "\r{spinner_char} {message}");
                let _ = handle.flush();
                std::thread::sleep(Duration::from_millis(100));
                i += 1;
            }

            let _ = write!(handle, "\r\x1b[2K\r\x1b[?25h"); // clear line and show cursor
            let _ = handle.flush();
        });

        let result = f();
        spinning.store(false, Ordering::Relaxed);
        let _ = handle.join();
        result
    } else {
        f()
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 90 {
        let ms = elapsed.subsec_millis();
        format!("{secs}.{ms:03}s")
    } else {
        let minutes = secs / 60;
        let secs = secs % 60;
        format!("{minutes}m {secs}s")
    }
}
