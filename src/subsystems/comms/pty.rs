//! Console channel — reads lines from stdin, hands each to [`Friday`],
//! prints the reply to stdout.
//!
//! Runs until the user types `exit`/`quit` (any case) or stdin closes.
//! Nothing a turn does can end the loop early.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::error::AppError;
use crate::subsystems::agents::friday::Friday;

const EXIT_WORDS: &[&str] = &["exit", "quit"];

pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_WORDS.iter().any(|w| input.eq_ignore_ascii_case(w))
}

/// Interactive console on the process's stdin/stdout.
pub async fn run(friday: &Friday, name: &str) -> Result<(), AppError> {
    println!("─────────────────────────────────");
    println!(" {name} console  (type 'exit' to quit)");
    println!("─────────────────────────────────");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    run_with(friday, stdin, stdout.lock()).await
}

/// Drive the conversation over arbitrary input/output streams.
pub async fn run_with<R, W>(friday: &Friday, input: R, mut out: W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut turns = 0usize;

    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            info!(turns, "console input closed");
            writeln!(out)?;
            break;
        };

        let line = line.trim();
        if is_exit_command(line) {
            info!(turns, "exit requested");
            break;
        }

        debug!(input = %line, "console received line");
        let reply = friday.respond(line).await;
        writeln!(out, "FRIDAY: {reply}")?;
        out.flush()?;
        turns += 1;
    }

    Ok(())
}
