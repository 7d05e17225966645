//! Line-oriented read-eval loop over stdin.

use super::report;
use crate::orchestrator::Orchestrator;
use crate::ui::style;
use anyhow::Result;
use std::io::Write;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Empty,
    Quit,
    Help,
    Metrics,
    History,
    Rollback(Option<&'a str>),
    Submit(&'a str),
}

impl<'a> ReplCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (None, _, _) => Self::Empty,
            (Some("quit" | "exit"), None, _) => Self::Quit,
            (Some("help"), None, _) => Self::Help,
            (Some("metrics"), None, _) => Self::Metrics,
            (Some("history"), None, _) => Self::History,
            (Some("rollback"), id, None) => Self::Rollback(id),
            _ => Self::Submit(line),
        }
    }
}

/// Run against the process's stdin and stdout.
pub async fn run(orchestrator: &Orchestrator, json: bool) -> Result<()> {
    let stdin = BufReader::new(io::stdin());
    let stdout = std::io::stdout();
    run_with(orchestrator, stdin, &mut stdout.lock(), json).await
}

/// Read commands from `input` until EOF or `quit`/`exit`, then print a summary.
pub async fn run_with<R, W>(
    orchestrator: &Orchestrator,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "{} {}",
        style::header("orchestrate"),
        style::dim("(type `help` for commands, `quit` to leave)")
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} ", style::accent(">"))?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => writeln!(out, "{}", report::render_help())?,
            ReplCommand::Metrics => {
                writeln!(out, "{}", report::render_metrics(&orchestrator.metrics()))?;
            }
            ReplCommand::History => {
                writeln!(out, "{}", report::render_history(&orchestrator.history()))?;
            }
            ReplCommand::Rollback(None) => {
                writeln!(out, "{}", style::yellow("usage: rollback <ckpt-id>"))?;
            }
            ReplCommand::Rollback(Some(id)) => {
                let message = if orchestrator.rollback_to(id) {
                    style::success(format!("rolled back to {id}"))
                } else {
                    style::danger(format!("rollback to {id} failed"))
                };
                writeln!(out, "{message}")?;
            }
            ReplCommand::Submit(command) => {
                let outcome = orchestrator.submit(command);
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
                } else {
                    writeln!(out, "{}", report::render_outcome(&outcome))?;
                }
            }
        }
    }

    writeln!(out, "{}", report::render_metrics(&orchestrator.metrics()))?;
    Ok(())
}
