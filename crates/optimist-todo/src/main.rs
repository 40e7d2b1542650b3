//! Optimist todo demo entry point.
//!
//! A line-oriented terminal UI over the optimistic todo state: adds show up
//! immediately tagged pending, removes disappear immediately, and the
//! simulated server confirms or rejects after a latency window. Commands
//! overlap freely, so the documented last-settled-writer races are
//! observable by issuing calls faster than the latency.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use futures_signals::signal::SignalExt;
use optimist::OptimisticOptions;
use tokio::io::{AsyncBufReadExt, BufReader};

mod commands;
mod todo;

use commands::{parse_command, Command};
use todo::{ServerProfile, Todo, TodoStatus};

/// Terminal demo for optimistic updates.
#[derive(Debug, Parser)]
#[command(name = "optimist-todo", about = "Optimistic todo list demo")]
struct Args {
    /// Simulated server latency in milliseconds.
    #[arg(long, default_value_t = 800)]
    latency_ms: u64,

    /// Reject every remove after the latency window, demonstrating revert.
    #[arg(long)]
    fail_remove: bool,

    /// Keep speculative values on failure instead of reverting.
    #[arg(long)]
    no_revert: bool,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("  (no todos)");
        return;
    }
    for todo in todos {
        let marker = match todo.status {
            TodoStatus::Pending => "⌛",
            TodoStatus::Done => "✅",
        };
        println!("  {} {:>3}  {}", marker, todo.id, todo.text);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let options = OptimisticOptions {
        revert_optimistic_on_reject: !args.no_revert,
    };
    let server = ServerProfile {
        latency: Duration::from_millis(args.latency_ms),
        fail_remove: args.fail_remove,
    };
    let (state, updaters) = todo::todo_state(options, server);

    // The "UI": reprint the list on every optimistic change.
    tokio::spawn(state.optimistic().signal().for_each(|todos| {
        print_todos(&todos);
        async {}
    }));

    println!("commands: add <text> | rm <id> | ls | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Add(text)) => {
                let add = updaters.add.clone();
                tokio::spawn(async move {
                    if let Err(err) = add.call(text).await {
                        tracing::warn!(%err, "add failed");
                    }
                });
            }
            Ok(Command::Remove(id)) => {
                let remove = updaters.remove.clone();
                tokio::spawn(async move {
                    if let Err(err) = remove.call(id).await {
                        tracing::warn!(%err, "remove failed");
                    }
                });
            }
            Ok(Command::List) => print_todos(&state.optimistic().get()),
            Ok(Command::Quit) => break,
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}
