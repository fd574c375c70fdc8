//! Interactive CLI for the todo list.
//!
//! Reads one command per line from stdin and prints the list to stdout. Logs
//! go to stderr.

use std::error::Error;
use todos::cli::{self, Command};
use todos::{Config, TodoReducer, TodoStore};
use todostore_runtime::metrics;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let (config, rejected) = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_new(&config.log_filter);
    let filter_is_valid = filter.is_ok();
    tracing_subscriber::registry()
        .with(filter.unwrap_or_else(|_| EnvFilter::new(todos::config::DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    for error in &rejected {
        tracing::warn!(%error, "Invalid configuration value, using its default");
    }
    if !filter_is_valid {
        tracing::warn!(filter = %config.log_filter, "Invalid RUST_LOG filter, using the default");
    }

    let metrics = metrics::install_recorder()?;

    let store = TodoStore::with_config(
        config.initial_todos(),
        TodoReducer::new(),
        config.store_config(),
    );
    tracing::info!(seed = ?config.seed, todos = store.state(|t| t.len()), "Store ready");

    // Observer: logs every new list
    let mut updates = store.subscribe();
    let observer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let (total, done) = {
                let todos = updates.borrow_and_update();
                (todos.len(), todos.completed_count())
            };
            tracing::info!(total, done, "Todo list updated");
        }
    });

    println!("{}", store.state(cli::render));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(cli::CommandError::Empty) => continue,
            Err(error) => {
                eprintln!("{error}");
                continue;
            },
        };

        let mutates = command.mutates();
        match command {
            Command::Dispatch(intent) => store.send(intent),
            Command::Tagged(raw) => {
                if let Err(error) = store.try_send(raw.as_str()) {
                    eprintln!("Rejected: {error}");
                    continue;
                }
            },
            Command::List => println!("{}", store.state(cli::render)),
            Command::Metrics => println!("{}", metrics.render()),
            Command::Help => println!("{}", cli::HELP),
            Command::Quit => break,
        }

        if mutates {
            println!("{}", store.state(cli::render));
        }
    }

    // Dropping the last store handle closes the observer's channel
    drop(store);
    observer.await?;

    Ok(())
}
