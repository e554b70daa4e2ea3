mod command;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use todo_core::{ControllerConfig, FailurePolicy, LoadOutcome, DEFAULT_BASE_URL};
use todo_runtime::{RuntimeConfig, TodoStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use command::Command;

/// Load a todo list from the remote API, apply edits, print the result.
#[derive(Parser, Debug)]
#[command(name = "todo-cli")]
struct Args {
    /// Base URL of the collection; `/todos` is appended.
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    #[arg(long, env = "TODO_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Leave the loading flag on when the load fails.
    #[arg(long)]
    keep_loading_on_error: bool,

    #[arg(long, env = "TODO_LOG", default_value = "info")]
    log_filter: String,

    /// Start from an empty list instead of loading.
    #[arg(long)]
    skip_load: bool,

    /// Edits applied after the load: add:<title>, toggle:<id>, delete:<id>.
    commands: Vec<Command>,
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        let policy = if self.keep_loading_on_error {
            FailurePolicy::KeepLoading
        } else {
            FailurePolicy::Reset
        };
        RuntimeConfig::new(ControllerConfig::new(&self.api_url).with_failure_policy(policy))
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_filter)
        .with_context(|| format!("invalid log filter {:?}", args.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut store =
        TodoStore::connect(args.runtime_config()).context("failed to set up HTTP client")?;

    if !args.skip_load {
        store.load_from_api();
        for outcome in store.settle().await {
            match outcome {
                LoadOutcome::Applied { count } => info!(count, url = %args.api_url, "loaded todos"),
                LoadOutcome::Failed(err) => warn!(error = %err, "load failed, keeping local list"),
                LoadOutcome::Stale => {}
            }
        }
    }

    for command in &args.commands {
        command.apply(&mut store);
    }

    println!("{}", serde_json::to_string_pretty(&store.state())?);
    Ok(())
}
