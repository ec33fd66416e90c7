//! askdb - Ask natural-language questions about a SQLite database.

use anyhow::Context;
use futures::StreamExt;
use std::sync::Arc;
use tracing::info;

use askdb::agent::{AgentState, SqlAgent, Step};
use askdb::cli::Cli;
use askdb::config::Config;
use askdb::db::{self, DatabaseBackend, DatabaseClient};
use askdb::llm::{self, LlmProvider};
use askdb::logging;

#[tokio::main]
async fn main() {
    // .env values become process env before anything reads it
    dotenvy::dotenv().ok();
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    // Precedence: CLI flags over config file values
    let provider: LlmProvider = cli
        .provider
        .as_deref()
        .unwrap_or(&config.llm.provider)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let model = cli.model.as_deref().or(config.llm.model.as_deref());

    let llm_client = llm::create_client(provider, cli.api_key.as_deref(), model)
        .with_context(|| format!("failed to create {} client", provider))?;

    let db_path = cli.database.as_deref().unwrap_or(&config.database.path);
    let store = db::connect(DatabaseBackend::Sqlite, db_path)
        .await
        .with_context(|| format!("failed to open database {}", db_path))?;
    let store: Arc<dyn DatabaseClient> = Arc::from(store);

    let agent = SqlAgent::new(llm_client, Arc::clone(&store));

    let mut state = AgentState::new(cli.question.clone());
    let mut events = agent.stream(cli.question.clone());

    while let Some(event) = events.next().await {
        let event = event.context("workflow failed")?;
        state.apply(&event.update);
        if !cli.quiet {
            print_progress(&event.step, &state);
        }
    }

    store.close().await.ok();

    match state.answer() {
        Some(answer) => {
            println!("{answer}");
            Ok(())
        }
        None => anyhow::bail!("workflow produced no answer"),
    }
}

/// Prints a one-line progress note for a completed step.
fn print_progress(step: &Step, state: &AgentState) {
    match step {
        Step::FetchSchema => eprintln!("* Inspecting schema"),
        Step::DraftSql => eprintln!(
            "* Drafting SQL (attempt {}): {}",
            state.retry_count, state.sql_query
        ),
        Step::CheckSecurity => {
            if state.sql_safe {
                eprintln!("* Safety check passed");
            } else {
                eprintln!("* Safety check blocked: {}", state.error);
            }
        }
        Step::ExecuteSql => {
            if state.error.is_empty() {
                eprintln!("* Query executed");
            } else {
                eprintln!("* Query failed: {}", state.error);
            }
        }
        Step::Summarize => eprintln!("* Summarizing"),
    }
}
