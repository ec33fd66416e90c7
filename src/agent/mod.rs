//! The SQL question-answering agent.
//!
//! Orchestrates a language model and a database client through a fixed
//! workflow: fetch schema, draft SQL, gate it, execute, retry a bounded
//! number of times on execution failure, and summarize the outcome in
//! prose. The model and the store are injected as trait objects; the
//! agent itself performs no I/O of its own.

pub mod flow;
pub mod state;
pub mod steps;

pub use flow::{next_phase, Phase, MAX_DRAFT_ATTEMPTS};
pub use state::{AgentState, StateUpdate, Step};

use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::db::DatabaseClient;
use crate::error::Result;
use crate::llm::LlmClient;

/// One progress event from a running workflow.
///
/// Events arrive in execution order; applying each `update` to an initial
/// state reproduces the agent's accumulated state at that point.
#[derive(Debug, Clone)]
pub struct StepEvent {
    /// The step that just completed.
    pub step: Step,
    /// The fields that step wrote.
    pub update: StateUpdate,
}

/// The workflow controller.
pub struct SqlAgent {
    llm: Arc<dyn LlmClient>,
    db: Arc<dyn DatabaseClient>,
}

impl SqlAgent {
    /// Creates an agent over the given model and store.
    pub fn new(llm: Arc<dyn LlmClient>, db: Arc<dyn DatabaseClient>) -> Self {
        Self { llm, db }
    }

    /// Runs the workflow for a question, yielding one event per completed
    /// step.
    ///
    /// A fatal failure (model call or schema inspection) is yielded as the
    /// final `Err` item and ends the stream. Recoverable conditions never
    /// surface here; they are routing inputs, visible in the updates.
    pub fn stream(&self, question: impl Into<String>) -> BoxStream<'static, Result<StepEvent>> {
        let (tx, rx) = mpsc::channel(16);
        let llm = Arc::clone(&self.llm);
        let db = Arc::clone(&self.db);
        let question = question.into();

        tokio::spawn(async move {
            drive_workflow(llm, db, question, tx).await;
        });

        futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        })
        .boxed()
    }

    /// Runs the workflow to completion and returns the final state.
    ///
    /// The answer is in `result`; `retry_count` and `error` tell the
    /// caller how the run went.
    pub async fn run(&self, question: impl Into<String>) -> Result<AgentState> {
        let question = question.into();
        let mut state = AgentState::new(question.clone());
        let mut events = self.stream(question);

        while let Some(event) = events.next().await {
            let event = event?;
            state.apply(&event.update);
        }

        Ok(state)
    }
}

/// Drives the workflow phase by phase, sending one event per step.
///
/// Stops when the run completes, a fatal error occurs, or the receiver is
/// dropped.
async fn drive_workflow(
    llm: Arc<dyn LlmClient>,
    db: Arc<dyn DatabaseClient>,
    question: String,
    tx: mpsc::Sender<Result<StepEvent>>,
) {
    let mut state = AgentState::new(question);
    let mut phase = Phase::FetchSchema;

    loop {
        let outcome: Result<(Step, StateUpdate)> = match phase {
            Phase::FetchSchema => steps::fetch_schema(db.as_ref())
                .await
                .map(|update| (Step::FetchSchema, update)),
            Phase::Draft => steps::draft_sql(llm.as_ref(), &state)
                .await
                .map(|update| (Step::DraftSql, update)),
            Phase::CheckSecurity => Ok((Step::CheckSecurity, steps::check_security(&state))),
            Phase::Execute => Ok((
                Step::ExecuteSql,
                steps::execute_sql(db.as_ref(), &state).await,
            )),
            Phase::Summarize => steps::summarize(llm.as_ref(), &state)
                .await
                .map(|update| (Step::Summarize, update)),
            Phase::Done => break,
        };

        match outcome {
            Ok((step, update)) => {
                state.apply(&update);
                info!(step = %step, retry_count = state.retry_count, "step completed");
                if tx.send(Ok(StepEvent { step, update })).await.is_err() {
                    // receiver dropped, nobody is listening
                    break;
                }
                phase = next_phase(phase, &state);
            }
            Err(e) => {
                let _ = tx.send(Err(e)).await;
                break;
            }
        }
    }
}
