//! The five workflow steps.
//!
//! Each step is a free function that reads the accumulated state and
//! returns a [`StateUpdate`] naming only the fields it owns. Model and
//! store failures that abort the run propagate as errors; recoverable
//! conditions (gate block, execution failure) are recorded in the update.

use tracing::{debug, warn};

use crate::agent::state::{AgentState, StateUpdate};
use crate::db::DatabaseClient;
use crate::error::Result;
use crate::llm::{extract_sql, prompt, LlmClient};
use crate::safety;

/// Literal placed in `result` when a statement returns zero rows.
pub const NO_DATA_MESSAGE: &str = "No data found.";

/// Inspects the store and renders the schema text.
///
/// Store failure here is fatal; without a schema the drafter has nothing
/// to work from.
pub async fn fetch_schema(db: &dyn DatabaseClient) -> Result<StateUpdate> {
    let schema = db.introspect_schema().await?;
    let rendered = schema.format_for_llm();
    debug!(tables = schema.tables.len(), "schema inspected");
    Ok(StateUpdate::new().with_schema(rendered))
}

/// Asks the model for a SQL statement answering the question.
///
/// A non-empty `state.error` marks this as a retry and is embedded in the
/// prompt so the model can correct the failed statement. Writes the fence
/// stripped statement and bumps the attempt counter; the pending error is
/// left for the gate or executor to overwrite.
pub async fn draft_sql(llm: &dyn LlmClient, state: &AgentState) -> Result<StateUpdate> {
    let messages = prompt::build_draft_messages(&state.schema, &state.question, &state.error);
    let response = llm.complete(&messages).await?;
    let sql = extract_sql(&response);
    debug!(attempt = state.retry_count + 1, sql = %sql, "statement drafted");

    Ok(StateUpdate::new()
        .with_sql_query(sql)
        .with_retry_count(state.retry_count + 1))
}

/// Runs the drafted statement through the keyword gate.
///
/// Pure; no I/O. A pass explicitly clears the error so a stale retry
/// message cannot leak into later steps.
pub fn check_security(state: &AgentState) -> StateUpdate {
    let verdict = safety::check_statement(&state.sql_query);
    if !verdict.safe {
        warn!(sql = %state.sql_query, error = %verdict.error, "statement blocked");
    }
    StateUpdate::new()
        .with_sql_safe(verdict.safe)
        .with_error(verdict.error)
}

/// Executes the gated statement against the store.
///
/// Execution failure is recoverable and is recorded in the update rather
/// than propagated, with an explicitly empty result so the field is always
/// present after this step.
pub async fn execute_sql(db: &dyn DatabaseClient, state: &AgentState) -> StateUpdate {
    match db.execute_query(&state.sql_query).await {
        Ok(result) if result.is_empty() => StateUpdate::new()
            .with_result(NO_DATA_MESSAGE)
            .with_error(""),
        Ok(result) => StateUpdate::new()
            .with_result(result.format_rows())
            .with_error(""),
        Err(e) => {
            warn!(error = %e, "execution failed");
            StateUpdate::new().with_result("").with_error(e.to_string())
        }
    }
}

/// Produces the final prose answer.
///
/// Runs exactly once per run, on every exit path, and overwrites `result`
/// with the model's response verbatim.
pub async fn summarize(llm: &dyn LlmClient, state: &AgentState) -> Result<StateUpdate> {
    let messages = prompt::build_summary_messages(
        &state.question,
        &state.sql_query,
        state.result.as_deref(),
        &state.error,
    );
    let answer = llm.complete(&messages).await?;
    Ok(StateUpdate::new().with_result(answer))
}
