//! Workflow state for the SQL agent.
//!
//! The agent threads a single [`AgentState`] record through its steps. Each
//! step returns a [`StateUpdate`] naming only the fields it owns; the
//! controller merges updates into the accumulated state. This keeps every
//! step's write set explicit and testable in isolation.

use serde::{Deserialize, Serialize};

/// Accumulated workflow state for one question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// The user's natural-language question.
    pub question: String,
    /// Rendered schema text, one line per table.
    pub schema: String,
    /// The current drafted SQL statement, fences stripped.
    pub sql_query: String,
    /// Gate verdict for `sql_query`. Meaningful only after the gate has
    /// run; a statement is treated as unsafe until then.
    pub sql_safe: bool,
    /// Execution output, then overwritten by the summarizer with the final
    /// prose answer. `None` until the executor or summarizer has run.
    pub result: Option<String>,
    /// Most recent error text. Empty means no pending error.
    pub error: String,
    /// Number of drafting attempts so far. Never resets within a run.
    pub retry_count: u32,
}

impl AgentState {
    /// Creates the initial state for a question.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    /// Merges a partial update into this state.
    ///
    /// Only fields present in the update are written; everything else keeps
    /// its accumulated value.
    pub fn apply(&mut self, update: &StateUpdate) {
        if let Some(schema) = &update.schema {
            self.schema = schema.clone();
        }
        if let Some(sql_query) = &update.sql_query {
            self.sql_query = sql_query.clone();
        }
        if let Some(sql_safe) = update.sql_safe {
            self.sql_safe = sql_safe;
        }
        if let Some(result) = &update.result {
            self.result = Some(result.clone());
        }
        if let Some(error) = &update.error {
            self.error = error.clone();
        }
        if let Some(retry_count) = update.retry_count {
            self.retry_count = retry_count;
        }
    }

    /// Returns the final answer, if the summarizer has produced one.
    pub fn answer(&self) -> Option<&str> {
        self.result.as_deref()
    }
}

/// A partial state record produced by a single step.
///
/// `None` means "not written by this step". An explicitly empty string is a
/// real write: successful steps clear `error` this way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub schema: Option<String>,
    pub sql_query: Option<String>,
    pub sql_safe: Option<bool>,
    pub result: Option<String>,
    pub error: Option<String>,
    pub retry_count: Option<u32>,
}

impl StateUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_sql_query(mut self, sql: impl Into<String>) -> Self {
        self.sql_query = Some(sql.into());
        self
    }

    pub fn with_sql_safe(mut self, safe: bool) -> Self {
        self.sql_safe = Some(safe);
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = Some(count);
        self
    }
}

/// Identifies a workflow step in progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    FetchSchema,
    DraftSql,
    CheckSecurity,
    ExecuteSql,
    Summarize,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FetchSchema => "fetch_schema",
            Self::DraftSql => "draft_sql",
            Self::CheckSecurity => "check_security",
            Self::ExecuteSql => "execute_sql",
            Self::Summarize => "summarize",
        };
        write!(f, "{}", name)
    }
}
