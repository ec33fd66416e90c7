//! Workflow routing for the SQL agent.
//!
//! The workflow is a fixed graph. [`next_phase`] is the single routing
//! function: given the phase that just finished and the accumulated state,
//! it names the phase to run next. Keeping routing pure makes the retry
//! boundary directly testable.

use crate::agent::state::AgentState;

/// Maximum number of drafting attempts per run.
///
/// The boundary is checked after execution, so the final draft still gets
/// executed; only its failure is terminal.
pub const MAX_DRAFT_ATTEMPTS: u32 = 3;

/// The phases of one workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FetchSchema,
    Draft,
    CheckSecurity,
    Execute,
    Summarize,
    Done,
}

/// Returns the phase to run after `completed`, given the accumulated state.
///
/// Routing rules:
/// - schema fetch always leads to drafting, drafting to the gate
/// - the gate routes to execution only when the statement passed
/// - after execution, a non-empty error with attempts remaining routes back
///   to drafting; otherwise the run summarizes
/// - summarization runs exactly once and ends the run
pub fn next_phase(completed: Phase, state: &AgentState) -> Phase {
    match completed {
        Phase::FetchSchema => Phase::Draft,
        Phase::Draft => Phase::CheckSecurity,
        Phase::CheckSecurity => {
            if state.sql_safe {
                Phase::Execute
            } else {
                Phase::Summarize
            }
        }
        Phase::Execute => {
            if !state.error.is_empty() && state.retry_count < MAX_DRAFT_ATTEMPTS {
                Phase::Draft
            } else {
                Phase::Summarize
            }
        }
        Phase::Summarize => Phase::Done,
        Phase::Done => Phase::Done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_after_execute(error: &str, retry_count: u32) -> AgentState {
        let mut state = AgentState::new("q");
        state.error = error.to_string();
        state.retry_count = retry_count;
        state
    }

    #[test]
    fn test_linear_edges() {
        let state = AgentState::new("q");
        assert_eq!(next_phase(Phase::FetchSchema, &state), Phase::Draft);
        assert_eq!(next_phase(Phase::Draft, &state), Phase::CheckSecurity);
        assert_eq!(next_phase(Phase::Summarize, &state), Phase::Done);
    }

    #[test]
    fn test_gate_pass_routes_to_execute() {
        let mut state = AgentState::new("q");
        state.sql_safe = true;
        assert_eq!(next_phase(Phase::CheckSecurity, &state), Phase::Execute);
    }

    #[test]
    fn test_gate_block_routes_to_summarize() {
        let mut state = AgentState::new("q");
        state.sql_safe = false;
        assert_eq!(next_phase(Phase::CheckSecurity, &state), Phase::Summarize);
    }

    #[test]
    fn test_execute_success_routes_to_summarize() {
        for count in [1, 2, 3] {
            let state = state_after_execute("", count);
            assert_eq!(next_phase(Phase::Execute, &state), Phase::Summarize);
        }
    }

    #[test]
    fn test_execute_failure_with_attempts_left_routes_to_draft() {
        for count in [0, 1, 2] {
            let state = state_after_execute("no such table: employes", count);
            assert_eq!(next_phase(Phase::Execute, &state), Phase::Draft);
        }
    }

    #[test]
    fn test_third_failure_routes_to_summarize() {
        let state = state_after_execute("no such table: employes", 3);
        assert_eq!(next_phase(Phase::Execute, &state), Phase::Summarize);
    }

    #[test]
    fn test_failure_past_boundary_routes_to_summarize() {
        let state = state_after_execute("boom", 4);
        assert_eq!(next_phase(Phase::Execute, &state), Phase::Summarize);
    }
}
