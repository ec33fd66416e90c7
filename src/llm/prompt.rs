//! Prompt construction for LLM requests.
//!
//! Builds the drafting prompt (schema + question + prior error) and the
//! summary prompt (question + statement + result + error).

use crate::llm::types::Message;

/// System prompt template for the SQL drafting step.
const DRAFT_SYSTEM_TEMPLATE: &str = r#"You are an expert SQLite data analyst. Generate a SQL statement that answers the user's question.

DATABASE SCHEMA:
{schema}

INSTRUCTIONS:
- Return ONLY the raw SQL statement
- Do not wrap the statement in markdown code fences
- Do not add explanations or commentary
- Generate only valid SQLite SQL"#;

/// System prompt for the result summary step.
const SUMMARY_SYSTEM_PROMPT: &str = "You are a data analyst reporting query results back to a \
non-technical user. Provide a professional, concise answer in prose.";

/// Placeholder used when no result text is available.
const NO_RESULT_PLACEHOLDER: &str = "N/A";

/// Builds the message list for a drafting request.
///
/// When `prior_error` is non-empty, the model is asked to correct it.
pub fn build_draft_messages(schema: &str, question: &str, prior_error: &str) -> Vec<Message> {
    let system = DRAFT_SYSTEM_TEMPLATE.replace("{schema}", schema);

    let user = if prior_error.is_empty() {
        format!("Question: \"{}\"", question)
    } else {
        format!(
            "Question: \"{}\"\n\nThe previous statement failed with this error: \"{}\"\nFix it.",
            question, prior_error
        )
    };

    vec![Message::system(system), Message::user(user)]
}

/// Builds the message list for a summary request.
///
/// Invoked on every exit path, so none of the fields may be assumed
/// non-empty. A result that was never produced (gate block) is reported
/// as not available; a present-but-empty result (failed execution) is
/// rendered as empty.
pub fn build_summary_messages(
    question: &str,
    statement: &str,
    result: Option<&str>,
    error: &str,
) -> Vec<Message> {
    let result_text = result.unwrap_or(NO_RESULT_PLACEHOLDER);

    let user = format!(
        "User question: {}\nSQL used: {}\nData found: {}\nError: {}",
        question, statement, result_text, error
    );

    vec![Message::system(SUMMARY_SYSTEM_PROMPT), Message::user(user)]
}
