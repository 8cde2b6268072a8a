//! Markdown rendering of evaluation sessions.

use super::EvaluationSession;

/// Render an evaluation session as a markdown report.
///
/// One section per model, in result order, with the response (or error)
/// fenced and the call metadata as a bullet list.
pub fn format_session(session: &EvaluationSession) -> String {
    let mut lines = vec![
        "# Prompt Evaluation Results".to_string(),
        String::new(),
        format!("**File:** `{}`", session.prompt_file),
        format!("**Test Case:** {}", session.test_case),
        format!("**Started:** {}", session.started_at.to_rfc3339()),
        format!(
            "**Completed:** {}",
            session
                .completed_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "In progress...".to_string())
        ),
        String::new(),
        "## Results".to_string(),
        String::new(),
    ];

    for result in &session.results {
        lines.push(format!("### {}", result.model));
        lines.push(String::new());

        if let Some(error) = &result.metadata.error {
            lines.push("❌ **Error:**".to_string());
            lines.push(format!("```\n{}\n```", error));
        } else {
            lines.push("✅ **Response:**".to_string());
            lines.push(format!("```\n{}\n```", result.response));
        }

        lines.push(String::new());
        lines.push("**Metadata:**".to_string());
        lines.push(format!("- Latency: {}ms", result.metadata.latency));
        lines.push(format!("- Tokens: {}", result.metadata.tokens));
        if let Some(cost) = result.metadata.cost_estimate {
            lines.push(format!("- Estimated Cost: ${:.4}", cost));
        }
        lines.push(format!("- Timestamp: {}", result.timestamp.to_rfc3339()));
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}
