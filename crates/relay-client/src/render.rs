use crate::client::FormOutcome;

/// Usage notes printed when the interactive form starts.
pub const INSTRUCTIONS: &str = "\
1. Make sure the relay backend is running (`relay serve`)
2. Enter the backend URL (default: http://localhost:8000)
3. Enter any text value you want to send to the Lambda function
4. Submit and view the response from your Lambda function below";

const INPUT_HEADER: &str = "Input Sent";
const RESPONSE_HEADER: &str = "Lambda Response";

/// Human-readable rendering of one submission's outcome.
pub fn render(outcome: &FormOutcome) -> String {
    match outcome {
        FormOutcome::Invalid(msg) => msg.clone(),
        FormOutcome::Success {
            input_received,
            lambda_response,
        } => {
            let pretty = serde_json::to_string_pretty(lambda_response)
                .unwrap_or_else(|_| lambda_response.to_string());
            format!(
                "✅ Lambda function invoked successfully!\n\n{}",
                side_by_side(INPUT_HEADER, input_received, RESPONSE_HEADER, &pretty)
            )
        }
        FormOutcome::HttpError { status, body } => format!("❌ Error: {status}\n{body}"),
        FormOutcome::Unreachable => {
            "❌ Could not connect to the relay backend. Make sure it's running!".to_string()
        }
        FormOutcome::TimedOut => {
            "❌ Request timed out. The Lambda function might be taking too long.".to_string()
        }
        FormOutcome::Unexpected(msg) => format!("❌ Unexpected error: {msg}"),
    }
}

/// Lay two titled text blocks out as columns separated by `│`.
pub fn side_by_side(left_title: &str, left: &str, right_title: &str, right: &str) -> String {
    let left_lines: Vec<&str> = std::iter::once(left_title).chain(left.lines()).collect();
    let right_lines: Vec<&str> = std::iter::once(right_title).chain(right.lines()).collect();
    let width = left_lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    let rows = left_lines.len().max(right_lines.len());
    let mut out = String::new();
    for i in 0..rows {
        let l = left_lines.get(i).copied().unwrap_or("");
        let r = right_lines.get(i).copied().unwrap_or("");
        let pad = width - l.chars().count();
        let line = format!("{l}{} │ {r}", " ".repeat(pad));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
