//! Interactive terminal rendition of the form client.
//!
//! Both fields persist between submissions; pressing Enter keeps the
//! current value. `:q` at the URL prompt or end of input leaves the loop.
//! The value prompt takes any text literally, `:q` included.

use relay_client::{render, FormClient, FormState, INSTRUCTIONS};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const QUIT: &str = ":q";

/// Run the prompt loop over `input` until the user quits, writing to `out`.
///
/// Returns the form as it stood when the loop ended.
pub async fn run<R, W>(
    client: &FormClient,
    mut form: FormState,
    input: R,
    out: &mut W,
) -> anyhow::Result<FormState>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "🚀 Lambda Function Invoker")?;
    writeln!(
        out,
        "Enter a value and submit it to invoke your AWS Lambda function via the relay backend"
    )?;
    writeln!(out)?;
    writeln!(out, "{INSTRUCTIONS}")?;
    writeln!(
        out,
        "(press Enter to keep the value in brackets, {QUIT} at the URL prompt to quit)"
    )?;
    writeln!(out)?;

    let mut lines = input.lines();

    loop {
        let label = format!("Backend URL [{}]: ", form.backend_url);
        let Some(url) = prompt(&mut lines, out, &label).await? else {
            break;
        };
        if url.trim() == QUIT {
            break;
        }
        if !url.trim().is_empty() {
            form.backend_url = url.trim().to_string();
        }

        let label = if form.value.is_empty() {
            "Input value: ".to_string()
        } else {
            format!("Input value [{}]: ", form.value)
        };
        let Some(value) = prompt(&mut lines, out, &label).await? else {
            break;
        };
        if !value.is_empty() {
            form.value = value;
        }

        writeln!(out, "⏳ Invoking Lambda function...")?;
        let outcome = client.submit(&form).await;
        writeln!(out, "{}", render(&outcome))?;
    }

    Ok(form)
}

async fn prompt<R, W>(lines: &mut Lines<R>, out: &mut W, label: &str) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{label}")?;
    out.flush()?;
    Ok(lines.next_line().await?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok_response() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lambda_response": {"ok": true},
            "input_received": "hello",
        }))
    }

    async fn drive(form: FormState, input: &str) -> (FormState, String) {
        let client = FormClient::new().unwrap();
        let mut out = Vec::new();
        let form = run(&client, form, input.as_bytes(), &mut out).await.unwrap();
        (form, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_fields_persist_between_submissions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoke-lambda"))
            .and(body_json(json!({"value": "hello"})))
            .respond_with(ok_response())
            .expect(2)
            .mount(&server)
            .await;

        // Second round presses Enter at both prompts.
        let input = format!("{}\nhello\n\n\n:q\n", server.uri());
        let (form, out) = drive(FormState::default(), &input).await;

        assert_eq!(form.backend_url, server.uri());
        assert_eq!(form.value, "hello");
        assert_eq!(out.matches("✅").count(), 2, "{out}");
        assert!(out.contains(&format!("Backend URL [{}]: ", server.uri())));
        assert!(out.contains("Input value [hello]: "));
    }

    #[tokio::test]
    async fn test_quit_at_url_prompt_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok_response())
            .expect(0)
            .mount(&server)
            .await;

        let form = FormState {
            backend_url: server.uri(),
            value: "hello".to_string(),
        };
        let (form, out) = drive(form, &format!("  {QUIT}  \n")).await;

        assert_eq!(form.value, "hello");
        assert!(!out.contains("Invoking"));
    }

    #[tokio::test]
    async fn test_quit_text_is_a_literal_value() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"value": ":q"})))
            .respond_with(ok_response())
            .expect(1)
            .mount(&server)
            .await;

        let input = format!("{}\n:q\n:q\n", server.uri());
        let (form, _) = drive(FormState::default(), &input).await;
        assert_eq!(form.value, ":q");
    }

    #[tokio::test]
    async fn test_eof_mid_form_stops_without_submitting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok_response())
            .expect(0)
            .mount(&server)
            .await;

        let (form, out) = drive(FormState::default(), &format!("{}\n", server.uri())).await;

        assert_eq!(form.backend_url, server.uri());
        assert!(out.ends_with("Input value: "), "{out}");
    }

    #[tokio::test]
    async fn test_blank_value_reports_validation_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok_response())
            .expect(0)
            .mount(&server)
            .await;

        let input = format!("{}\n\n", server.uri());
        let (_, out) = drive(FormState::default(), &input).await;
        assert!(out.contains(relay_client::MISSING_VALUE), "{out}");
    }
}
