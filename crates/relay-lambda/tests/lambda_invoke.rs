#![allow(clippy::unwrap_used, clippy::expect_used)]
//! LambdaInvoker against a mocked Invoke API.

use relay_core::{InvocationEnvelope, InvokeError, LambdaConfig};
use relay_lambda::{Credentials, Invoker, LambdaInvoker};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INVOKE_PATH: &str = "/2015-03-31/functions/test-fn/invocations";

fn config_for(server: &MockServer) -> LambdaConfig {
    LambdaConfig {
        region: "us-east-1".to_string(),
        function_name: "test-fn".to_string(),
        endpoint_url: Some(server.uri()),
        timeout_secs: 5,
        ..LambdaConfig::default()
    }
}

fn test_credentials() -> Option<Credentials> {
    Some(Credentials::new("AKIDTEST", "secret", None))
}

#[tokio::test]
async fn invoke_sends_signed_envelope_and_decodes_payload() {
    let server = MockServer::start().await;
    let lambda_payload = json!({"statusCode": 200, "body": "{\"result\":\"ok\"}"});

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .and(header("x-amz-invocation-type", "RequestResponse"))
        .and(header("content-type", "application/json"))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(body_json(json!({
            "body": "{\"input_value\":\"hello\"}",
            "httpMethod": "POST",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(lambda_payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(config_for(&server), test_credentials()).unwrap();
    let envelope = InvocationEnvelope::wrap("hello").unwrap();
    let result = invoker.invoke(&envelope).await.unwrap();

    assert_eq!(result, lambda_payload);
}

#[tokio::test]
async fn function_error_payload_is_passed_through() {
    let server = MockServer::start().await;
    let error_payload = json!({"errorMessage": "boom", "errorType": "Exception"});

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-amz-function-error", "Unhandled")
                .set_body_json(error_payload.clone()),
        )
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(config_for(&server), test_credentials()).unwrap();
    let envelope = InvocationEnvelope::wrap("x").unwrap();
    assert_eq!(invoker.invoke(&envelope).await.unwrap(), error_payload);
}

#[tokio::test]
async fn non_success_status_is_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "Type": "User",
            "message": "Function not found: arn:aws:lambda:us-east-1:000000000000:function:test-fn"
        })))
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(config_for(&server), test_credentials()).unwrap();
    let envelope = InvocationEnvelope::wrap("x").unwrap();
    let err = invoker.invoke(&envelope).await.unwrap_err();

    match &err {
        InvokeError::Remote { status, message } => {
            assert_eq!(*status, 404);
            assert!(message.starts_with("Function not found"));
        }
        other => panic!("expected Remote, got {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn undecodable_payload_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(config_for(&server), test_credentials()).unwrap();
    let envelope = InvocationEnvelope::wrap("x").unwrap();
    let err = invoker.invoke(&envelope).await.unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn slow_function_is_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = LambdaConfig {
        timeout_secs: 1,
        ..config_for(&server)
    };
    let invoker = LambdaInvoker::new(config, test_credentials()).unwrap();
    let envelope = InvocationEnvelope::wrap("x").unwrap();
    let err = invoker.invoke(&envelope).await.unwrap_err();
    assert!(matches!(err, InvokeError::Timeout(_)), "got {err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn missing_credentials_fail_without_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let invoker = LambdaInvoker::new(config_for(&server), None).unwrap();
    let envelope = InvocationEnvelope::wrap("x").unwrap();
    let err = invoker.invoke(&envelope).await.unwrap_err();
    assert!(matches!(err, InvokeError::Envelope(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let config = LambdaConfig {
        function_name: "test-fn".to_string(),
        endpoint_url: Some("http://127.0.0.1:1".to_string()),
        timeout_secs: 5,
        ..LambdaConfig::default()
    };
    let invoker = LambdaInvoker::new(config, test_credentials()).unwrap();
    let envelope = InvocationEnvelope::wrap("x").unwrap();
    let err = invoker.invoke(&envelope).await.unwrap_err();
    assert_eq!(err.kind(), "transport");
}
