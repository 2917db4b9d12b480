//! Integration tests for [`openai_client::OpenAIClient`] against a local mock HTTP server.
//!
//! The client is pointed at mockito via `with_base_url`; no real OpenAI traffic.

use mockito::Matcher;
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CompletionOptions,
    OpenAIClient,
};

fn user_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestUserMessageArgs::default()
        .content(text)
        .build()
        .unwrap()
        .into()
}

const COMPLETION_BODY: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "created": 1700000000,
    "model": "gpt-4-turbo",
    "choices": [
        {
            "index": 0,
            "message": { "role": "assistant", "content": "  Привет! Чем помочь?  " },
            "finish_reason": "stop",
            "logprobs": null
        }
    ],
    "usage": { "prompt_tokens": 5, "completion_tokens": 4, "total_tokens": 9 }
}"#;

/// **Test: chat_completion sends model and knobs, returns the trimmed first choice.**
///
/// **Setup:** Mock `/chat/completions` expecting max_tokens=2000, temperature=0.5.
/// **Expected:** Reply text without surrounding whitespace; mock hit exactly once.
#[tokio::test]
async fn chat_completion_returns_trimmed_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJsonString(
            r#"{"model":"gpt-4-turbo","max_tokens":2000,"temperature":0.5}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-1234567".to_string(), server.url());
    let reply = client
        .chat_completion(
            "gpt-4-turbo",
            vec![user_message("Привет")],
            CompletionOptions {
                max_tokens: 2000,
                temperature: 0.5,
            },
        )
        .await
        .unwrap();

    assert_eq!(reply, "Привет! Чем помочь?");
    mock.assert_async().await;
}

/// **Test: An API error response becomes an Err, not an empty reply.**
#[tokio::test]
async fn chat_completion_api_error_is_err() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"message":"bad request","type":"invalid_request_error","param":null,"code":null}}"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-1234567".to_string(), server.url());
    let result = client
        .chat_completion("gpt-4-turbo", vec![user_message("hi")], CompletionOptions::default())
        .await;

    assert!(result.is_err());
}

/// **Test: A response without choices is reported as an error.**
#[tokio::test]
async fn chat_completion_without_choices_is_err() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"chatcmpl-2","object":"chat.completion","created":1700000000,"model":"gpt-4-turbo","choices":[]}"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("sk-test-key-1234567".to_string(), server.url());
    let result = client
        .chat_completion("gpt-4-turbo", vec![user_message("hi")], CompletionOptions::default())
        .await;

    assert!(result.is_err());
}

#[test]
fn default_options_match_conversation_knobs() {
    let options = CompletionOptions::default();
    assert_eq!(options.max_tokens, 1000);
    assert!((options.temperature - 0.7).abs() < f32::EPSILON);
}
