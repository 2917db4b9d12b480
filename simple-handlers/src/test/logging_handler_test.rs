//! Unit tests for LoggingHandler.

use super::sample_message;
use crate::LoggingHandler;
use dbot_core::{Handler, HandlerResponse};

#[tokio::test]
async fn test_logging_handler_before_continues() {
    let h = LoggingHandler;
    let msg = sample_message(1, "hello");
    let result = h.before(&msg).await;
    assert!(result.unwrap());
}

#[tokio::test]
async fn test_logging_handler_after_ok() {
    let h = LoggingHandler;
    let msg = sample_message(1, "hello");
    let response = HandlerResponse::Reply("hi".to_string());
    assert!(h.after(&msg, &response).await.is_ok());
}
