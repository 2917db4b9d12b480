//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before stopping the chain, Reply ending the handle phase and reaching after(),
//! Ignore falling through to the next handler, and before/after ordering.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dbot_core::{Chat, Handler, HandlerResponse, Message, User};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        message_type: "text".to_string(),
        voice: None,
        created_at: Utc::now(),
    }
}

struct CountingHandler {
    handle_count: Arc<AtomicUsize>,
    response: HandlerResponse,
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// **Test: An empty chain returns Continue.**
#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let result = chain.handle(&create_test_message("hi")).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}

/// **Test: Handler before returns false stops the chain; handle is not run.**
///
/// **Expected:** result is Stop; handle_count=0.
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Ignore passes to the next handler; Reply ends the handle phase and reaches after().**
///
/// **Setup:** Ignore handler → Reply handler → Continue handler; a capturing handler first.
/// **Expected:** Reply returned; third handler never runs; capturing after() sees the reply text.
#[tokio::test]
async fn test_ignore_falls_through_and_reply_stops() {
    struct CaptureHandler {
        seen: Arc<Mutex<Option<HandlerResponse>>>,
    }

    #[async_trait::async_trait]
    impl Handler for CaptureHandler {
        async fn after(
            &self,
            _message: &Message,
            response: &HandlerResponse,
        ) -> dbot_core::Result<()> {
            *self.seen.lock().unwrap() = Some(response.clone());
            Ok(())
        }
    }

    let seen = Arc::new(Mutex::new(None));
    let ignore_count = Arc::new(AtomicUsize::new(0));
    let reply_count = Arc::new(AtomicUsize::new(0));
    let tail_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureHandler { seen: seen.clone() }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: ignore_count.clone(),
            response: HandlerResponse::Ignore,
        }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: reply_count.clone(),
            response: HandlerResponse::Reply("Готово".to_string()),
        }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: tail_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("Готово".to_string()));
    assert_eq!(ignore_count.load(Ordering::SeqCst), 1);
    assert_eq!(reply_count.load(Ordering::SeqCst), 1);
    assert_eq!(tail_count.load(Ordering::SeqCst), 0);
    assert_eq!(
        *seen.lock().unwrap(),
        Some(HandlerResponse::Reply("Готово".to_string()))
    );
}

/// **Test: before runs first→last, after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    struct OrderHandler {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(
            &self,
            _message: &Message,
            _response: &HandlerResponse,
        ) -> dbot_core::Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let order = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(chain.len(), 2);
    assert_eq!(
        *order.lock().unwrap(),
        vec!["before_first", "before_second", "after_second", "after_first"]
    );
}

/// **Test: An error from handle() propagates and later handlers are not run.**
///
/// **Setup:** FailingHandler (returns DbotError::Bot) followed by a CountingHandler.
/// **Expected:** chain returns Err(Bot); handle_count=0.
#[tokio::test]
async fn test_handle_error_propagates() {
    struct FailingHandler;

    #[async_trait::async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Err(dbot_core::DbotError::Bot("send failed".to_string()))
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(FailingHandler))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Stop,
        }));

    let result = chain.handle(&create_test_message("hi")).await;

    assert!(matches!(result, Err(dbot_core::DbotError::Bot(_))));
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}
