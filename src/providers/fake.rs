//! 测试用补全客户端，记录每次调用

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use crate::providers::{
    ChatMessage, Choice, ChoiceMessage, CompletionClient, CompletionResponse,
};

enum Reply {
    Text(String),
    Failure(String),
    Empty,
}

pub struct FakeClient {
    reply: Reply,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeClient {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    pub fn failing(error: &str) -> Self {
        Self::with_reply(Reply::Failure(error.to_string()))
    }

    pub fn without_choices() -> Self {
        Self::with_reply(Reply::Empty)
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeClient {
    fn name(&self) -> &str {
        "fake"
    }

    async fn create_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<CompletionResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));

        match &self.reply {
            Reply::Text(text) => Ok(CompletionResponse {
                choices: vec![Choice {
                    message: ChoiceMessage {
                        content: Some(text.clone()),
                    },
                }],
            }),
            Reply::Failure(error) => Err(anyhow::anyhow!("{}", error)),
            Reply::Empty => Ok(CompletionResponse::default()),
        }
    }
}
