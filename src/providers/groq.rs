//! Groq 补全客户端
//!
//! 通过 Groq 的 OpenAI 兼容接口 `/chat/completions` 发起单次补全

use anyhow::{Context, Result};
use async_trait::async_trait;
use http::{header, HeaderMap, HeaderValue};
use reqwest::Client;

use crate::providers::{ChatMessage, CompletionClient, CompletionRequest, CompletionResponse};
use crate::utils::build_http_client;

/// 中继固定使用的模型
pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

const COMPLETIONS_PATH: &str = "/chat/completions";

pub struct GroqClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl GroqClient {
    /// 创建客户端
    ///
    /// 不校验 `api_key`：空值或无效值只会在第一次调用上游时以错误形式出现
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        Ok(Self {
            http: build_http_client(&user_agent())?,
            api_key: api_key.into(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH),
        })
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    fn name(&self) -> &str {
        "groq"
    }

    async fn create_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<CompletionResponse> {
        let headers = build_headers(&self.api_key)?;
        let body = CompletionRequest { model, messages };

        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Groq API error {}: {}", status, error_body);
        }

        response
            .json()
            .await
            .context("Failed to parse Groq API response")
    }
}

fn user_agent() -> String {
    format!("chat-relay/{}", env!("CARGO_PKG_VERSION"))
}

fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    map.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("Invalid API key for header")?,
    );
    map.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    map.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": GROQ_MODEL,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn sends_single_user_message_with_fixed_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header_eq("authorization", "Bearer gsk_test"))
            .and(body_json(json!({
                "model": GROQ_MODEL,
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hi there!")))
            .expect(1)
            .mount(&server)
            .await;

        let client = GroqClient::new("gsk_test", &server.uri()).unwrap();
        let response = client
            .create_completion(GROQ_MODEL, &[ChatMessage::user("Hello")])
            .await
            .unwrap();

        assert_eq!(response.first_text().unwrap(), "Hi there!");
    }

    #[tokio::test]
    async fn upstream_rejection_detail_is_kept_in_the_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let client = GroqClient::new("bad-key", &server.uri()).unwrap();
        let err = client
            .create_completion(GROQ_MODEL, &[ChatMessage::user("Hello")])
            .await
            .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("401"));
        assert!(message.contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = GroqClient::new("gsk_test", &server.uri()).unwrap();
        let err = client
            .create_completion(GROQ_MODEL, &[ChatMessage::user("Hello")])
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to parse Groq API response"));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = GroqClient::new("gsk_test", &format!("{}/", server.uri())).unwrap();
        let response = client
            .create_completion(GROQ_MODEL, &[ChatMessage::user("ping")])
            .await
            .unwrap();

        assert_eq!(response.first_text().unwrap(), "ok");
    }

    #[test]
    fn empty_api_key_still_builds_headers() {
        let headers = build_headers("").unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer ");
    }
}
