//! Chat API 处理器

use anyhow::{anyhow, Context};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::{handlers::ApiError, state::AppState};
use crate::providers::ChatMessage;

const MESSAGE_REQUIRED: &str = "Message is required";

/// 校验后的聊天请求
#[derive(Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    /// 从原始请求体中提取 `message`
    ///
    /// `message` 缺失或为假值（null、false、0、空字符串、空数组、空对象）时返回校验错误；
    /// 请求体不是 JSON 对象或 `message` 是非空的非字符串值时返回内部错误
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let payload: Value =
            serde_json::from_slice(body).context("Failed to parse request body as JSON")?;
        let object = payload
            .as_object()
            .ok_or_else(|| anyhow!("Request body must be a JSON object"))?;

        match object.get("message") {
            None => Err(ApiError::Validation(MESSAGE_REQUIRED)),
            Some(value) if is_falsy(value) => Err(ApiError::Validation(MESSAGE_REQUIRED)),
            Some(Value::String(message)) => Ok(Self {
                message: message.clone(),
            }),
            Some(other) => Err(anyhow!("message must be a string, got {}", other).into()),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// 请求必须声明 JSON 类型（`application/json` 或 `application/*+json`）
fn ensure_json_content_type(headers: &HeaderMap) -> anyhow::Result<()> {
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();

    let is_json = mime == "application/json"
        || (mime.starts_with("application/") && mime.ends_with("+json"));

    if !is_json {
        anyhow::bail!("Request Content-Type was not 'application/json'");
    }
    Ok(())
}

/// 成功响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
}

/// POST /api/chat 处理器
///
/// 请求体读取失败（如超出大小限制）、Content-Type 不对、JSON 解析失败都走统一的 500 响应
pub async fn handle_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let body = body?;
    ensure_json_content_type(&headers)?;
    let request = ChatRequest::from_body(&body)?;

    tracing::info!(
        client = state.client().name(),
        model = state.model(),
        "request"
    );

    let messages = [ChatMessage::user(request.message)];
    let completion = state
        .client()
        .create_completion(state.model(), &messages)
        .await?;
    let response = completion.first_text()?;

    Ok(Json(ChatResponse {
        response,
        success: true,
    }))
}
