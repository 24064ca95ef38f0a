//! 上游补全 API 抽象层
//!
//! 定义补全客户端的统一接口和消息类型

#[cfg(test)]
pub mod fake;
pub mod groq;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use groq::{GroqClient, GROQ_MODEL};

/// 消息角色，中继只发送单轮 user 消息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// 带角色标记的聊天消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// 补全请求体
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

/// 补全响应（只保留中继需要的字段）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// 单个补全候选
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// 取第一个候选的文本内容
    ///
    /// 没有候选或内容为 null 时返回 `Err`
    pub fn first_text(self) -> Result<String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Upstream returned no completion choices"))?;

        choice
            .message
            .content
            .ok_or_else(|| anyhow::anyhow!("Upstream completion choice has no content"))
    }
}

/// CompletionClient Trait - 上游补全服务的统一接口
///
/// 进程内只创建一次，只读共享给所有请求
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// 客户端名称（用于日志）
    fn name(&self) -> &str;

    /// 以给定模型和消息列表创建一次补全
    async fn create_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<CompletionResponse>;
}
