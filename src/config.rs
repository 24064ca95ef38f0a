//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - 上游 API 密钥
//! - 上游 API 基础地址

use anyhow::{Context, Result};

/// 默认监听地址
const DEFAULT_HOST: &str = "127.0.0.1";
/// 默认监听端口
const DEFAULT_PORT: &str = "5000";
/// Groq OpenAI 兼容接口的默认基础地址
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// 应用配置
///
/// 包含服务器运行所需的所有配置项
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 上游 API 密钥，启动时不做校验，缺失时为空字符串
    pub api_key: String,
    /// 上游 API 基础地址
    pub base_url: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `RELAY_HOST`: 服务器监听地址（默认: "127.0.0.1"）
    /// - `RELAY_PORT`: 服务器监听端口（默认: 5000）
    /// - `GROQ_API_KEY`: 上游 API 密钥（可缺失，首次调用上游时才会暴露错误）
    /// - `GROQ_BASE_URL`: 上游 API 基础地址（默认: Groq 官方地址）
    ///
    /// # 错误
    ///
    /// - 如果 `RELAY_PORT` 不是有效的端口号
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("RELAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("RELAY_PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
            .parse()
            .context("RELAY_PORT must be a valid port number")?;

        let api_key = lookup("GROQ_API_KEY").unwrap_or_default();

        let base_url = lookup("GROQ_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            host,
            port,
            api_key,
            base_url,
        })
    }

    /// 本地服务器的基础 URL
    pub fn local_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
