//! Serve 命令 - 启动中继服务器
//!
//! 此模块实现 `serve` 命令，启动 HTTP 服务器并把聊天请求转发给上游补全 API。

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::gateway::{self, AppState};
use crate::providers::{GroqClient, GROQ_MODEL};

/// 执行服务器启动命令
///
/// # 参数
///
/// * `config` - 应用配置，包含监听地址、端口和上游密钥
///
/// # 功能
///
/// - 创建上游补全客户端（不校验密钥），整个进程共用一个
/// - 启动服务器并等待关闭信号（Ctrl+C 或 SIGTERM）
pub async fn serve_command(config: Config) -> Result<()> {
    let addr = listen_addr(&config)?;
    let state = build_state(&config)?;

    tracing::info!(model = GROQ_MODEL, upstream = %config.base_url, "Starting relay");
    gateway::serve(addr, state).await
}

fn listen_addr(config: &Config) -> Result<SocketAddr> {
    format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))
}

fn build_state(config: &Config) -> Result<AppState> {
    let client = GroqClient::new(config.api_key.clone(), &config.base_url)?;
    Ok(AppState::new(Arc::new(client), GROQ_MODEL))
}
