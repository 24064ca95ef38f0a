//! chat-relay - LLM 聊天中继服务
//!
//! 一个极简的 HTTP 中继：接收 JSON 聊天消息，原样转发给托管的
//! 大模型补全 API（Groq），并将生成的文本返回给调用方。
//!
//! # 功能特性
//!
//! - `POST /api/chat`：单轮聊天转发
//! - `GET /api/health`：进程存活检查
//! - 允许所有来源的跨域请求
//!
//! # 命令行接口
//!
//! - `serve`: 启动中继服务器
//! - `test`: 向本地服务器发送测试请求

mod commands;
mod config;
mod gateway;
mod providers;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// chat-relay CLI
#[derive(Parser)]
#[command(name = "chat-relay")]
#[command(about = "Minimal LLM chat relay service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动中继服务器
    Serve,
    /// 向本地服务器发送测试请求
    Test {
        /// 要发送的聊天消息
        #[arg(short, long, default_value = "Hello")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("RELAY_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    // 初始化日志系统
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Test { message } => commands::test_command(config, message).await,
    }
}
