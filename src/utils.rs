use anyhow::{Context, Result};
use reqwest::Client;

/// 是否禁用 TLS 验证（用于调试 mitmproxy 等场景）
pub fn should_disable_tls_verify() -> bool {
    std::env::var("RELAY_DISABLE_TLS_VERIFY")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

#[inline]
fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// 构建上游 HTTP 客户端
///
/// 不设置请求超时：上游无响应时请求会一直挂起
pub fn build_http_client(user_agent: &str) -> Result<Client> {
    let mut builder = Client::builder().user_agent(user_agent);

    if should_disable_tls_verify() {
        tracing::warn!("TLS certificate verification is DISABLED - for debugging only!");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().context("Failed to create HTTP client")
}
