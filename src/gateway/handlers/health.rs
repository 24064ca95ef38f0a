//! 健康检查处理器

use axum::Json;
use serde::{Deserialize, Serialize};

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /api/health
///
/// 只说明进程仍在接收连接，不检查上游或密钥
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
