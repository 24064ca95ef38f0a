//! HTTP 请求处理器

pub mod chat;
pub mod health;

pub use chat::handle_chat;
pub use health::handle_health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 请求边界上的错误类型
///
/// 校验失败映射为 400，其余任何失败映射为 500
#[derive(Debug)]
pub enum ApiError {
    Validation(&'static str),
    Internal(anyhow::Error),
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError::Internal(err.into())
    }
}

/// 校验错误响应，不带 success 字段
#[derive(Serialize)]
struct ValidationErrorBody {
    error: &'static str,
}

#[derive(Serialize)]
struct InternalErrorBody {
    error: String,
    success: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(error) => {
                (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { error })).into_response()
            }
            ApiError::Internal(err) => {
                let body = InternalErrorBody {
                    error: format!("{:#}", err),
                    success: false,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
