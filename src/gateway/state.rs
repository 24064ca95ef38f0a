//! Gateway 应用状态

use std::sync::Arc;

use crate::providers::CompletionClient;

/// Gateway 应用状态
///
/// 启动时构建一次，之后只读
#[derive(Clone)]
pub struct AppState {
    client: Arc<dyn CompletionClient>,
    model: Arc<str>,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn client(&self) -> &dyn CompletionClient {
        self.client.as_ref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
