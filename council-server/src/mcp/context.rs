use super::resources::ResourceRegistry;
use super::tools::ToolRegistry;
use super::types::ServerInfo;
use crate::widget::WidgetAssets;

/// Everything a handler may read. Built once at startup and shared
/// read-only between requests.
pub struct ServerContext {
    pub server_info: ServerInfo,
    pub tools: ToolRegistry,
    pub resources: ResourceRegistry,
}

impl ServerContext {
    pub fn new(assets: &WidgetAssets) -> Self {
        Self {
            server_info: ServerInfo {
                name: "your-ai-council".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolRegistry::builtin(),
            resources: ResourceRegistry::with_widget(assets),
        }
    }
}

impl Default for ServerContext {
    fn default() -> Self {
        Self::new(&WidgetAssets::default())
    }
}
