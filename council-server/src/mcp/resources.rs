use tracing::info;

use super::error::{RpcError, RpcResult};
use super::types::{ReadResourceResult, Resource, TextResourceContents};
use crate::widget::{WidgetAssets, WIDGET_MIME_TYPE, WIDGET_URI};

struct RegisteredResource {
    descriptor: Resource,
    text: String,
}

/// Static resources known to the server, keyed by URI.
#[derive(Default)]
pub struct ResourceRegistry {
    entries: Vec<RegisteredResource>,
}

impl ResourceRegistry {
    pub fn with_widget(assets: &WidgetAssets) -> Self {
        let mut registry = Self::default();
        registry.register(
            Resource {
                uri: WIDGET_URI.to_string(),
                name: "Your AI Council Widget".to_string(),
                description: "Interactive widget that renders the council's advice".to_string(),
                mime_type: WIDGET_MIME_TYPE.to_string(),
            },
            assets.render_html(),
        );
        registry
    }

    pub fn register(&mut self, descriptor: Resource, text: String) {
        self.entries.push(RegisteredResource { descriptor, text });
    }

    pub fn descriptors(&self) -> Vec<Resource> {
        self.entries
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    pub fn read(&self, uri: &str) -> RpcResult<ReadResourceResult> {
        info!("Reading resource: {}", uri);

        let entry = self
            .entries
            .iter()
            .find(|entry| entry.descriptor.uri == uri)
            .ok_or_else(|| RpcError::ResourceNotFound(uri.to_string()))?;

        Ok(ReadResourceResult {
            contents: vec![TextResourceContents {
                uri: entry.descriptor.uri.clone(),
                mime_type: entry.descriptor.mime_type.clone(),
                text: entry.text.clone(),
            }],
        })
    }
}
