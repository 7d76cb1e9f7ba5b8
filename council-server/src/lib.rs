pub mod config;
pub mod http;
pub mod mcp;
pub mod widget;
