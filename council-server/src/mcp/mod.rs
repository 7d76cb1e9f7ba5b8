mod context;
pub mod envelope;
pub mod error;
mod handlers;
pub mod resources;
pub mod router;
mod server;
pub mod tools;
pub mod types;

// Re-export public items
pub use context::ServerContext;
pub use error::{RpcError, RpcResult};
pub use handlers::{create_router, LATEST_PROTOCOL_VERSION};
pub use server::MCPServer;
pub use types::{MCPError, MCPRequest, MCPResponse};
