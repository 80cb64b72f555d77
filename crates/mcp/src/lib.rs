// MCP (Model Context Protocol) server for the JDE configuration knowledge base
// Exposes tools, resources and prompts to agent clients over stdio

pub mod protocol;
pub mod schema;
pub mod server;

pub use server::McpServer;
