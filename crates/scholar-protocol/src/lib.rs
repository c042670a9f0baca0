//! # scholar-protocol
//!
//! The generic tool-server contract: a registry of named operations with
//! JSON-schema-validated inputs, and a line-delimited JSON-RPC server loop
//! bound to stdin/stdout.
//!
//! Every Scholar server is the same shape: build a [`ToolRegistry`], register
//! handlers, hand it to a [`StdioServer`]. The registry guarantees that a
//! caller always receives a well-formed result with a status discriminator;
//! the only fatal condition is a request naming an unknown tool.

mod registry;
mod rpc;
mod server;

pub use registry::{ToolDefinition, ToolHandler, ToolRegistry};
pub use rpc::{CallParams, RpcError, RpcErrorResponse, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use server::StdioServer;
