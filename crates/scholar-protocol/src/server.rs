//! Stdio server loop
//!
//! One JSON request per line on stdin, one JSON response per line on stdout.
//! Diagnostics go to stderr via `tracing` so they never corrupt the
//! response stream.

use scholar_core::{Result, ScholarError};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use crate::registry::ToolRegistry;
use crate::rpc::{
    CallParams, RpcErrorResponse, RpcRequest, RpcResponse, INVALID_REQUEST, METHOD_NOT_FOUND,
};

/// A tool server bound to stdin/stdout
pub struct StdioServer {
    name: String,
    registry: ToolRegistry,
}

impl StdioServer {
    pub fn new(name: impl Into<String>, registry: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            registry,
        }
    }

    /// Serve requests until stdin closes
    ///
    /// Returns an error only for the fatal conditions: an unreadable stdio
    /// channel or a request naming an unknown tool.
    pub async fn run(self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut stdout = tokio::io::stdout();

        info!("{} server started and connected via STDIN/STDOUT", self.name);

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let request: RpcRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(e) => {
                    warn!("discarding unparseable request line: {}", e);
                    let resp =
                        RpcErrorResponse::new(Value::Null, INVALID_REQUEST, e.to_string());
                    write_line(&mut stdout, &serde_json::to_string(&resp)?).await?;
                    continue;
                }
            };

            let id = request.id.clone();
            match self.handle(request).await {
                Ok(result) => {
                    let resp = RpcResponse::new(id, result);
                    write_line(&mut stdout, &serde_json::to_string(&resp)?).await?;
                }
                Err(ScholarError::UnknownTool(name)) => {
                    error!("unknown tool requested: {}", name);
                    let resp = RpcErrorResponse::new(
                        id,
                        METHOD_NOT_FOUND,
                        format!("Unknown tool: {}", name),
                    );
                    write_line(&mut stdout, &serde_json::to_string(&resp)?).await?;
                    return Err(ScholarError::UnknownTool(name));
                }
                Err(e) => {
                    warn!("request failed: {}", e);
                    let resp = RpcErrorResponse::new(id, INVALID_REQUEST, e.to_string());
                    write_line(&mut stdout, &serde_json::to_string(&resp)?).await?;
                }
            }
        }

        info!("{} server shutting down (stdin closed)", self.name);
        Ok(())
    }

    async fn handle(&self, request: RpcRequest) -> Result<Value> {
        match request.method.as_str() {
            "tools/list" => Ok(serde_json::json!({ "tools": self.registry.list() })),
            "tools/call" => {
                let params: CallParams = serde_json::from_value(request.params)
                    .map_err(|e| ScholarError::Protocol(format!("invalid call params: {}", e)))?;
                let result = self.registry.invoke(&params.name, params.arguments).await?;
                Ok(serde_json::to_value(&result)?)
            }
            other => Err(ScholarError::Protocol(format!("unknown method: {}", other))),
        }
    }
}

async fn write_line(stdout: &mut tokio::io::Stdout, line: &str) -> Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
