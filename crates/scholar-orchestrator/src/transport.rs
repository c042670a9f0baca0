//! Downstream tool-server transport
//!
//! The orchestrator talks to the other servers over their stdio channel:
//! spawn the server, write one `tools/call` request line, and scan stdout
//! for the first complete JSON line. The whole exchange runs under the
//! per-call deadline. `ToolTransport` is the seam that lets pipeline tests
//! script downstream responses instead of spawning processes.

use async_trait::async_trait;
use scholar_core::{Result, ScholarConfig, ScholarError, ToolResult};
use serde_json::Value;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

/// One call to a named tool on a named downstream server, returning the
/// payload object from inside the result envelope
#[async_trait]
pub trait ToolTransport: Send + Sync {
    async fn call(&self, server: &str, tool: &str, arguments: Value) -> Result<Value>;
}

/// Real transport: spawns the downstream server as a subprocess
pub struct SubprocessTransport {
    config: ScholarConfig,
}

impl SubprocessTransport {
    pub fn new(config: ScholarConfig) -> Self {
        Self { config }
    }

    /// Launch command for a server: the configured entry, or the current
    /// executable's `serve` subcommand
    fn launch_command(&self, server: &str) -> Result<Command> {
        if let Some(parts) = self.config.servers.get(server) {
            let (program, args) = parts.split_first().ok_or_else(|| {
                ScholarError::Protocol(format!("empty launch command for server '{}'", server))
            })?;
            let mut command = Command::new(program);
            command.args(args);
            Ok(command)
        } else {
            let exe = std::env::current_exe()?;
            let mut command = Command::new(exe);
            command.arg("serve").arg(server);
            Ok(command)
        }
    }

    async fn exchange(&self, server: &str, tool: &str, arguments: Value) -> Result<Value> {
        let mut child = self
            .launch_command(server)?
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": tool, "arguments": arguments },
        });

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScholarError::Protocol("child stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScholarError::Protocol("child stdout not captured".to_string()))?;

        stdin.write_all(serde_json::to_string(&request)?.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await?;
        drop(stdin);

        let mut lines = BufReader::new(stdout).lines();
        let mut response: Option<Value> = None;
        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if !trimmed.starts_with('{') || !trimmed.ends_with('}') {
                continue;
            }
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                response = Some(value);
                break;
            }
        }
        let _ = child.kill().await;

        let response = response.ok_or_else(|| {
            ScholarError::Protocol(format!("No JSON response from {}.{}", server, tool))
        })?;

        if let Some(error) = response.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(ScholarError::Protocol(format!(
                "{}.{} failed: {}",
                server, tool, message
            )));
        }

        let result: ToolResult = serde_json::from_value(
            response
                .get("result")
                .cloned()
                .ok_or_else(|| {
                    ScholarError::Protocol(format!("{}.{} response has no result", server, tool))
                })?,
        )?;
        result.payload()
    }
}

#[async_trait]
impl ToolTransport for SubprocessTransport {
    async fn call(&self, server: &str, tool: &str, arguments: Value) -> Result<Value> {
        debug!(server, tool, "calling downstream server");
        let deadline = Duration::from_secs(self.config.call_timeout_secs);

        match tokio::time::timeout(deadline, self.exchange(server, tool, arguments)).await {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(e)) => {
                warn!(server, tool, error = %e, "downstream call failed");
                Err(e)
            }
            Err(_) => Err(ScholarError::CallTimeout {
                name: format!("{}.{}", server, tool),
                seconds: self.config.call_timeout_secs,
            }),
        }
    }
}

/// Test transport with scripted per-(server, tool) outcomes
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<(String, String), std::result::Result<Value, String>>>,
    calls: Mutex<Vec<(String, String, Value)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful payload for a (server, tool) pair
    pub fn with_payload(self, server: &str, tool: &str, payload: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((server.to_string(), tool.to_string()), Ok(payload));
        self
    }

    /// Script a transport failure for a (server, tool) pair
    pub fn with_unavailable(self, server: &str, tool: &str, message: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (server.to_string(), tool.to_string()),
            Err(message.to_string()),
        );
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<(String, String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolTransport for MockTransport {
    async fn call(&self, server: &str, tool: &str, arguments: Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((server.to_string(), tool.to_string(), arguments));

        match self
            .responses
            .lock()
            .unwrap()
            .get(&(server.to_string(), tool.to_string()))
        {
            Some(Ok(payload)) => Ok(payload.clone()),
            Some(Err(message)) => Err(ScholarError::ResourceUnavailable(message.clone())),
            None => Err(ScholarError::ResourceUnavailable(format!(
                "no scripted response for {}.{}",
                server, tool
            ))),
        }
    }
}
