//! Command-backed evaluator and pretty-printer.
//!
//! Each request spawns the configured program, writes the text to its
//! stdin and reads the result from stdout. A non-zero exit status is a
//! failure carrying the program's stderr. Requests are issued one at a time
//! by the pipeline, so a client program that forwards to a long-lived REPL
//! keeps its session state between cells.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use lispnb_core::{EvalFailure, Evaluator, PrettyPrinter};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Environment variable carrying the evaluation context.
pub const CONTEXT_ENV: &str = "LISPNB_CONTEXT";

/// An external program used as evaluator or pretty-printer.
#[derive(Debug, Clone)]
pub struct CommandProcess {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandProcess {
    /// Parse a whitespace-separated command line and resolve the program on `PATH`.
    ///
    /// No shell quoting is applied, so an argument cannot contain spaces.
    /// Wrap such commands in a script.
    pub fn from_command_line(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("Empty command line"))?;
        let program = which::which(name).with_context(|| format!("Command not found: {}", name))?;

        Ok(Self {
            program,
            args: parts.map(String::from).collect(),
        })
    }

    /// Run the program once with `input` on stdin.
    async fn run(&self, input: &str, context: Option<&str>) -> Result<String, EvalFailure> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(context) = context {
            command.env(CONTEXT_ENV, context);
        }

        let mut child = command
            .spawn()
            .map_err(|e| EvalFailure::error("SpawnError", e.to_string()))?;

        // Stdout is drained while stdin is written; dropping stdin after the
        // write signals end of input.
        let stdin = child.stdin.take();
        let write = async move {
            match stdin {
                Some(mut stdin) => stdin.write_all(input.as_bytes()).await,
                None => Ok(()),
            }
        };

        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(|e| EvalFailure::error("IoError", e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("process exited with {}", output.status)
            } else {
                stderr
            };
            return Err(EvalFailure::error("EvaluationError", message));
        }
        written.map_err(|e| EvalFailure::error("IoError", e.to_string()))?;

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

impl Evaluator for CommandProcess {
    async fn evaluate(&self, code: &str, context: Option<&str>) -> Result<String, EvalFailure> {
        tracing::debug!("Evaluating {} bytes with {}", code.len(), self.program.display());
        self.run(code, context).await
    }
}

impl PrettyPrinter for CommandProcess {
    async fn pretty_print(&self, text: &str) -> Result<String, EvalFailure> {
        self.run(text, None).await
    }
}
