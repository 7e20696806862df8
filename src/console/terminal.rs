//! Line-oriented terminal I/O.

use std::collections::VecDeque;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use crate::Result;

/// A line-oriented terminal.
#[allow(async_fn_in_trait)]
pub trait Terminal {
    /// Write text without a line break.
    async fn send(&mut self, data: &str) -> Result<()>;

    /// Write one line.
    async fn send_line(&mut self, data: &str) -> Result<()> {
        self.send(&format!("{data}\n")).await
    }

    /// Read one line without its line break. `None` at end of input.
    async fn read_line(&mut self) -> Result<Option<String>>;
}

/// Terminal on the process's stdin and stdout.
pub struct StdioTerminal {
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl StdioTerminal {
    /// Attach to stdin and stdout.
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            stdout: tokio::io::stdout(),
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdioTerminal {
    async fn send(&mut self, data: &str) -> Result<()> {
        self.stdout.write_all(data.as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim_end_matches('\r').to_string()))
    }
}

/// Terminal fed from a fixed script, capturing everything written.
///
/// Used to drive the console non-interactively.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<String>,
    output: String,
}

impl ScriptedTerminal {
    /// Create a terminal that will read `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }
}

impl Terminal for ScriptedTerminal {
    async fn send(&mut self, data: &str) -> Result<()> {
        self.output.push_str(data);
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.input.pop_front();
        if let Some(line) = &line {
            // Echo so the transcript reads like a session.
            self.output.push_str(line);
            self.output.push('\n');
        }
        Ok(line)
    }
}
