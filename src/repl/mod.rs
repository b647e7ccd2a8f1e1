// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive prompt loop.
//!
//! ```text
//! loop:
//!   write prompt, flush
//!   select (biased):
//!     cancel.cancelled()  --> Interrupted
//!     read_until('\n')   --> 0 bytes        --> EndOfInput
//!                         --> line           --> Responder::respond --> print reply
//! on exit: write "\n", flush
//! ```
//!
//! Input lines are not interpreted; what happens to them is up to the
//! [`Responder`]. The shipped [`SilentResponder`] discards them. Bytes that
//! are not valid UTF-8 are replaced with U+FFFD.


use std::borrow::Cow;
use std::future::Future;

use bon::Builder;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::bootstrap::AgentSession;
use crate::config::types::Provider;
use crate::error::{AgentResult, ReplError};

/// Prompt shown when none is configured.
pub const DEFAULT_PROMPT: &str = "> ";

/// Handles one line of user input.
pub trait Responder {
    /// Returns the text to print in reply, or `None` to print nothing.
    fn respond(&mut self, input: &str) -> impl Future<Output = AgentResult<Option<String>>>;
}

/// Accepts every line and replies with nothing.
#[derive(Debug, Clone)]
pub struct SilentResponder {
    provider: Provider,
    model: Option<String>,
}

impl SilentResponder {
    #[must_use]
    pub fn new(session: &AgentSession) -> Self {
        Self {
            provider: session.provider(),
            model: session.openai().map(|settings| settings.model.clone()),
        }
    }
}

impl Responder for SilentResponder {
    async fn respond(&mut self, input: &str) -> AgentResult<Option<String>> {
        debug!(
            provider = %self.provider,
            model = self.model.as_deref().unwrap_or("-"),
            chars = input.chars().count(),
            "input discarded"
        );
        Ok(None)
    }
}

/// Prompt loop settings.
#[derive(Debug, Clone, Builder)]
pub struct ReplOptions {
    #[builder(into, setters(name = with_prompt), default = DEFAULT_PROMPT.to_string())]
    prompt: String,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ReplOptions {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The input stream was closed.
    EndOfInput,
    /// The cancellation token fired.
    Interrupted,
}

/// Result of a finished loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplSummary {
    pub reason: ExitReason,
    /// Lines read, empty lines included.
    pub lines: usize,
}

/// The prompt loop.
#[derive(Debug, Clone, Default)]
pub struct Repl {
    options: ReplOptions,
}

impl Repl {
    #[must_use]
    pub const fn new(options: ReplOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ReplOptions {
        &self.options
    }

    /// Runs until `reader` is exhausted or `cancel` fires.
    ///
    /// Both outcomes are a normal exit. A pending read is dropped on
    /// cancellation; bytes it already consumed are discarded with it.
    ///
    /// # Errors
    ///
    /// Returns `ReplError` if the prompt cannot be written or input cannot
    /// be read, and passes through any error from `responder`.
    pub async fn run<R, W, T>(
        &self,
        mut reader: R,
        writer: &mut W,
        responder: &mut T,
        cancel: &CancellationToken,
    ) -> AgentResult<ReplSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        T: Responder,
    {
        let mut buf = Vec::new();
        let mut lines = 0;

        let reason = loop {
            write_flush(writer, self.options.prompt.as_bytes()).await?;

            buf.clear();
            let read = tokio::select! {
                biased;
                () = cancel.cancelled() => break ExitReason::Interrupted,
                read = reader.read_until(b'\n', &mut buf) => read.map_err(ReplError::Read)?,
            };
            if read == 0 {
                break ExitReason::EndOfInput;
            }

            let line = decode_line(&buf);
            lines += 1;
            trace!(line = lines, chars = line.chars().count(), "input received");

            if let Some(reply) = responder.respond(&line).await? {
                write_reply(writer, &reply).await?;
            }
        };

        write_flush(writer, b"\n").await?;
        info!(?reason, lines, "prompt loop finished");

        Ok(ReplSummary { reason, lines })
    }
}

/// Strips one trailing `\n` or `\r\n` and decodes the rest lossily.
fn decode_line(buf: &[u8]) -> Cow<'_, str> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

async fn write_flush<W: AsyncWrite + Unpin>(writer: &mut W, bytes: &[u8]) -> AgentResult<()> {
    writer.write_all(bytes).await.map_err(ReplError::Prompt)?;
    writer.flush().await.map_err(ReplError::Prompt)?;
    Ok(())
}

async fn write_reply<W: AsyncWrite + Unpin>(writer: &mut W, reply: &str) -> AgentResult<()> {
    writer
        .write_all(reply.as_bytes())
        .await
        .map_err(ReplError::Prompt)?;
    if !reply.ends_with('\n') {
        writer.write_all(b"\n").await.map_err(ReplError::Prompt)?;
    }
    Ok(())
}

/// Installs a Ctrl+C handler and spawns a task that cancels `token` when
/// it fires.
///
/// The handler is in place when this returns, so an interrupt that arrives
/// before the task is first polled still ends the loop instead of the
/// process. Must be called from within a Tokio runtime with the signal
/// driver enabled.
///
/// # Errors
///
/// Returns `ReplError::Signal` if the handler cannot be installed.
pub fn listen_for_interrupt(token: CancellationToken) -> AgentResult<JoinHandle<()>> {
    #[cfg(unix)]
    let mut interrupt = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
        .map_err(ReplError::Signal)?;
    #[cfg(windows)]
    let mut interrupt = tokio::signal::windows::ctrl_c().map_err(ReplError::Signal)?;

    Ok(tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            debug!("received Ctrl+C, stopping prompt loop");
            token.cancel();
        }
    }))
}
