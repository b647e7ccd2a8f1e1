// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat command implementation.
//!
//! ```text
//! main::run_chat (still single-threaded)
//!   LoadedEnv::load --> export --> init_logging
//! run_chat_command
//!   resolve()  --> MissingCredential: return before any prompt
//!   current_thread runtime
//!     install Ctrl+C handler --> CancellationToken
//!     Repl::run(stdin, stdout, SilentResponder)
//!   shutdown_background()
//! ```

use anyhow::Context;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::{self, AgentSession};
use crate::config::Config;
use crate::env::LoadedEnv;
use crate::error::{AgentResult, Result};
use crate::repl::{
    ExitReason, Repl, ReplOptions, ReplSummary, SilentResponder, listen_for_interrupt,
};

/// Main handler for the chat command.
///
/// `loaded` must already be exported to the process environment.
///
/// # Errors
///
/// Returns an error if the required credential is missing, the runtime
/// cannot be started, or the prompt loop fails on I/O.
pub fn run_chat_command(config: &Config, loaded: &LoadedEnv) -> Result<()> {
    loaded.file().log_summary();

    let session = bootstrap::resolve(&config.agent, loaded.env())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let repl = Repl::new(
        ReplOptions::builder()
            .with_prompt(config.agent.prompt.clone())
            .build(),
    );
    let result = runtime.block_on(run_prompt_loop(&repl, &session));

    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_background();

    let summary = result?;
    match summary.reason {
        ExitReason::EndOfInput => tracing::info!(lines = summary.lines, "end of input"),
        ExitReason::Interrupted => tracing::info!(lines = summary.lines, "interrupted"),
    }
    Ok(())
}

async fn run_prompt_loop(repl: &Repl, session: &AgentSession) -> AgentResult<ReplSummary> {
    let cancel_token = CancellationToken::new();
    let listener = listen_for_interrupt(cancel_token.clone())?;

    let mut responder = SilentResponder::new(session);
    let mut stdout = tokio::io::stdout();
    let result = repl
        .run(
            BufReader::new(tokio::io::stdin()),
            &mut stdout,
            &mut responder,
            &cancel_token,
        )
        .await;

    listener.abort();
    result
}
