//! Serve loop: one event per input line, one reply per output line.

use mockable::Clock;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::event::{HostEvent, HostReply};
use crate::command::{ports::RateLimiter, services::CommandDispatcher};

/// Turns one input line into its reply.
pub async fn handle_line<L, C>(dispatcher: &CommandDispatcher<L, C>, line: &str) -> HostReply
where
    L: RateLimiter,
    C: Clock + Send + Sync,
{
    let event = match HostEvent::from_line(line) {
        Ok(event) => event,
        Err(error) => {
            warn!(%error, "rejected event line");
            return HostReply::error(None, error.to_string());
        }
    };
    let id = event.id.clone();
    let request = match event.into_request() {
        Ok(request) => request,
        Err(error) => {
            debug!(%error, "event names no runnable command");
            return HostReply::error(id, error.to_string());
        }
    };
    match dispatcher.dispatch(request).await {
        Ok(response) => HostReply::response(id, response),
        Err(error) => {
            warn!(%error, "dispatch failed");
            HostReply::error(id, error.to_string())
        }
    }
}

/// Reads events from `input` until it closes and writes replies to
/// `output`.
///
/// Every line is handled on its own task, so a slow command does not hold
/// up the ones behind it; replies are written in completion order and
/// carry the event id. Blank lines are skipped.
///
/// # Errors
///
/// Returns the I/O error when reading input or writing a reply fails.
pub async fn serve<L, C, R, W>(
    dispatcher: Arc<CommandDispatcher<L, C>>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    L: RateLimiter + 'static,
    C: Clock + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (replies, mut pending) = mpsc::unbounded_channel::<HostReply>();

    let read = async move {
        let mut lines = input.lines();
        let mut handled: u64 = 0;
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            handled = handled.saturating_add(1);
            let worker = Arc::clone(&dispatcher);
            let sender = replies.clone();
            tokio::spawn(async move {
                let reply = handle_line(&worker, &line).await;
                if sender.send(reply).is_err() {
                    warn!("reply dropped; output closed");
                }
            });
        }
        drop(replies);
        info!(events = handled, "input closed");
        Ok::<(), io::Error>(())
    };

    let write = async {
        while let Some(reply) = pending.recv().await {
            let mut encoded = serde_json::to_vec(&reply)?;
            encoded.push(b'\n');
            output.write_all(&encoded).await?;
            output.flush().await?;
        }
        Ok::<(), io::Error>(())
    };

    let (read_result, write_result) = tokio::join!(read, write);
    read_result?;
    write_result
}
