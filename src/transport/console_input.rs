use super::InboundMessage;
use crate::launch_control::trajectory::{Position3D, TargetPose};
use crate::{info, warn};
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;

/// Parses one console line into an inbound message.
///
/// Accepted forms are `x y z` for a target position in meters and `abort`.
///
/// # Returns
/// `None` for blank or malformed lines.
pub(super) fn parse_line(line: &str, now: DateTime<Utc>) -> Option<InboundMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.eq_ignore_ascii_case("abort") {
        return Some(InboundMessage::Abort);
    }
    let coords = trimmed
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match coords.as_slice() {
        [x, y, z] => Some(InboundMessage::TargetPose(TargetPose::from_position(
            Position3D::new(*x, *y, *z),
            now,
        ))),
        _ => None,
    }
}

/// Reads target poses and abort requests from stdin and forwards them as inbound messages.
///
/// Should be spawned as a background task. Stops on EOF, on a closed inbound channel
/// or when `c_tok` is cancelled.
pub async fn run_console_input(tx: Sender<InboundMessage>, c_tok: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("Reading targets from stdin as 'x y z' or 'abort'.");
    loop {
        let line = tokio::select! {
            () = c_tok.cancelled() => break,
            line = lines.next_line() => line,
        };
        match line {
            Ok(Some(l)) => {
                let Some(msg) = parse_line(&l, Utc::now()) else {
                    if !l.trim().is_empty() {
                        warn!("Ignoring malformed console input {l:?}.");
                    }
                    continue;
                };
                if tx.send(msg).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                info!("Console input closed.");
                break;
            }
            Err(e) => {
                warn!("Console input failed: {e}");
                break;
            }
        }
    }
}
