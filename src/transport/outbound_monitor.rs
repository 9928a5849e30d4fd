use super::OutboundMessage;
use crate::launch_control::controller::ControllerState;
use crate::{event, info, shot, warn};
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio_util::sync::CancellationToken;

/// Logs the outbound stream for observability: commands, shots and state changes.
///
/// The per-tick state messages are collapsed so that only changes show up.
pub async fn run_outbound_monitor(mut rx: Receiver<OutboundMessage>, c_tok: CancellationToken) {
    let mut last_state: Option<ControllerState> = None;
    loop {
        let msg = tokio::select! {
            () = c_tok.cancelled() => break,
            msg = rx.recv() => msg,
        };
        match msg {
            Ok(OutboundMessage::State(state)) => {
                if last_state != Some(state) {
                    info!("Controller state: {state}");
                    last_state = Some(state);
                }
            }
            Ok(OutboundMessage::VelocityCommand(v)) => event!("Velocity command {v:.3} m/s."),
            Ok(OutboundMessage::YawCommand(yaw)) => {
                event!("Yaw command {:.2} deg.", yaw.to_degrees());
            }
            Ok(OutboundMessage::Trigger) => event!("Trigger pulse."),
            Ok(OutboundMessage::ShotConfirmed) => shot!("Shot confirmed."),
            Err(RecvError::Lagged(n)) => warn!("Outbound monitor lagged by {n} messages."),
            Err(RecvError::Closed) => break,
        }
    }
}
