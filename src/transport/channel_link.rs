use super::{ActuatorLink, LinkError, OutboundMessage};
use tokio::sync::broadcast;

/// In-process [`ActuatorLink`] fanning outbound messages out to every subscriber.
#[derive(Debug, Clone)]
pub struct ChannelLink {
    tx: broadcast::Sender<OutboundMessage>,
}

impl ChannelLink {
    pub fn new(capacity: usize) -> Self { Self { tx: broadcast::Sender::new(capacity) } }

    /// Creates a new receiver that sees every message sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<OutboundMessage> { self.tx.subscribe() }
}

impl ActuatorLink for ChannelLink {
    fn send(&self, msg: OutboundMessage) -> Result<(), LinkError> {
        self.tx.send(msg).map(|_| ()).map_err(|_| LinkError::Disconnected)
    }
}
