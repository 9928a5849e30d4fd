//! Boundary towards the middleware: typed inbound/outbound messages, the outbound
//! [`ActuatorLink`] seam and the tasks that move messages across it.

mod channel_link;
mod console_input;
mod inbound_router;
mod messages;
mod outbound_monitor;

pub use channel_link::ChannelLink;
pub use console_input::run_console_input;
pub use inbound_router::InboundRouter;
pub use messages::{InboundMessage, OutboundMessage};
pub use outbound_monitor::run_outbound_monitor;

use strum_macros::Display;

/// Failure of the outbound transport.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Nobody is listening on the other side anymore.
    Disconnected,
}

impl std::error::Error for LinkError {}

/// Outbound seam of the firing-control core.
///
/// Implementations only hand messages over. They never block on the receiver and
/// never retry.
pub trait ActuatorLink: Send + Sync {
    fn send(&self, msg: OutboundMessage) -> Result<(), LinkError>;
}
