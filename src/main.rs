#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod actuator_sim;
mod config;
mod launch_control;
mod logger;
mod transport;

use crate::actuator_sim::SimConfig;
use crate::config::LaunchConfig;
use crate::launch_control::{
    controller::FireController,
    readiness::{ReadinessTracker, TargetSlot},
};
use crate::transport::{ChannelLink, InboundRouter, run_console_input, run_outbound_monitor};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const INBOUND_CAPACITY: usize = 256;
const OUTBOUND_CAPACITY: usize = 256;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let config = LaunchConfig::from_env();
    info!(
        "Starting trajectory manager: elevation {:.1} deg, tick {}ms, timeout {}ms, cooldown {}ms, {} retries.",
        config.geometry().elevation.to_degrees(),
        config.tick_period().num_milliseconds(),
        config.cmd_timeout().num_milliseconds(),
        config.cooldown().num_milliseconds(),
        config.max_retries()
    );
    let c_tok = CancellationToken::new();

    let tracker = Arc::new(ReadinessTracker::new(config.ready_holdoff()));
    let (slot, pending) = TargetSlot::new();
    let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CAPACITY);
    let link = Arc::new(ChannelLink::new(OUTBOUND_CAPACITY));

    let router = InboundRouter::new(Arc::clone(&tracker), slot);
    tokio::spawn(router.run(inbound_rx, c_tok.clone()));
    tokio::spawn(actuator_sim::run(
        SimConfig::default(),
        link.subscribe(),
        inbound_tx.clone(),
        c_tok.clone(),
    ));
    tokio::spawn(run_outbound_monitor(link.subscribe(), c_tok.clone()));
    tokio::spawn(run_console_input(inbound_tx, c_tok.clone()));

    let c_tok_clone = c_tok.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Could not listen for ctrl-c: {e}");
            return;
        }
        warn!("Interrupt received, shutting down.");
        c_tok_clone.cancel();
    });

    let controller = FireController::new(&config, tracker, pending, link);
    controller.run(config.tick_period(), c_tok).await;
}
