use super::{CommandDispatcher, ControllerState};
use crate::config::LaunchConfig;
use crate::launch_control::{
    LaunchError,
    readiness::{PendingTarget, ReadinessTracker},
    trajectory::{Solution, TargetPose, TrajectorySolver},
};
use crate::transport::ActuatorLink;
use crate::{error, event, info, log, shot, warn};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Internal state of the controller, carrying the data that is only valid in that state.
#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    HasTarget { pose: TargetPose, solution: Solution },
    Wait { solution: Solution, sent_at: DateTime<Utc>, retries: usize },
    Shoot { solution: Solution, fired_at: DateTime<Utc> },
    Abort,
}

impl Phase {
    fn state(&self) -> ControllerState {
        match self {
            Phase::Idle => ControllerState::Idle,
            Phase::HasTarget { .. } => ControllerState::HasTarget,
            Phase::Wait { .. } => ControllerState::Wait,
            Phase::Shoot { .. } => ControllerState::Shoot,
            Phase::Abort => ControllerState::Abort,
        }
    }

    fn solution(&self) -> Option<Solution> {
        match self {
            Phase::HasTarget { solution, .. }
            | Phase::Wait { solution, .. }
            | Phase::Shoot { solution, .. } => Some(*solution),
            Phase::Idle | Phase::Abort => None,
        }
    }

    /// Whether an actuator may still be acting on a dispatched command.
    fn command_outstanding(&self) -> bool { matches!(self, Phase::Wait { .. } | Phase::Shoot { .. }) }
}

/// Tick-driven firing state machine.
///
/// Each [`FireController::tick`] first checks for an abort request, which preempts
/// everything else. Otherwise the exit condition of the current state is evaluated
/// and at most one transition is taken. The resulting state is published every tick.
/// Waiting on readiness, command timeout and cooldown are all polled against the
/// tick time, nothing in here blocks.
pub struct FireController {
    cmd_timeout: TimeDelta,
    cooldown: TimeDelta,
    max_retries: usize,
    solver: TrajectorySolver,
    tracker: Arc<ReadinessTracker>,
    pending: PendingTarget,
    dispatcher: CommandDispatcher,
    phase: Phase,
    last_fault: Option<LaunchError>,
    shots: usize,
}

impl FireController {
    pub fn new(
        config: &LaunchConfig,
        tracker: Arc<ReadinessTracker>,
        pending: PendingTarget,
        link: Arc<dyn ActuatorLink>,
    ) -> Self {
        Self {
            cmd_timeout: config.cmd_timeout(),
            cooldown: config.cooldown(),
            max_retries: config.max_retries(),
            solver: TrajectorySolver::new(*config.geometry()),
            dispatcher: CommandDispatcher::new(link, Arc::clone(&tracker)),
            tracker,
            pending,
            phase: Phase::Idle,
            last_fault: None,
            shots: 0,
        }
    }

    pub fn state(&self) -> ControllerState { self.phase.state() }

    /// The active launch solution, if the current state holds one.
    pub fn solution(&self) -> Option<Solution> { self.phase.solution() }

    /// The most recent non-fatal fault reported by the controller.
    pub fn last_fault(&self) -> Option<LaunchError> { self.last_fault }

    /// Number of shots fired since startup.
    pub fn shots(&self) -> usize { self.shots }

    /// Executes one controller step at time `now`.
    ///
    /// # Returns
    /// The state after this tick, which has also been published outward.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> ControllerState {
        let prev = self.phase;
        let next = if self.tracker.consume_abort() {
            warn!("Abort received in state {}!", prev.state());
            self.enter_abort(prev.command_outstanding()).await
        } else {
            self.advance(prev, now).await
        };
        if next.state() != prev.state() {
            event!("Transition {} -> {}.", prev.state(), next.state());
        }
        self.phase = next;
        let state = next.state();
        if let Err(e) = self.dispatcher.publish_state(state) {
            event!("Publishing state {state} failed: {e}");
        }
        state
    }

    /// Runs the periodic tick loop until `c_tok` is cancelled.
    ///
    /// Cancellation is only observed between ticks, a started tick always completes.
    pub async fn run(mut self, period: TimeDelta, c_tok: CancellationToken) {
        let Ok(period_std) = period.to_std() else {
            error!("Invalid tick period {period}, controller not started.");
            return;
        };
        let mut ticker = interval(period_std);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Fire controller running with a {}ms tick.", period.num_milliseconds());
        loop {
            tokio::select! {
                () = c_tok.cancelled() => break,
                _ = ticker.tick() => {
                    self.tick(Utc::now()).await;
                }
            }
        }
        info!("Fire controller stopped after {} shots.", self.shots);
    }

    async fn advance(&mut self, phase: Phase, now: DateTime<Utc>) -> Phase {
        match phase {
            Phase::Idle => match self.pending.take() {
                Some(pose) => self.enter_has_target(pose),
                None => Phase::Idle,
            },
            Phase::HasTarget { pose, solution } => {
                event!("Arming for target received at {}.", pose.received().format("%H:%M:%S%.3f"));
                // A failed send is recovered by the command timeout in `Wait`.
                let _ = self.dispatcher.dispatch(solution, now).await;
                Phase::Wait { solution, sent_at: now, retries: 0 }
            }
            Phase::Wait { solution, sent_at, retries } => {
                if self.tracker.both_ready().await {
                    self.enter_shoot(solution, now)
                } else if now - sent_at >= self.cmd_timeout {
                    if retries < self.max_retries {
                        warn!(
                            "No readiness within {}ms, re-dispatching ({}/{}).",
                            self.cmd_timeout.num_milliseconds(),
                            retries + 1,
                            self.max_retries
                        );
                        let _ = self.dispatcher.dispatch(solution, now).await;
                        Phase::Wait { solution, sent_at: now, retries: retries + 1 }
                    } else {
                        let fault = LaunchError::ActuatorTimeout { attempts: retries + 1 };
                        error!(
                            "Actuators not ready after {} dispatches, aborting: {fault}",
                            retries + 1
                        );
                        self.last_fault = Some(fault);
                        self.enter_abort(true).await
                    }
                } else {
                    phase
                }
            }
            Phase::Shoot { fired_at, .. } => {
                if now - fired_at >= self.cooldown {
                    log!("Cooldown elapsed, re-armed.");
                    Phase::Idle
                } else {
                    phase
                }
            }
            Phase::Abort => Phase::Idle,
        }
    }

    /// Validates and solves a freshly taken pose.
    ///
    /// Rejected poses are reported and leave the controller in `Idle`.
    fn enter_has_target(&mut self, pose: TargetPose) -> Phase {
        let solved = pose
            .validate()
            .map_err(LaunchError::from)
            .and_then(|()| self.solver.solve(&pose));
        match solved {
            Ok(solution) => {
                log!(
                    "Target at {} solved: yaw {:.2} deg, velocity {:.3} m/s.",
                    pose.position(),
                    solution.yaw().to_degrees(),
                    solution.velocity()
                );
                Phase::HasTarget { pose, solution }
            }
            Err(e) => {
                warn!("Discarding target at {}: {e:?}.", pose.position());
                self.last_fault = Some(e);
                Phase::Idle
            }
        }
    }

    fn enter_shoot(&mut self, solution: Solution, now: DateTime<Utc>) -> Phase {
        if self.dispatcher.fire().is_ok() {
            self.shots += 1;
            shot!("Fired shot {} at {:.3} m/s.", self.shots, solution.velocity());
        }
        self.pending.discard();
        Phase::Shoot { solution, fired_at: now }
    }

    async fn enter_abort(&mut self, command_outstanding: bool) -> Phase {
        if command_outstanding {
            let _ = self.dispatcher.halt();
        }
        self.pending.discard();
        self.tracker.clear().await;
        Phase::Abort
    }
}
