use super::{ActuatorSim, SimConfig, VelocityActuator, YawActuator};
use crate::launch_control::controller::ControllerState;
use crate::transport::{ActuatorLink, ChannelLink, InboundMessage, OutboundMessage};
use chrono::{DateTime, TimeDelta, Utc};
use std::f64::consts::PI;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn at(t0: DateTime<Utc>, ms: i64) -> DateTime<Utc> { t0 + TimeDelta::milliseconds(ms) }

#[test]
fn test_velocity_to_rpm_is_clamped() {
    let config = SimConfig::default();
    let drive = VelocityActuator::new(config);
    let rpm = drive.velocity_to_rpm(1.0);
    assert!((rpm - 30.0 / (config.wheel_radius * PI)).abs() < 1e-9);
    assert!((drive.velocity_to_rpm(1000.0) - config.max_rpm).abs() < f64::EPSILON);
}

#[test]
fn test_drive_ready_after_ramp() {
    let config = SimConfig::default();
    let t0 = Utc::now();
    let mut drive = VelocityActuator::new(config);
    assert!(!drive.step(t0));

    // 7 m/s is roughly 1337 rpm, reached after ~270ms but ready only after the ramp time.
    drive.command_velocity(7.0, t0);
    assert!(!drive.step(at(t0, 100)));
    assert!(drive.rpm() > 0.0 && drive.rpm() < drive.target_rpm());
    assert!(!drive.step(at(t0, 500)));
    assert!((drive.rpm() - drive.target_rpm()).abs() < f64::EPSILON);
    assert!(drive.step(at(t0, 1001)));
    assert!(drive.step(at(t0, 2000)));
}

#[test]
fn test_drive_times_out_without_refresh() {
    let config = SimConfig::default();
    let t0 = Utc::now();
    let mut drive = VelocityActuator::new(config);
    drive.command_velocity(7.0, t0);
    assert!(drive.step(at(t0, 4000)));
    assert!(!drive.step(at(t0, 5001)));
    assert!(drive.rpm().abs() < f64::EPSILON);
}

#[test]
fn test_trigger_starts_single_cooldown() {
    let config = SimConfig::default();
    let t0 = Utc::now();
    let mut drive = VelocityActuator::new(config);

    // Without an active command a trigger is ignored.
    drive.trigger(t0);
    drive.command_velocity(7.0, t0);
    assert!(drive.step(at(t0, 1500)));

    drive.trigger(at(t0, 1500));
    // A second pulse during the cooldown neither restarts nor extends it.
    drive.trigger(at(t0, 2000));
    assert!(drive.step(at(t0, 2400)));
    assert!(!drive.step(at(t0, 2501)));
    assert!(drive.rpm().abs() < f64::EPSILON);
}

#[test]
fn test_trigger_extends_command_timeout() {
    let config = SimConfig::default();
    let t0 = Utc::now();
    let mut drive = VelocityActuator::new(SimConfig { cooldown: TimeDelta::seconds(10), ..config });
    drive.command_velocity(7.0, t0);
    drive.trigger(at(t0, 4000));
    // Without the pulse the command would have timed out at 5s.
    assert!(drive.step(at(t0, 6000)));
    assert!(drive.rpm() > 0.0);
    assert!(!drive.step(at(t0, 9001)));
    assert!(drive.rpm().abs() < f64::EPSILON);
}

#[test]
fn test_zero_velocity_stops_immediately() {
    let config = SimConfig::default();
    let t0 = Utc::now();
    let mut drive = VelocityActuator::new(config);
    drive.command_velocity(7.0, t0);
    assert!(drive.step(at(t0, 1500)));
    drive.command_velocity(0.0, at(t0, 1510));
    assert!(drive.rpm().abs() < f64::EPSILON);
    assert!(!drive.step(at(t0, 1520)));
}

#[test]
fn test_yaw_slews_across_the_seam() {
    let t0 = Utc::now();
    let mut yaw = YawActuator::new(90.0_f64.to_radians(), 0.5_f64.to_radians());
    assert!(!yaw.step(t0));

    yaw.command_yaw(-170.0_f64.to_radians());
    assert!(!yaw.step(at(t0, 500)));
    assert!((yaw.angle() + 45.0_f64.to_radians()).abs() < 1e-9);
    assert!(!yaw.step(at(t0, 1500)));
    assert!(yaw.step(at(t0, 2000)));
    assert!((yaw.angle() + 170.0_f64.to_radians()).abs() < 1e-9);

    // From -170 deg to 170 deg is 20 deg through the seam.
    yaw.command_yaw(170.0_f64.to_radians());
    assert!(yaw.step(at(t0, 2250)));
}

#[test]
fn test_sim_routes_outbound_messages() {
    let t0 = Utc::now();
    let mut sim = ActuatorSim::new(SimConfig::default());
    sim.apply(OutboundMessage::YawCommand(0.25), t0);
    sim.apply(OutboundMessage::VelocityCommand(7.0), t0);
    sim.apply(OutboundMessage::State(ControllerState::Wait), t0);
    assert_eq!(sim.step(t0), [InboundMessage::VelocityReady(false), InboundMessage::YawReady(false)]);
    assert_eq!(
        sim.step(at(t0, 1500)),
        [InboundMessage::VelocityReady(true), InboundMessage::YawReady(true)]
    );
    sim.apply(OutboundMessage::Trigger, at(t0, 1500));
    sim.apply(OutboundMessage::ShotConfirmed, at(t0, 1500));
    assert_eq!(
        sim.step(at(t0, 2600)),
        [InboundMessage::VelocityReady(false), InboundMessage::YawReady(true)]
    );
    assert!(sim.velocity().rpm().abs() < f64::EPSILON);
    assert!((sim.yaw().angle() - 0.25).abs() < 1e-9);
}

#[tokio::test]
async fn test_sim_task_reports_readiness() {
    let config = SimConfig {
        ramp_time: TimeDelta::milliseconds(30),
        rpm_accel: 1_000_000.0,
        step_period: TimeDelta::milliseconds(5),
        ..SimConfig::default()
    };
    let link = ChannelLink::new(16);
    let (tx, mut rx) = mpsc::channel(64);
    let c_tok = CancellationToken::new();
    let handle = tokio::spawn(super::run(config, link.subscribe(), tx, c_tok.clone()));

    link.send(OutboundMessage::YawCommand(0.0)).unwrap();
    link.send(OutboundMessage::VelocityCommand(5.0)).unwrap();

    let (mut velocity_ready, mut yaw_ready) = (false, false);
    let wait = tokio::time::timeout(std::time::Duration::from_secs(2), async {
        while !(velocity_ready && yaw_ready) {
            match rx.recv().await {
                Some(InboundMessage::VelocityReady(r)) => velocity_ready = r,
                Some(InboundMessage::YawReady(r)) => yaw_ready = r,
                _ => (),
            }
        }
    });
    assert!(wait.await.is_ok());

    drop(rx);
    c_tok.cancel();
    handle.await.unwrap();
}
