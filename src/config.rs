use crate::launch_control::trajectory::{LauncherGeometry, Position3D};
use crate::{fatal, warn};
use chrono::TimeDelta;
use std::{env, str::FromStr};

/// Startup configuration of the firing-control core.
///
/// Every field has a compiled-in default that can be overridden through a `TM_*`
/// environment variable, see [`LaunchConfig::from_env`].
#[derive(Debug, Clone, Copy)]
pub struct LaunchConfig {
    /// Watchdog on the readiness confirmation of a dispatched command pair.
    cmd_timeout: TimeDelta,
    /// Minimum dwell time after a shot before the controller re-arms.
    cooldown: TimeDelta,
    /// Re-dispatches of an unconfirmed command before giving up.
    max_retries: usize,
    /// Period of the controller tick.
    tick_period: TimeDelta,
    /// Window after a dispatch in which `true` readiness reports count as stale.
    ready_holdoff: TimeDelta,
    /// Launcher setup used by the trajectory solver.
    geometry: LauncherGeometry,
}

impl LaunchConfig {
    const DEF_CMD_TIMEOUT: TimeDelta = TimeDelta::seconds(3);
    const DEF_COOLDOWN: TimeDelta = TimeDelta::seconds(2);
    const DEF_MAX_RETRIES: usize = 2;
    const DEF_TICK_PERIOD: TimeDelta = TimeDelta::milliseconds(50);
    const DEF_READY_HOLDOFF: TimeDelta = TimeDelta::milliseconds(100);

    pub fn new(
        cmd_timeout: TimeDelta,
        cooldown: TimeDelta,
        max_retries: usize,
        tick_period: TimeDelta,
        ready_holdoff: TimeDelta,
        geometry: LauncherGeometry,
    ) -> Self {
        Self { cmd_timeout, cooldown, max_retries, tick_period, ready_holdoff, geometry }
    }

    /// Builds the configuration from the process environment.
    ///
    /// Durations are read in milliseconds, angles in degrees, lengths in meters.
    /// Unparsable values are reported and replaced by their default. An implausible
    /// launcher geometry is fatal, as no shot could be solved with it.
    pub fn from_env() -> Self {
        let geo_def = LauncherGeometry::default();
        let geometry = LauncherGeometry {
            position: Position3D::new(
                env_or("TM_LAUNCHER_X", geo_def.position.x),
                env_or("TM_LAUNCHER_Y", geo_def.position.y),
                env_or("TM_LAUNCHER_Z", geo_def.position.z),
            ),
            elevation: env_or("TM_ELEVATION_DEG", geo_def.elevation.to_degrees()).to_radians(),
            gravity: env_or("TM_GRAVITY", geo_def.gravity),
            max_velocity: env_or("TM_MAX_VELOCITY", geo_def.max_velocity),
            min_range: env_or("TM_MIN_RANGE", geo_def.min_range),
            yaw_limits: (
                env_or("TM_YAW_MIN_DEG", geo_def.yaw_limits.0.to_degrees()).to_radians(),
                env_or("TM_YAW_MAX_DEG", geo_def.yaw_limits.1.to_degrees()).to_radians(),
            ),
        };
        if let Err(reason) = geometry.check() {
            fatal!("Invalid launcher geometry: {reason}");
        }
        let tick_period = env_ms_or("TM_TICK_PERIOD_MS", Self::DEF_TICK_PERIOD);
        if tick_period <= TimeDelta::zero() {
            fatal!("Tick period must be positive");
        }
        Self {
            cmd_timeout: env_ms_or("TM_CMD_TIMEOUT_MS", Self::DEF_CMD_TIMEOUT),
            cooldown: env_ms_or("TM_COOLDOWN_MS", Self::DEF_COOLDOWN),
            max_retries: env_or("TM_MAX_RETRIES", Self::DEF_MAX_RETRIES),
            tick_period,
            ready_holdoff: env_ms_or("TM_READY_HOLDOFF_MS", Self::DEF_READY_HOLDOFF),
            geometry,
        }
    }

    pub fn cmd_timeout(&self) -> TimeDelta { self.cmd_timeout }
    pub fn cooldown(&self) -> TimeDelta { self.cooldown }
    pub fn max_retries(&self) -> usize { self.max_retries }
    pub fn tick_period(&self) -> TimeDelta { self.tick_period }
    pub fn ready_holdoff(&self) -> TimeDelta { self.ready_holdoff }
    pub fn geometry(&self) -> &LauncherGeometry { &self.geometry }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self::new(
            Self::DEF_CMD_TIMEOUT,
            Self::DEF_COOLDOWN,
            Self::DEF_MAX_RETRIES,
            Self::DEF_TICK_PERIOD,
            Self::DEF_READY_HOLDOFF,
            LauncherGeometry::default(),
        )
    }
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Could not parse {key}={raw:?}, keeping default.");
            default
        }),
        Err(_) => default,
    }
}

fn env_ms_or(key: &str, default: TimeDelta) -> TimeDelta {
    TimeDelta::milliseconds(env_or(key, default.num_milliseconds()))
}
