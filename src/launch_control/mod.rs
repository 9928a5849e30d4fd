//! The firing-control core: trajectory solving, readiness bookkeeping, command dispatch
//! and the tick-driven state machine that ties them together.

pub(crate) mod common;
pub(crate) mod controller;
mod error;
pub(crate) mod readiness;
pub(crate) mod trajectory;

pub use error::{LaunchError, PoseDefect, Unreachable};
