use strum_macros::{Display, EnumIter};

/// Externally visible state of the firing controller.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, serde::Serialize, serde::Deserialize)]
pub enum ControllerState {
    Idle,
    HasTarget,
    Wait,
    Shoot,
    Abort,
}

impl ControllerState {
    /// Whether a launch solution is valid while in this state.
    pub fn holds_solution(self) -> bool {
        matches!(self, ControllerState::HasTarget | ControllerState::Wait | ControllerState::Shoot)
    }
}

