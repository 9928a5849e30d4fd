mod command_dispatcher;
mod controller_state;
mod fire_controller;

pub use command_dispatcher::CommandDispatcher;
pub use controller_state::ControllerState;
pub use fire_controller::FireController;
