pub mod interaction_event;
pub mod panel_event;
pub mod ready_event;
pub mod route;
pub mod wizard_event;
