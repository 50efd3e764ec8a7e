//! Discord side of the sheet tools: component ids, the management panel and
//! how wizard prompts are drawn.

pub mod custom_id;
pub mod panel;
pub mod view;

pub use custom_id::{CustomId, PanelAction, StepAction};
