mod engine;
mod session;
mod steps;
mod validate;

pub use engine::{Actor, Advance, Prompt, PromptBody, Wizard};
pub use session::{spawn_sweeper, SessionStore};
pub use steps::{WizardKind, NAME_LABEL};
