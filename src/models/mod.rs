pub mod action;
pub mod keyboard;
pub mod telegram;
pub mod wizard;

pub use action::{Action, ActionError};
pub use keyboard::{Button, Keyboard, View};
pub use wizard::{SessionKey, WizardState, WizardStep};
