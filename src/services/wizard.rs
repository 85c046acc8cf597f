use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Action, ActionError, SessionKey, View, WizardState, WizardStep};
use crate::services::render_cache::{GridCache, InMemoryGridCache};
use crate::services::session_store::{InMemorySessionStore, SessionStore};
use crate::services::time_slots::is_bookable_hour;
use crate::services::view::render;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("unknown command ({0})")]
    UnknownCommand(#[from] ActionError),

    #[error("{date} is in the past")]
    DateInPast { date: NaiveDate, today: NaiveDate },

    #[error("{hour}:00 is outside bookable hours")]
    HourOutOfRange { hour: u32 },

    #[error("end time {end}:00 must be after start time {start}:00")]
    EndNotAfterStart { start: u32, end: u32 },

    #[error("cannot {action} while {step}")]
    OutOfStep {
        step: WizardStep,
        action: &'static str,
    },
}

/// What the transport should do after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Replace the existing message with this view.
    Edit { view: View },
    /// State did not change; leave the message alone.
    NoOp,
}

/// Applies one action to a state. Pure: the caller decides whether to store
/// the result.
pub fn transition(
    state: WizardState,
    action: Action,
    today: NaiveDate,
) -> Result<WizardState, WizardError> {
    use WizardState::*;

    let out_of_step = |state: WizardState| WizardError::OutOfStep {
        step: state.step(),
        action: action.name(),
    };

    match (state, action) {
        (_, Action::Noop) => Ok(state),

        (Empty, Action::Date(date)) => {
            if date < today {
                return Err(WizardError::DateInPast { date, today });
            }
            Ok(DateChosen { date })
        }
        (DateChosen { date }, Action::TimeStart(start)) => {
            if !is_bookable_hour(start) {
                return Err(WizardError::HourOutOfRange { hour: start });
            }
            Ok(StartChosen { date, start })
        }
        (StartChosen { date, start }, Action::TimeEnd(end)) => {
            if end <= start {
                return Err(WizardError::EndNotAfterStart { start, end });
            }
            if !is_bookable_hour(end) {
                return Err(WizardError::HourOutOfRange { hour: end });
            }
            Ok(EndChosen { date, start, end })
        }
        (EndChosen { date, start, end }, Action::Confirm) => Ok(Confirmed { date, start, end }),

        (Confirmed { date, start, end }, Action::Back) => Ok(EndChosen { date, start, end }),
        (EndChosen { date, start, .. }, Action::Back) => Ok(StartChosen { date, start }),
        (StartChosen { date, .. }, Action::Back) => Ok(DateChosen { date }),
        (DateChosen { .. }, Action::Back) => Ok(Empty),
        (Empty, Action::Back) => Ok(Empty),

        (state, _) => Err(out_of_step(state)),
    }
}

/// Per-user booking wizards backed by injected stores.
pub struct Wizard {
    sessions: Arc<dyn SessionStore>,
    cache: Arc<dyn GridCache>,
}

impl Wizard {
    pub fn new(sessions: Arc<dyn SessionStore>, cache: Arc<dyn GridCache>) -> Self {
        Self { sessions, cache }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryGridCache::new()),
        )
    }

    /// Decodes `raw` and applies it to the user's wizard. A key that was never
    /// reset starts from `Empty`.
    pub fn handle_event(
        &self,
        key: SessionKey,
        raw: &str,
        today: NaiveDate,
    ) -> Result<RenderInstruction, WizardError> {
        let action = Action::parse(raw).inspect_err(|e| {
            tracing::warn!(
                chat_id = key.chat_id,
                user_id = key.user_id,
                error = %e,
                "unknown command"
            );
        })?;

        let next = {
            let slot = self.sessions.slot(key);
            let mut current = slot.lock().unwrap_or_else(|e| e.into_inner());
            let next = transition(*current, action, today)?;
            if next == *current {
                return Ok(RenderInstruction::NoOp);
            }
            *current = next;
            next
        };

        tracing::info!(
            chat_id = key.chat_id,
            user_id = key.user_id,
            action = action.name(),
            step = next.step().as_str(),
            "wizard advanced"
        );

        Ok(RenderInstruction::Edit {
            view: render(&next, self.cache.as_ref(), today),
        })
    }

    /// Discards the user's wizard and returns the initial view.
    pub fn handle_reset(&self, key: SessionKey, today: NaiveDate) -> View {
        self.sessions.reset(key);
        tracing::info!(chat_id = key.chat_id, user_id = key.user_id, "wizard reset");
        render(&WizardState::Empty, self.cache.as_ref(), today)
    }

    pub fn session(&self, key: SessionKey) -> Option<WizardState> {
        self.sessions.snapshot(key)
    }
}
