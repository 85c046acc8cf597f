use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::{SessionKey, WizardState};

/// Lock guarding one user's wizard record.
pub type SessionSlot = Arc<Mutex<WizardState>>;

/// Wizard records keyed by `(chat, user)`.
///
/// Callers serialize read-modify-write on a key by holding that key's slot
/// lock. Slots for different keys are independent locks, so users never wait
/// on each other beyond the brief lookup.
pub trait SessionStore: Send + Sync {
    /// Returns the slot for `key`, creating an `Empty` record if absent.
    fn slot(&self, key: SessionKey) -> SessionSlot;

    /// Replaces the record for `key` with a fresh `Empty` one.
    fn reset(&self, key: SessionKey);

    /// Copy of the current record, `None` if the key was never started.
    fn snapshot(&self, key: SessionKey) -> Option<WizardState>;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    slots: Mutex<HashMap<SessionKey, SessionSlot>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn slot(&self, key: SessionKey) -> SessionSlot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(slots.entry(key).or_default())
    }

    fn reset(&self, key: SessionKey) {
        let slot = self.slot(key);
        *slot.lock().unwrap_or_else(|e| e.into_inner()) = WizardState::Empty;
    }

    fn snapshot(&self, key: SessionKey) -> Option<WizardState> {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.get(&key).cloned()
        }?;
        let state = *slot.lock().unwrap_or_else(|e| e.into_inner());
        Some(state)
    }
}
