use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifies one wizard: a user inside a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub chat_id: i64,
    pub user_id: i64,
}

impl SessionKey {
    pub fn new(chat_id: i64, user_id: i64) -> Self {
        Self { chat_id, user_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Empty,
    DateChosen,
    StartChosen,
    EndChosen,
    Confirmed,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Empty => "empty",
            WizardStep::DateChosen => "date_chosen",
            WizardStep::StartChosen => "start_chosen",
            WizardStep::EndChosen => "end_chosen",
            WizardStep::Confirmed => "confirmed",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user booking selection. Each variant carries exactly the fields that
/// have been chosen so far, so fields can only be filled left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardState {
    #[default]
    Empty,
    DateChosen {
        date: NaiveDate,
    },
    StartChosen {
        date: NaiveDate,
        start: u32,
    },
    EndChosen {
        date: NaiveDate,
        start: u32,
        end: u32,
    },
    Confirmed {
        date: NaiveDate,
        start: u32,
        end: u32,
    },
}

impl WizardState {
    pub fn step(&self) -> WizardStep {
        match self {
            WizardState::Empty => WizardStep::Empty,
            WizardState::DateChosen { .. } => WizardStep::DateChosen,
            WizardState::StartChosen { .. } => WizardStep::StartChosen,
            WizardState::EndChosen { .. } => WizardStep::EndChosen,
            WizardState::Confirmed { .. } => WizardStep::Confirmed,
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match *self {
            WizardState::Empty => None,
            WizardState::DateChosen { date }
            | WizardState::StartChosen { date, .. }
            | WizardState::EndChosen { date, .. }
            | WizardState::Confirmed { date, .. } => Some(date),
        }
    }

    pub fn start_hour(&self) -> Option<u32> {
        match *self {
            WizardState::StartChosen { start, .. }
            | WizardState::EndChosen { start, .. }
            | WizardState::Confirmed { start, .. } => Some(start),
            _ => None,
        }
    }

    pub fn end_hour(&self) -> Option<u32> {
        match *self {
            WizardState::EndChosen { end, .. } | WizardState::Confirmed { end, .. } => Some(end),
            _ => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, WizardState::Confirmed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_follow_step() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let state = WizardState::StartChosen { date, start: 14 };
        assert_eq!(state.step(), WizardStep::StartChosen);
        assert_eq!(state.selected_date(), Some(date));
        assert_eq!(state.start_hour(), Some(14));
        assert_eq!(state.end_hour(), None);
        assert!(!state.is_confirmed());

        let state = WizardState::Confirmed {
            date,
            start: 14,
            end: 16,
        };
        assert_eq!(state.end_hour(), Some(16));
        assert!(state.is_confirmed());
    }

    #[test]
    fn test_state_json() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let json = serde_json::to_value(WizardState::DateChosen { date }).unwrap();
        assert_eq!(json["step"], "date_chosen");
        assert_eq!(json["date"], "2025-06-15");
        assert_eq!(
            serde_json::to_value(WizardState::Empty).unwrap()["step"],
            "empty"
        );
    }
}
