use serde::{Deserialize, Serialize};

use super::Action;

/// One grid cell: a label and the action it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    pub fn inert(label: impl Into<String>) -> Self {
        Self::new(label, Action::Noop)
    }

    pub fn is_selectable(&self) -> bool {
        self.action != Action::Noop
    }
}

/// Rows of buttons rendered under a chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Vec<Button>) {
        self.rows.push(row);
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Telegram `InlineKeyboardMarkup` JSON.
    pub fn to_inline_markup(&self) -> serde_json::Value {
        let rows: Vec<Vec<serde_json::Value>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| {
                        serde_json::json!({
                            "text": b.label,
                            "callback_data": b.action.encode(),
                        })
                    })
                    .collect()
            })
            .collect();
        serde_json::json!({ "inline_keyboard": rows })
    }
}

/// Display text plus grid for one wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub text: String,
    pub keyboard: Keyboard,
}
