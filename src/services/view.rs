use chrono::NaiveDate;

use crate::models::action::format_hour;
use crate::models::{Action, Button, Keyboard, View, WizardState};
use crate::services::calendar::month_calendar;
use crate::services::render_cache::GridCache;
use crate::services::time_slots::{time_slot_grid, SlotKind};

pub const BACK_LABEL: &str = "Back";
pub const CONFIRM_LABEL: &str = "Confirm";
pub const WAITING_LABEL: &str = "⏳🤖⏳";

pub fn back_row() -> Vec<Button> {
    vec![Button::new(BACK_LABEL, Action::Back)]
}

/// Maps a wizard state to the message text and grid shown for it. Every grid
/// ends with the Back row.
pub fn render(state: &WizardState, cache: &dyn GridCache, today: NaiveDate) -> View {
    let (text, mut keyboard) = match *state {
        WizardState::Empty => (
            today.format("%B %Y").to_string(),
            month_calendar(cache, today),
        ),
        WizardState::DateChosen { .. } => (
            "Pick a starting time".to_string(),
            time_slot_grid(SlotKind::Start, None),
        ),
        WizardState::StartChosen { start, .. } => (
            format!(
                "Now pick an ending time later than: {}",
                format_hour(start)
            ),
            // The start hour itself is never a valid end.
            time_slot_grid(SlotKind::End, Some(start + 1)),
        ),
        WizardState::EndChosen { date, start, end } => {
            ("Your selection".to_string(), summary_grid(date, start, end))
        }
        WizardState::Confirmed { .. } => (
            "Waiting for other participants...".to_string(),
            Keyboard::new(vec![vec![Button::inert(WAITING_LABEL)]]),
        ),
    };

    keyboard.push_row(back_row());
    View { text, keyboard }
}

fn summary_grid(date: NaiveDate, start: u32, end: u32) -> Keyboard {
    let date_chip = Button::inert(date.format("%a %-d %B %Y").to_string());
    let interval_chip = Button::inert(format!("{}...{}", format_hour(start), format_hour(end)));
    Keyboard::new(vec![
        vec![date_chip, interval_chip],
        vec![Button::new(CONFIRM_LABEL, Action::Confirm)],
    ])
}
