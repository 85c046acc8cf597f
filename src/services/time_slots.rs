use crate::models::{Action, Button, Keyboard};

pub const FIRST_HOUR: u32 = 10;
pub const LAST_HOUR: u32 = 21;
const COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Start,
    End,
}

pub fn is_bookable_hour(hour: u32) -> bool {
    (FIRST_HOUR..=LAST_HOUR).contains(&hour)
}

/// 3x4 grid of hours 10..=21 in ascending order. Hours below `minimum_hour`
/// are shown but inert.
pub fn time_slot_grid(kind: SlotKind, minimum_hour: Option<u32>) -> Keyboard {
    let floor = minimum_hour.unwrap_or(FIRST_HOUR);
    let hours: Vec<u32> = (FIRST_HOUR..=LAST_HOUR).collect();

    let rows = hours
        .chunks(COLUMNS)
        .map(|chunk| {
            chunk
                .iter()
                .map(|&hour| {
                    let label = format!("{hour}:00");
                    if hour < floor {
                        Button::inert(label)
                    } else {
                        let action = match kind {
                            SlotKind::Start => Action::TimeStart(hour),
                            SlotKind::End => Action::TimeEnd(hour),
                        };
                        Button::new(label, action)
                    }
                })
                .collect()
        })
        .collect();

    Keyboard::new(rows)
}
