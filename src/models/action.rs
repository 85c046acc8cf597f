use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const HOUR_FORMAT: &str = "%H:%M";

/// A decoded button press. Tokens are decoded once at the transport boundary;
/// nothing deeper in the crate looks at raw callback strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Inert cell (weekday header, padding, past day, summary chip).
    Noop,
    Date(NaiveDate),
    TimeStart(u32),
    TimeEnd(u32),
    Confirm,
    Back,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("malformed action token: {0}")]
    Malformed(String),

    #[error("unknown action: {0}")]
    UnknownName(String),

    #[error("invalid payload for {name}: {data}")]
    InvalidPayload { name: String, data: String },
}

#[derive(Serialize, Deserialize)]
struct WireToken {
    name: String,
    #[serde(default)]
    data: String,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Noop => "none",
            Action::Date(_) => "date",
            Action::TimeStart(_) => "timestart",
            Action::TimeEnd(_) => "timeend",
            Action::Confirm => "confirm",
            Action::Back => "back",
        }
    }

    /// Encodes the action as the `{"name":..,"data":..}` token that is
    /// round-tripped through the chat client as callback data.
    pub fn encode(&self) -> String {
        let data = match self {
            Action::Noop => "none".to_string(),
            Action::Date(d) => d.format(DATE_FORMAT).to_string(),
            Action::TimeStart(h) | Action::TimeEnd(h) => format_hour(*h),
            Action::Confirm => "confirm".to_string(),
            Action::Back => "back".to_string(),
        };
        let token = WireToken {
            name: self.name().to_string(),
            data,
        };
        serde_json::to_string(&token).unwrap_or_default()
    }

    pub fn parse(raw: &str) -> Result<Self, ActionError> {
        let token: WireToken = serde_json::from_str(raw.trim())
            .map_err(|_| ActionError::Malformed(raw.to_string()))?;

        let invalid = || ActionError::InvalidPayload {
            name: token.name.clone(),
            data: token.data.clone(),
        };

        match token.name.as_str() {
            "none" => Ok(Action::Noop),
            "date" => NaiveDate::parse_from_str(&token.data, DATE_FORMAT)
                .map(Action::Date)
                .map_err(|_| invalid()),
            "timestart" => parse_hour(&token.data).map(Action::TimeStart).ok_or_else(invalid),
            "timeend" => parse_hour(&token.data).map(Action::TimeEnd).ok_or_else(invalid),
            "confirm" => Ok(Action::Confirm),
            "back" => Ok(Action::Back),
            other => Err(ActionError::UnknownName(other.to_string())),
        }
    }
}

pub fn format_hour(hour: u32) -> String {
    format!("{hour:02}:00")
}

fn parse_hour(s: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(s, HOUR_FORMAT).ok()?;
    (time.minute() == 0).then(|| time.hour())
}

// Buttons serialize their action as the encoded token string.
impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Action::parse(&raw).map_err(serde::de::Error::custom)
    }
}
