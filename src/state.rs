use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::services::messaging::MessagingProvider;
use crate::services::wizard::Wizard;

pub struct AppState {
    pub config: AppConfig,
    pub wizard: Wizard,
    pub messaging: Box<dyn MessagingProvider>,
}

impl AppState {
    /// Local calendar date used for "today" in grids and guards.
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
