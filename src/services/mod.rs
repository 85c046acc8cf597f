pub mod calendar;
pub mod dispatch;
pub mod messaging;
pub mod polling;
pub mod render_cache;
pub mod session_store;
pub mod time_slots;
pub mod view;
pub mod wizard;
