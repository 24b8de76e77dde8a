// Adapters layer: concrete implementations for external systems (storage, clock).

pub mod csv_history;

pub use crate::domain::ports::SystemClock;
pub use csv_history::CsvHistory;
