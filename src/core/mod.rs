pub mod counter;
pub mod elapsed;
pub mod live;
pub mod render;

pub use crate::domain::model::{ElapsedBreakdown, Instant, Tick};
pub use crate::domain::ports::{Clock, ConfigProvider, DobHistory, SystemClock};
pub use crate::utils::error::Result;
