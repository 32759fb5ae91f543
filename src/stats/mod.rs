pub mod queries;
pub mod types;

pub use queries::*;
pub use types::{DailyStats, HeadToHead, MoverRow, PeakMilestone, Upset, Window};
