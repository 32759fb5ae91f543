pub mod math;
pub mod score;
pub mod series;
pub mod set_update;

pub use score::parse_set_token;
pub use series::{SeriesOutcome, play_doubles_series, play_singles_series};
pub use set_update::{apply_doubles_set, apply_singles_set};
