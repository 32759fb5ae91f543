pub mod insights;
mod presenter;
pub mod recording;
pub mod reporting;

pub use insights::InsightsService;
pub use recording::RecordingService;
pub use reporting::ReportingService;
