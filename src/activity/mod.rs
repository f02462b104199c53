pub mod activity_log;

pub use activity_log::format_timestamp;
pub use activity_log::ActivityLog;
pub use activity_log::LogCategory;
pub use activity_log::LogEntry;
