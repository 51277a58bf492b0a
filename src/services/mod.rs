pub mod chat;
pub mod issue_tracker;

pub use chat::ChatPlatform;
pub use issue_tracker::IssueTrackerService;
