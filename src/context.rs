use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ChatPlatform, IssueTrackerService};
use crate::workflow::intake::IntakeSessions;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub tracker: Arc<dyn IssueTrackerService>,
    pub chat: Arc<dyn ChatPlatform>,
    pub sessions: Arc<IntakeSessions>,
}

impl AppContext {
    pub fn new(
        config: Arc<AppConfig>,
        tracker: Arc<dyn IssueTrackerService>,
        chat: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self {
            config,
            tracker,
            chat,
            sessions: Arc::new(IntakeSessions::default()),
        }
    }
}
