use async_trait::async_trait;

use crate::domain::channel::ChannelRequest;
use crate::domain::panel::Panel;
use crate::error::AppResult;

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn fetch_channel(&self, channel_id: u64) -> AppResult<()>;

    /// `Ok(false)` when the message is gone; other failures are errors.
    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> AppResult<bool>;

    /// Posts a panel and returns the new message id.
    async fn send_panel(&self, channel_id: u64, panel: &Panel) -> AppResult<u64>;

    async fn edit_panel(&self, channel_id: u64, message_id: u64, panel: &Panel) -> AppResult<()>;

    async fn create_text_channel(&self, request: &ChannelRequest) -> AppResult<u64>;

    async fn delete_channel(&self, channel_id: u64, reason: &str) -> AppResult<()>;

    async fn find_category(&self, name: &str) -> AppResult<Option<u64>>;

    /// Subset of `role_ids` that exist in the guild.
    async fn resolve_roles(&self, role_ids: &[u64]) -> AppResult<Vec<u64>>;

    /// Roles the member holds right now.
    async fn member_roles(&self, user_id: u64) -> AppResult<Vec<u64>>;
}
