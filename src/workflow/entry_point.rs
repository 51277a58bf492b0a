use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::panel::PanelKind;
use crate::error::AppResult;
use crate::store::EntryPointStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPointStatus {
    /// The recorded message still exists and was refreshed in place.
    Reattached(u64),
    Created(u64),
}

/// Makes sure exactly one intake message exists in the ticket channel.
pub async fn ensure_entry_point(
    ctx: &AppContext,
    store: &EntryPointStore,
) -> AppResult<EntryPointStatus> {
    let channel_id = ctx.config.channels.ticket;
    ctx.chat.fetch_channel(channel_id).await?;
    let panel = PanelKind::Intake.render();

    if let Some(message_id) = store.load()? {
        if ctx.chat.fetch_message(channel_id, message_id).await? {
            ctx.chat.edit_panel(channel_id, message_id, &panel).await?;
            info!(message = message_id, "ticket entry point reactivated");
            return Ok(EntryPointStatus::Reattached(message_id));
        }
        warn!(
            message = message_id,
            "recorded entry point message is gone, posting a new one"
        );
    }

    let message_id = ctx.chat.send_panel(channel_id, &panel).await?;
    store.save(message_id)?;
    info!(message = message_id, "ticket entry point created");
    Ok(EntryPointStatus::Created(message_id))
}
