use tracing::{debug, info};

use crate::config::{AppConfig, RoleAccess};
use crate::context::AppContext;
use crate::domain::channel::{ChannelName, ChannelRequest, Overwrite, Permission};
use crate::domain::panel::{Embed, Panel, colour};
use crate::domain::ticket::{Issue, TicketDraft};
use crate::error::AppResult;

/// Creates the private channel for a new ticket and returns its id.
pub async fn provision_ticket_channel(
    ctx: &AppContext,
    draft: &TicketDraft,
    issue: &Issue,
) -> AppResult<u64> {
    let settings = &ctx.config.provisioning;
    let category_id = match ctx.chat.find_category(&settings.category_name).await? {
        Some(id) => Some(id),
        None => {
            debug!(
                category = settings.category_name.as_str(),
                "ticket category not found, using default"
            );
            settings.default_category_id
        }
    };

    let candidates = ctx
        .config
        .roles
        .channel_roles()
        .into_iter()
        .map(|(id, _)| id)
        .collect::<Vec<_>>();
    let resolvable = ctx.chat.resolve_roles(&candidates).await?;

    let request = ChannelRequest {
        name: ChannelName::for_ticket(draft.repo, &draft.title),
        category_id,
        topic: format!(
            "{} | {} | {}",
            draft.category.as_str(),
            draft.priority.as_str(),
            issue.url
        ),
        overwrites: overwrites(&ctx.config, &resolvable),
    };

    let channel_id = ctx.chat.create_text_channel(&request).await?;
    info!(
        channel = channel_id,
        name = request.name.as_str(),
        issue = issue.number,
        "ticket channel created"
    );
    Ok(channel_id)
}

/// Hides the channel from everyone and opens it to the developer role plus
/// every configured role that exists in the guild.
pub fn overwrites(config: &AppConfig, resolvable: &[u64]) -> Vec<Overwrite> {
    // The @everyone role shares the guild's id.
    let mut overwrites = vec![
        Overwrite {
            role_id: config.guild_id,
            allow: Vec::new(),
            deny: vec![Permission::ViewChannel],
        },
        member_overwrite(config.roles.developer, RoleAccess::Member),
    ];

    overwrites.extend(
        config
            .roles
            .channel_roles()
            .into_iter()
            .filter(|(id, _)| resolvable.contains(id) && *id != config.roles.developer)
            .map(|(id, access)| member_overwrite(id, access)),
    );
    overwrites
}

fn member_overwrite(role_id: u64, access: RoleAccess) -> Overwrite {
    let mut allow = Permission::MEMBER.to_vec();
    if access == RoleAccess::Manager {
        allow.extend(Permission::MANAGE);
    }
    Overwrite {
        role_id,
        allow,
        deny: Vec::new(),
    }
}

/// Lightweight pointer to a ticket channel, posted in the shared todo channel.
pub fn todo_summary(draft: &TicketDraft, issue: &Issue, channel_id: u64) -> Panel {
    Panel::embed(
        Embed::new(
            format!("🆕 {}", draft.title),
            format!("A new ticket is waiting in <#{channel_id}>."),
            colour::BLUE,
        )
        .field("GitHub Issue", format!("[#{}]({})", issue.number, issue.url), false)
        .field("Category", draft.category.label(), true)
        .field("Priority", draft.priority.label(), true)
        .field("Repository", draft.repo.as_str(), true),
    )
}
