use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::domain::panel::{
    COMPLETE_PANEL_TIMEOUT, CONFIRM_DELETE_TIMEOUT, Embed, NO_COLLABORATOR_VALUE, Panel,
    PanelKind, colour, completion_summary,
};
use crate::domain::ticket::{Issue, RepoTarget, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::workflow::interaction::{Actor, Deferred, FollowUp, Interaction, Outcome, Reply};
use crate::workflow::provisioning;

pub const DELETE_DELAY: Duration = Duration::from_secs(3);
const DELETE_REASON: &str = "Ticket completed - channel cleanup";

/// Posts the first lifecycle panel for a freshly filed issue and returns the
/// channel it landed in.
pub async fn open_ticket(ctx: &AppContext, draft: &TicketDraft, issue: &Issue) -> AppResult<u64> {
    let collaborators = ctx.tracker.list_collaborators(draft.repo).await;
    if collaborators.is_empty() {
        warn!(issue = issue.number, "no collaborators available for assignment");
    }
    let panel = PanelKind::Todo {
        repo: draft.repo,
        issue: issue.clone(),
        collaborators,
        claimed_by: None,
    }
    .render()
    .with_content(format!(
        "<@&{}> New {} ticket: **{}**",
        ctx.config.roles.developer,
        draft.category.as_str(),
        draft.title
    ));

    let dedicated = if ctx.config.provisioning.enabled {
        match provisioning::provision_ticket_channel(ctx, draft, issue).await {
            Ok(channel_id) => Some(channel_id),
            Err(err) => {
                warn!(
                    issue = issue.number,
                    "ticket channel could not be created, using todo channel: {err}"
                );
                None
            }
        }
    } else {
        None
    };

    let channel_id = dedicated.unwrap_or(ctx.config.channels.todo);
    ctx.chat.send_panel(channel_id, &panel).await?;

    // The panel is live from here on; the mirror and announcement are extras.
    if let Some(ticket_channel) = dedicated {
        let mirror = provisioning::todo_summary(draft, issue, ticket_channel);
        if let Err(err) = ctx.chat.send_panel(ctx.config.channels.todo, &mirror).await {
            warn!(issue = issue.number, "todo channel mirror failed: {err}");
        }
    }

    if let Some(announce) = ctx.config.channels.create {
        let text = format!(
            "🎫 Ticket created: {}\n<@&{}>",
            issue.url, ctx.config.roles.developer
        );
        if let Err(err) = ctx.chat.send_panel(announce, &Panel::text(text)).await {
            warn!(channel = announce, "ticket announcement failed: {err}");
        }
    }

    info!(issue = issue.number, channel = channel_id, "ticket opened");
    Ok(channel_id)
}

pub async fn assign(
    ctx: &AppContext,
    interaction: &Interaction,
    repo: RepoTarget,
    issue: u64,
) -> AppResult<Outcome> {
    let assignee = interaction
        .first_value()
        .filter(|value| *value != NO_COLLABORATOR_VALUE)
        .ok_or_else(|| AppError::Validation("⚠️ No valid assignee selected.".to_string()))?;

    let url = match ctx.tracker.assign_issue(repo, issue, assignee).await {
        Ok(url) => url,
        Err(err) => {
            warn!(issue, assignee, "assignment failed: {err}");
            return Ok(Outcome::ephemeral(format!(
                "❌ Failed to assign user.\n{}",
                err.user_message()
            )));
        }
    };

    info!(issue, assignee, "ticket assigned");
    let panel = PanelKind::Done {
        repo,
        issue: Issue { number: issue, url },
        assignee: assignee.to_string(),
    }
    .render();
    Ok(Outcome::reply(Reply::Update(panel)))
}

/// Marks the ticket as claimed on Discord only. The assignee dropdown stays
/// active so the GitHub assignment can still happen.
pub async fn claim(
    ctx: &AppContext,
    interaction: &Interaction,
    repo: RepoTarget,
    issue: u64,
) -> AppResult<Outcome> {
    require_any_role(
        ctx,
        &interaction.actor,
        &[ctx.config.roles.developer],
        "❌ You need the Developer role to claim tickets!",
    )
    .await?;

    let mention = interaction.actor.mention();
    let collaborators = ctx.tracker.list_collaborators(repo).await;
    let panel = PanelKind::Todo {
        repo,
        issue: Issue {
            number: issue,
            url: ctx.tracker.issue_url(repo, issue),
        },
        collaborators,
        claimed_by: Some(mention.clone()),
    }
    .render();

    info!(issue, actor = interaction.actor.id, "ticket claimed");
    Ok(
        Outcome::reply(Reply::Update(panel)).with_follow_up(FollowUp::Public(format!(
            "🎯 **Ticket #{issue} has been claimed by {mention}!**\n\
             📋 Don't forget to assign it in GitHub using the dropdown above!\n\
             Good luck with the implementation! 💪"
        ))),
    )
}

pub async fn mark_done(
    ctx: &AppContext,
    interaction: &Interaction,
    repo: RepoTarget,
    issue: u64,
) -> AppResult<Outcome> {
    let closed = match ctx.tracker.close_issue(repo, issue).await {
        Ok(closed) => closed,
        Err(err) => {
            warn!(issue, "closing issue failed: {err}");
            return Ok(Outcome::ephemeral(format!(
                "❌ Failed to close issue.\n{}",
                err.user_message()
            )));
        }
    };

    let summary = completion_summary(
        &ctx.tracker.repo_path(repo),
        &closed.url,
        closed.assignee.as_deref(),
    );
    if let Err(err) = ctx.chat.send_panel(ctx.config.channels.done, &summary).await {
        warn!(issue, "completion summary could not be posted: {err}");
        return Ok(Outcome::ephemeral(format!(
            "❌ Done channel not found! Check DONE_CHANNEL_ID.\n{}",
            err.user_message()
        )));
    }

    let dedicated = !ctx
        .config
        .channels
        .shared()
        .contains(&interaction.channel_id);
    let delete_until = dedicated.then(|| deadline(COMPLETE_PANEL_TIMEOUT));

    info!(issue, actor = interaction.actor.id, "ticket completed");
    Ok(Outcome::reply(Reply::Update(
        PanelKind::Complete { delete_until }.render(),
    )))
}

pub async fn request_delete(ctx: &AppContext, interaction: &Interaction) -> AppResult<Outcome> {
    authorize_deletion(ctx, interaction).await?;

    let panel = PanelKind::ConfirmDelete {
        channel_id: interaction.channel_id,
        expires_at: deadline(CONFIRM_DELETE_TIMEOUT),
    }
    .render();
    Ok(Outcome::reply(Reply::EphemeralPanel(panel)))
}

pub async fn confirm_delete(ctx: &AppContext, interaction: &Interaction) -> AppResult<Outcome> {
    authorize_deletion(ctx, interaction).await?;

    info!(
        channel = interaction.channel_id,
        actor = interaction.actor.id,
        "ticket channel deletion confirmed"
    );
    Ok(Outcome::reply(Reply::Update(Panel::text(format!(
        "🗑️ Deleting <#{}> in {} seconds...",
        interaction.channel_id,
        DELETE_DELAY.as_secs()
    ))))
    .with_deferred(Deferred::DeleteChannel {
        channel_id: interaction.channel_id,
        delay: DELETE_DELAY,
    }))
}

pub async fn cancel_delete(interaction: &Interaction) -> AppResult<Outcome> {
    info!(channel = interaction.channel_id, "ticket channel deletion cancelled");
    Ok(Outcome::reply(Reply::Update(Panel::embed(Embed::new(
        "✅ Channel deletion cancelled.",
        "The ticket channel stays.",
        colour::GREEN,
    )))))
}

/// Runs work scheduled by a handler. Returns a follow-up only when it failed:
/// a deleted channel takes the interaction's message with it.
pub async fn run_deferred(ctx: &AppContext, deferred: Deferred) -> Option<FollowUp> {
    match deferred {
        Deferred::DeleteChannel { channel_id, delay } => {
            tokio::time::sleep(delay).await;
            match ctx.chat.delete_channel(channel_id, DELETE_REASON).await {
                Ok(()) => {
                    info!(channel = channel_id, "ticket channel deleted");
                    None
                }
                Err(err) => {
                    error!(channel = channel_id, "deleting ticket channel failed: {err}");
                    Some(FollowUp::Ephemeral(format!(
                        "❌ Error deleting channel: {}",
                        err.user_message()
                    )))
                }
            }
        }
    }
}

async fn authorize_deletion(ctx: &AppContext, interaction: &Interaction) -> AppResult<()> {
    require_any_role(
        ctx,
        &interaction.actor,
        &ctx.config.roles.deletion_roles(),
        "❌ You don't have permission to delete channels!",
    )
    .await?;
    if ctx
        .config
        .channels
        .shared()
        .contains(&interaction.channel_id)
    {
        return Err(AppError::Validation(
            "⚠️ Shared ticket channels cannot be deleted.".to_string(),
        ));
    }
    Ok(())
}

/// Checks the member's roles as they are right now, never a cached copy.
async fn require_any_role(
    ctx: &AppContext,
    actor: &Actor,
    allowed: &[u64],
    denial: &str,
) -> AppResult<()> {
    let roles = ctx.chat.member_roles(actor.id).await?;
    if roles.iter().any(|role| allowed.contains(role)) {
        return Ok(());
    }
    warn!(actor = actor.id, "action rejected: missing role");
    Err(AppError::Unauthorized(denial.to_string()))
}

fn deadline(timeout: Duration) -> i64 {
    Utc::now().timestamp() + timeout.as_secs() as i64
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::action::ActionId;
    use crate::domain::panel::Row;
    use crate::domain::ticket::{Category, Priority};
    use crate::workflow::testing::{
        ADMIN_ROLE, DEV_ROLE, DONE_CHANNEL, FakeChat, FakeTracker, TODO_CHANNEL, TrackerCall,
        interaction, test_config, test_context,
    };

    const TICKET_CHANNEL: u64 = 700;
    const ANNOUNCE_CHANNEL: u64 = 4;

    fn soon() -> i64 {
        Utc::now().timestamp() + 60
    }

    fn draft() -> TicketDraft {
        TicketDraft::new(
            Category::Bug,
            Priority::High,
            RepoTarget::Backend,
            "Login fails",
            "Users cannot log in",
            None,
        )
        .expect("draft")
    }

    fn issue() -> Issue {
        Issue {
            number: 42,
            url: "https://github.com/acme/api/issues/42".to_string(),
        }
    }

    fn pick(value: &str, actor: u64) -> Interaction {
        let mut interaction = interaction(
            ActionId::Assign {
                repo: RepoTarget::Backend,
                issue: 42,
            },
            actor,
            TICKET_CHANNEL,
        );
        interaction.values = vec![value.to_string()];
        interaction
    }

    fn updated_panel(outcome: &Outcome) -> &Panel {
        match &outcome.reply {
            Reply::Update(panel) => panel,
            other => panic!("expected panel update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn assignment_moves_ticket_in_progress() {
        let tracker = Arc::new(FakeTracker::default());
        let ctx = test_context(tracker.clone(), Arc::new(FakeChat::default()));

        let outcome = assign(&ctx, &pick("octocat", 7), RepoTarget::Backend, 42)
            .await
            .expect("outcome");

        let panel = updated_panel(&outcome);
        assert_eq!(
            panel.actions(),
            vec![&ActionId::MarkDone {
                repo: RepoTarget::Backend,
                issue: 42
            }]
        );
        assert!(
            !panel
                .rows
                .iter()
                .any(|row| matches!(row, Row::Select(_))),
            "reassignment must no longer be offered"
        );
        assert_eq!(
            tracker.calls(),
            vec![TrackerCall::Assign {
                repo: RepoTarget::Backend,
                issue: 42,
                assignee: "octocat".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn placeholder_assignee_is_rejected() {
        let tracker = Arc::new(FakeTracker::default());
        let ctx = test_context(tracker.clone(), Arc::new(FakeChat::default()));
        let result = assign(
            &ctx,
            &pick(NO_COLLABORATOR_VALUE, 7),
            RepoTarget::Backend,
            42,
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(tracker.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_assignment_stays_awaiting_assignment() {
        let tracker = Arc::new(FakeTracker {
            assign: Err("GitHub responded with 404 Not Found".to_string()),
            ..FakeTracker::default()
        });
        let ctx = test_context(tracker, Arc::new(FakeChat::default()));
        let outcome = assign(&ctx, &pick("octocat", 7), RepoTarget::Backend, 42)
            .await
            .expect("outcome");
        assert!(matches!(outcome.reply, Reply::Ephemeral(ref m) if m.contains("404")));
    }

    #[tokio::test]
    async fn claim_requires_developer_role() {
        let tracker = Arc::new(FakeTracker::default());
        let ctx = test_context(tracker.clone(), Arc::new(FakeChat::default()));
        let press = interaction(
            ActionId::Claim {
                repo: RepoTarget::Backend,
                issue: 42,
            },
            7,
            TICKET_CHANNEL,
        );
        let result = claim(&ctx, &press, RepoTarget::Backend, 42).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(tracker.calls().is_empty());
    }

    #[tokio::test]
    async fn claim_annotates_without_assigning() {
        let tracker = Arc::new(FakeTracker::default());
        let chat = Arc::new(FakeChat::default().with_member(7, &[DEV_ROLE]));
        let ctx = test_context(tracker.clone(), chat);
        let press = interaction(
            ActionId::Claim {
                repo: RepoTarget::Backend,
                issue: 42,
            },
            7,
            TICKET_CHANNEL,
        );

        let outcome = claim(&ctx, &press, RepoTarget::Backend, 42)
            .await
            .expect("outcome");

        let panel = updated_panel(&outcome);
        let embed = panel.embed.as_ref().expect("embed");
        assert!(embed.description.contains("<@7>"));
        assert!(panel.actions().contains(&&ActionId::Assign {
            repo: RepoTarget::Backend,
            issue: 42
        }));
        assert!(matches!(
            outcome.follow_ups.as_slice(),
            [FollowUp::Public(text)] if text.contains("#42")
        ));
        assert!(
            !tracker
                .calls()
                .iter()
                .any(|call| matches!(call, TrackerCall::Assign { .. }))
        );
    }

    #[tokio::test]
    async fn completion_posts_one_summary_and_offers_deletion() {
        let tracker = Arc::new(FakeTracker::default());
        let chat = Arc::new(FakeChat::default());
        let ctx = test_context(tracker, chat.clone());
        let press = interaction(
            ActionId::MarkDone {
                repo: RepoTarget::Backend,
                issue: 42,
            },
            7,
            TICKET_CHANNEL,
        );

        let outcome = mark_done(&ctx, &press, RepoTarget::Backend, 42)
            .await
            .expect("outcome");

        let summaries = chat.sent_to(DONE_CHANNEL);
        assert_eq!(summaries.len(), 1);
        let embed = summaries[0].embed.as_ref().expect("embed");
        assert!(embed.fields.iter().any(|f| f.value == "octocat"));
        assert!(embed.fields.iter().any(|f| f.value == "acme/api"));

        let panel = updated_panel(&outcome);
        assert!(matches!(
            panel.actions().as_slice(),
            [ActionId::DeleteChannel { .. }]
        ));
        assert_eq!(panel.expires_after, Some(COMPLETE_PANEL_TIMEOUT));
    }

    #[tokio::test]
    async fn completion_in_todo_channel_has_no_delete_action() {
        let ctx = test_context(Arc::new(FakeTracker::default()), Arc::new(FakeChat::default()));
        let press = interaction(
            ActionId::MarkDone {
                repo: RepoTarget::Backend,
                issue: 42,
            },
            7,
            TODO_CHANNEL,
        );
        let outcome = mark_done(&ctx, &press, RepoTarget::Backend, 42)
            .await
            .expect("outcome");
        assert!(updated_panel(&outcome).rows.is_empty());
    }

    #[tokio::test]
    async fn failed_close_never_posts_a_summary() {
        let tracker = Arc::new(FakeTracker {
            close: Err("GitHub responded with 500".to_string()),
            ..FakeTracker::default()
        });
        let chat = Arc::new(FakeChat::default());
        let ctx = test_context(tracker, chat.clone());
        let press = interaction(
            ActionId::MarkDone {
                repo: RepoTarget::Backend,
                issue: 42,
            },
            7,
            TICKET_CHANNEL,
        );
        let outcome = mark_done(&ctx, &press, RepoTarget::Backend, 42)
            .await
            .expect("outcome");
        assert!(matches!(outcome.reply, Reply::Ephemeral(_)));
        assert!(chat.sent_to(DONE_CHANNEL).is_empty());
    }

    #[tokio::test]
    async fn missing_done_channel_is_reported() {
        let mut chat = FakeChat::default();
        chat.unreachable_channels.insert(DONE_CHANNEL);
        let ctx = test_context(Arc::new(FakeTracker::default()), Arc::new(chat));
        let press = interaction(
            ActionId::MarkDone {
                repo: RepoTarget::Backend,
                issue: 42,
            },
            7,
            TICKET_CHANNEL,
        );
        let outcome = mark_done(&ctx, &press, RepoTarget::Backend, 42)
            .await
            .expect("outcome");
        assert!(matches!(outcome.reply, Reply::Ephemeral(ref m) if m.contains("Done channel")));
    }

    #[tokio::test]
    async fn deletion_requires_elevated_role() {
        let chat = Arc::new(FakeChat::default().with_member(7, &[999]));
        let ctx = test_context(Arc::new(FakeTracker::default()), chat.clone());
        let expires_at = soon();

        let request = interaction(ActionId::DeleteChannel { expires_at }, 7, TICKET_CHANNEL);
        assert!(matches!(
            request_delete(&ctx, &request).await,
            Err(AppError::Unauthorized(_))
        ));

        let confirm = interaction(ActionId::ConfirmDelete { expires_at }, 7, TICKET_CHANNEL);
        assert!(matches!(
            confirm_delete(&ctx, &confirm).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(chat.deleted().is_empty());
    }

    #[tokio::test]
    async fn elevated_member_gets_confirmation_panel() {
        let chat = Arc::new(FakeChat::default().with_member(7, &[ADMIN_ROLE]));
        let ctx = test_context(Arc::new(FakeTracker::default()), chat.clone());
        let expires_at = soon();
        let request = interaction(ActionId::DeleteChannel { expires_at }, 7, TICKET_CHANNEL);

        let outcome = request_delete(&ctx, &request).await.expect("outcome");

        match outcome.reply {
            Reply::EphemeralPanel(panel) => {
                assert_eq!(panel.expires_after, Some(CONFIRM_DELETE_TIMEOUT));
                assert!(matches!(
                    panel.actions().as_slice(),
                    [ActionId::ConfirmDelete { .. }, ActionId::CancelDelete { .. }]
                ));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
        assert!(chat.deleted().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_deletion_runs_after_delay() {
        let chat = Arc::new(FakeChat::default().with_member(7, &[DEV_ROLE]));
        let ctx = test_context(Arc::new(FakeTracker::default()), chat.clone());
        let expires_at = soon();
        let confirm = interaction(ActionId::ConfirmDelete { expires_at }, 7, TICKET_CHANNEL);

        let outcome = confirm_delete(&ctx, &confirm).await.expect("outcome");
        assert!(chat.deleted().is_empty());

        let deferred = outcome.deferred.expect("deferred deletion");
        assert_eq!(
            deferred,
            Deferred::DeleteChannel {
                channel_id: TICKET_CHANNEL,
                delay: DELETE_DELAY
            }
        );
        let started = tokio::time::Instant::now();
        let follow_up = run_deferred(&ctx, deferred).await;
        assert!(started.elapsed() >= DELETE_DELAY);
        assert_eq!(chat.deleted(), vec![TICKET_CHANNEL]);
        assert_eq!(follow_up, None);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_deletion_is_reported_to_the_actor() {
        let mut chat = FakeChat::default();
        chat.unreachable_channels.insert(TICKET_CHANNEL);
        let ctx = test_context(Arc::new(FakeTracker::default()), Arc::new(chat));

        let follow_up = run_deferred(
            &ctx,
            Deferred::DeleteChannel {
                channel_id: TICKET_CHANNEL,
                delay: DELETE_DELAY,
            },
        )
        .await;
        assert!(matches!(
            follow_up,
            Some(FollowUp::Ephemeral(ref m)) if m.contains("Error deleting channel")
        ));
    }

    #[tokio::test]
    async fn cancelling_keeps_the_channel() {
        let cancel = interaction(
            ActionId::CancelDelete {
                expires_at: soon(),
            },
            7,
            TICKET_CHANNEL,
        );

        let outcome = cancel_delete(&cancel).await.expect("outcome");
        assert!(outcome.deferred.is_none());
        assert!(updated_panel(&outcome).rows.is_empty());
    }

    #[tokio::test]
    async fn shared_channels_are_never_deleted() {
        let chat = Arc::new(FakeChat::default().with_member(7, &[DEV_ROLE]));
        let ctx = test_context(Arc::new(FakeTracker::default()), chat.clone());
        let expires_at = soon();
        let confirm = interaction(ActionId::ConfirmDelete { expires_at }, 7, TODO_CHANNEL);
        assert!(matches!(
            confirm_delete(&ctx, &confirm).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn opens_ticket_in_todo_channel_when_provisioning_is_off() {
        let chat = Arc::new(FakeChat::default());
        let mut config = test_config();
        config.provisioning.enabled = false;
        let ctx = AppContext::new(
            Arc::new(config),
            Arc::new(FakeTracker::default()),
            chat.clone(),
        );

        let channel = open_ticket(&ctx, &draft(), &issue()).await.expect("open");
        assert_eq!(channel, TODO_CHANNEL);
        assert!(chat.created().is_empty());
        assert_eq!(chat.sent_to(TODO_CHANNEL).len(), 1);
    }

    #[tokio::test]
    async fn falls_back_to_todo_channel_when_creation_fails() {
        let mut chat = FakeChat::default();
        chat.fail_channel_creation = true;
        let chat = Arc::new(chat);
        let ctx = test_context(Arc::new(FakeTracker::default()), chat.clone());

        let channel = open_ticket(&ctx, &draft(), &issue()).await.expect("open");
        assert_eq!(channel, TODO_CHANNEL);
        assert_eq!(chat.sent().len(), 1);
    }

    #[tokio::test]
    async fn provisioned_ticket_is_mirrored_to_todo_channel() {
        let chat = Arc::new(FakeChat::default());
        let ctx = test_context(Arc::new(FakeTracker::default()), chat.clone());

        let channel = open_ticket(&ctx, &draft(), &issue()).await.expect("open");
        assert_ne!(channel, TODO_CHANNEL);
        assert_eq!(chat.sent_to(channel).len(), 1);
        let mirrored = chat.sent_to(TODO_CHANNEL);
        assert_eq!(mirrored.len(), 1);
        assert!(mirrored[0].rows.is_empty());
    }

    #[tokio::test]
    async fn todo_mirror_failure_keeps_the_posted_panel() {
        let mut chat = FakeChat::default();
        chat.unreachable_channels.insert(TODO_CHANNEL);
        let chat = Arc::new(chat);
        let ctx = test_context(Arc::new(FakeTracker::default()), chat.clone());

        let channel = open_ticket(&ctx, &draft(), &issue()).await.expect("open");
        assert_eq!(chat.created().len(), 1);
        assert_ne!(channel, TODO_CHANNEL);
        assert_eq!(chat.sent_to(channel).len(), 1);
    }

    fn announcing_context(chat: Arc<FakeChat>) -> AppContext {
        let mut config = test_config();
        config.channels.create = Some(ANNOUNCE_CHANNEL);
        AppContext::new(Arc::new(config), Arc::new(FakeTracker::default()), chat)
    }

    #[tokio::test]
    async fn new_ticket_is_announced_once() {
        let chat = Arc::new(FakeChat::default());
        let ctx = announcing_context(chat.clone());

        open_ticket(&ctx, &draft(), &issue()).await.expect("open");

        let announcements = chat.sent_to(ANNOUNCE_CHANNEL);
        assert_eq!(announcements.len(), 1);
        let text = announcements[0].content.as_deref().unwrap_or_default();
        assert!(text.contains("https://github.com/acme/api/issues/42"));
        assert!(text.contains(&format!("<@&{DEV_ROLE}>")));
    }

    #[tokio::test]
    async fn unreachable_announcement_channel_does_not_block_the_ticket() {
        let mut chat = FakeChat::default();
        chat.unreachable_channels.insert(ANNOUNCE_CHANNEL);
        let chat = Arc::new(chat);
        let ctx = announcing_context(chat.clone());

        let channel = open_ticket(&ctx, &draft(), &issue()).await.expect("open");
        assert_eq!(chat.sent_to(channel).len(), 1);
        assert!(chat.sent_to(ANNOUNCE_CHANNEL).is_empty());
    }
}
