use chrono::Utc;
use tracing::{debug, error, warn};

use crate::context::AppContext;
use crate::domain::action::ActionId;
use crate::domain::lifecycle::LifecycleState;
use crate::error::{AppError, AppResult};
use crate::workflow::interaction::{Interaction, Outcome};
use crate::workflow::{intake, lifecycle};

/// Single entry point for every interaction. Failures never escape: they are
/// logged and turned into a private reply to the acting member.
pub async fn dispatch(ctx: &AppContext, interaction: Interaction) -> Outcome {
    debug!(
        action = %interaction.action,
        panel = ?interaction.action.panel(),
        actor = interaction.actor.id,
        "dispatching interaction"
    );

    match route(ctx, &interaction).await {
        Ok(outcome) => outcome,
        Err(err) => {
            match &err {
                AppError::Validation(_) | AppError::Unauthorized(_) | AppError::Expired => {
                    warn!(action = %interaction.action, actor = interaction.actor.id, "{err}")
                }
                _ => error!(action = %interaction.action, actor = interaction.actor.id, "{err}"),
            }
            Outcome::ephemeral(err.user_message())
        }
    }
}

async fn route(ctx: &AppContext, interaction: &Interaction) -> AppResult<Outcome> {
    let action = &interaction.action;
    if let Some(expires_at) = action.expires_at() {
        ensure_active(expires_at)?;
    }
    if let Some((from, to)) = transition(action)? {
        debug!(action = %action, ?from, ?to, "transition accepted");
    }

    match action.clone() {
        ActionId::SelectCategory | ActionId::SelectPriority | ActionId::SelectRepo => {
            intake::select(ctx, interaction).await
        }
        ActionId::CreateTicket => intake::open_form(ctx, interaction).await,
        ActionId::SubmitForm {
            category,
            priority,
            repo,
        } => intake::submit(ctx, interaction, category, priority, repo).await,
        ActionId::Assign { repo, issue } => lifecycle::assign(ctx, interaction, repo, issue).await,
        ActionId::Claim { repo, issue } => lifecycle::claim(ctx, interaction, repo, issue).await,
        ActionId::MarkDone { repo, issue } => {
            lifecycle::mark_done(ctx, interaction, repo, issue).await
        }
        ActionId::DeleteChannel { .. } => lifecycle::request_delete(ctx, interaction).await,
        ActionId::ConfirmDelete { .. } => lifecycle::confirm_delete(ctx, interaction).await,
        ActionId::CancelDelete { .. } => lifecycle::cancel_delete(interaction).await,
    }
}

/// Looks up the move an action makes from the state of the panel carrying it.
/// Input-only actions make none.
fn transition(action: &ActionId) -> AppResult<Option<(LifecycleState, LifecycleState)>> {
    let Some(event) = action.event() else {
        return Ok(None);
    };
    let from = action.panel().state();
    Ok(Some((from, from.advance(event)?)))
}

fn ensure_active(expires_at: i64) -> AppResult<()> {
    if Utc::now().timestamp() > expires_at {
        return Err(AppError::Expired);
    }
    Ok(())
}
