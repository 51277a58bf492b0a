use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::domain::action::ActionId;
use crate::domain::panel::{FIELD_DESCRIPTION, FIELD_TECHNICAL, FIELD_TITLE, ModalForm};
use crate::domain::ticket::{Category, Priority, RepoTarget, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::workflow::interaction::{Interaction, Outcome, Reply};
use crate::workflow::lifecycle;

/// Choices one member has made on one intake message so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeSelection {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub repo: Option<RepoTarget>,
}

impl IntakeSelection {
    /// The text-entry form, once both category and priority are known.
    pub fn form(&self) -> AppResult<ModalForm> {
        match (self.category, self.priority) {
            (Some(category), Some(priority)) => Ok(ModalForm::ticket(
                category,
                priority,
                self.repo.unwrap_or(RepoTarget::Backend),
            )),
            _ => Err(AppError::Validation(
                "⚠️ Please choose a category and a priority first!".to_string(),
            )),
        }
    }
}

type SessionKey = (u64, u64);

/// Selections untouched for this long are forgotten.
pub const SESSION_TTL: Duration = Duration::from_secs(15 * 60);

/// Per-member selections keyed by `(message, member)`, so two people filling in
/// the same intake message never see each other's choices.
#[derive(Default)]
pub struct IntakeSessions {
    selections: Mutex<HashMap<SessionKey, (IntakeSelection, Instant)>>,
}

impl IntakeSessions {
    pub async fn get(&self, key: SessionKey) -> IntakeSelection {
        self.selections
            .lock()
            .await
            .get(&key)
            .filter(|(_, touched)| touched.elapsed() < SESSION_TTL)
            .map(|(selection, _)| *selection)
            .unwrap_or_default()
    }

    pub async fn update(&self, key: SessionKey, apply: impl FnOnce(&mut IntakeSelection)) {
        let mut selections = self.selections.lock().await;
        let before = selections.len();
        selections.retain(|_, (_, touched)| touched.elapsed() < SESSION_TTL);
        if selections.len() < before {
            debug!(dropped = before - selections.len(), "stale intake selections dropped");
        }

        let entry = selections
            .entry(key)
            .or_insert_with(|| (IntakeSelection::default(), Instant::now()));
        apply(&mut entry.0);
        entry.1 = Instant::now();
    }

    pub async fn clear(&self, key: SessionKey) {
        self.selections.lock().await.remove(&key);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.selections.lock().await.len()
    }
}

fn session_key(interaction: &Interaction) -> SessionKey {
    (
        interaction.message_id.unwrap_or(interaction.channel_id),
        interaction.actor.id,
    )
}

/// Stores a category, priority or repository choice. Only acknowledges.
pub async fn select(ctx: &AppContext, interaction: &Interaction) -> AppResult<Outcome> {
    let value = interaction
        .first_value()
        .ok_or_else(|| AppError::Validation("⚠️ Nothing was selected.".to_string()))?;
    let invalid = || AppError::Validation(format!("⚠️ Unknown option '{value}'."));
    let key = session_key(interaction);

    match &interaction.action {
        ActionId::SelectCategory => {
            let category = Category::from_str(value).ok_or_else(invalid)?;
            ctx.sessions
                .update(key, |s| s.category = Some(category))
                .await;
        }
        ActionId::SelectPriority => {
            let priority = Priority::from_str(value).ok_or_else(invalid)?;
            ctx.sessions
                .update(key, |s| s.priority = Some(priority))
                .await;
        }
        ActionId::SelectRepo => {
            let repo = RepoTarget::from_str(value).ok_or_else(invalid)?;
            ctx.sessions.update(key, |s| s.repo = Some(repo)).await;
        }
        other => {
            return Err(AppError::Validation(format!(
                "⚠️ {other} is not an intake selection."
            )));
        }
    }
    Ok(Outcome::reply(Reply::Acknowledge))
}

/// "Create ticket" pressed: opens the form or explains what is missing.
pub async fn open_form(ctx: &AppContext, interaction: &Interaction) -> AppResult<Outcome> {
    let selection = ctx.sessions.get(session_key(interaction)).await;
    let form = selection.form()?;
    Ok(Outcome::reply(Reply::Modal(form)))
}

/// Form submitted: validates, files the issue and opens the ticket lifecycle.
pub async fn submit(
    ctx: &AppContext,
    interaction: &Interaction,
    category: Category,
    priority: Priority,
    repo: RepoTarget,
) -> AppResult<Outcome> {
    // A submission always starts the next ticket from scratch.
    ctx.sessions.clear(session_key(interaction)).await;

    let draft = TicketDraft::new(
        category,
        priority,
        repo,
        interaction.field(FIELD_TITLE).unwrap_or_default(),
        interaction.field(FIELD_DESCRIPTION).unwrap_or_default(),
        interaction.field(FIELD_TECHNICAL),
    )?;

    let issue = match ctx.tracker.create_issue(&draft).await {
        Ok(issue) => issue,
        Err(err) => {
            warn!(actor = interaction.actor.id, "ticket creation failed: {err}");
            return Ok(Outcome::ephemeral(format!(
                "❌ Ticket could not be created\n{}",
                err.user_message()
            )));
        }
    };

    info!(
        actor = interaction.actor.id,
        issue = issue.number,
        repo = repo.as_str(),
        "ticket filed"
    );

    match lifecycle::open_ticket(ctx, &draft, &issue).await {
        Ok(channel_id) => Ok(Outcome::ephemeral(format!(
            "✅ Ticket created: {}\nFollow it in <#{channel_id}>.",
            issue.url
        ))),
        Err(err) => {
            warn!(issue = issue.number, "ticket panel could not be posted: {err}");
            Ok(Outcome::ephemeral(format!(
                "⚠️ Issue {} was created, but its ticket panel could not be posted.\n{}",
                issue.url,
                err.user_message()
            )))
        }
    }
}
