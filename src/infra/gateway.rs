use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serenity::all::{
    ActionRowComponent, ComponentInteraction, ComponentInteractionDataKind, Context,
    CreateInteractionResponse, CreateInteractionResponseFollowup, CreateInteractionResponseMessage,
    EditInteractionResponse, EventHandler, Http, Interaction as GatewayInteraction,
    ModalInteraction, Ready, User,
};
use serenity::async_trait;
use tracing::{debug, error, info, warn};

use crate::context::AppContext;
use crate::domain::action::ActionId;
use crate::domain::panel::Panel;
use crate::infra::discord;
use crate::store::EntryPointStore;
use crate::workflow::dispatch::dispatch;
use crate::workflow::entry_point::{EntryPointStatus, ensure_entry_point};
use crate::workflow::interaction::{Actor, FollowUp, Interaction, Outcome, Reply};
use crate::workflow::lifecycle::run_deferred;

const GENERIC_FAILURE: &str = "❌ Something went wrong while handling this action.";

pub struct Handler {
    ctx: AppContext,
    store: EntryPointStore,
}

impl Handler {
    pub fn new(ctx: AppContext, store: EntryPointStore) -> Self {
        Self { ctx, store }
    }
}

/// Component presses and form submissions answer through the same webhook calls.
enum Incoming {
    Component(ComponentInteraction),
    Modal(ModalInteraction),
}

impl Incoming {
    async fn respond(
        &self,
        http: &Http,
        response: CreateInteractionResponse,
    ) -> serenity::Result<()> {
        match self {
            Incoming::Component(inner) => inner.create_response(http, response).await,
            Incoming::Modal(inner) => inner.create_response(http, response).await,
        }
    }

    async fn follow_up(
        &self,
        http: &Http,
        follow_up: CreateInteractionResponseFollowup,
    ) -> serenity::Result<()> {
        let sent = match self {
            Incoming::Component(inner) => inner.create_followup(http, follow_up).await,
            Incoming::Modal(inner) => inner.create_followup(http, follow_up).await,
        };
        sent.map(|_| ())
    }

    async fn edit_original(
        &self,
        http: &Http,
        edit: EditInteractionResponse,
    ) -> serenity::Result<()> {
        let edited = match self {
            Incoming::Component(inner) => inner.edit_response(http, edit).await,
            Incoming::Modal(inner) => inner.edit_response(http, edit).await,
        };
        edited.map(|_| ())
    }
}

fn actor(user: &User) -> Actor {
    Actor {
        id: user.id.get(),
        name: user.name.clone(),
    }
}

fn from_component(component: &ComponentInteraction) -> Option<Interaction> {
    let action = ActionId::parse(&component.data.custom_id)?;
    let values = match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.clone(),
        _ => Vec::new(),
    };
    Some(Interaction {
        action,
        actor: actor(&component.user),
        channel_id: component.channel_id.get(),
        message_id: Some(component.message.id.get()),
        values,
        fields: HashMap::new(),
    })
}

fn from_modal(modal: &ModalInteraction) -> Option<Interaction> {
    let action = ActionId::parse(&modal.data.custom_id)?;
    let fields = modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.clone(),
                input.value.clone().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect();
    Some(Interaction {
        action,
        actor: actor(&modal.user),
        channel_id: modal.channel_id.get(),
        message_id: modal.message.as_ref().map(|message| message.id.get()),
        values: Vec::new(),
        fields,
    })
}

fn response(reply: &Reply) -> CreateInteractionResponse {
    match reply {
        Reply::Acknowledge => CreateInteractionResponse::Acknowledge,
        Reply::Ephemeral(text) => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(text.as_str())
                .ephemeral(true),
        ),
        Reply::EphemeralPanel(panel) => {
            CreateInteractionResponse::Message(discord::response_message(panel).ephemeral(true))
        }
        Reply::Update(panel) => {
            CreateInteractionResponse::UpdateMessage(discord::response_message(panel))
        }
        Reply::Modal(form) => CreateInteractionResponse::Modal(discord::modal(form)),
    }
}

/// Form submissions file an issue and may create a channel before they can
/// answer, which does not fit in Discord's initial response window.
fn answers_late(action: &ActionId) -> bool {
    matches!(action, ActionId::SubmitForm { .. })
}

/// Final answer to an interaction that was deferred as an ephemeral "thinking"
/// reply. Modals and bare acknowledgements cannot follow a deferral.
fn deferred_answer(reply: &Reply) -> Option<EditInteractionResponse> {
    match reply {
        Reply::Ephemeral(text) => Some(EditInteractionResponse::new().content(text.as_str())),
        Reply::EphemeralPanel(panel) | Reply::Update(panel) => Some(
            EditInteractionResponse::new()
                .content(panel.content.clone().unwrap_or_default())
                .embeds(panel.embed.iter().map(discord::embed).collect())
                .components(discord::action_rows(&panel.rows)),
        ),
        Reply::Acknowledge | Reply::Modal(_) => None,
    }
}

fn follow_up(follow_up: &FollowUp) -> CreateInteractionResponseFollowup {
    match follow_up {
        FollowUp::Public(text) => CreateInteractionResponseFollowup::new().content(text.as_str()),
        FollowUp::Ephemeral(text) => CreateInteractionResponseFollowup::new()
            .content(text.as_str())
            .ephemeral(true),
    }
}

fn expiring_panel(reply: &Reply) -> Option<(Panel, Duration)> {
    match reply {
        Reply::Update(panel) | Reply::EphemeralPanel(panel) => panel
            .expires_after
            .map(|timeout| (panel.clone().disabled(), timeout)),
        _ => None,
    }
}

impl Handler {
    async fn handle(&self, http: Arc<Http>, incoming: Incoming, interaction: Interaction) {
        let late = answers_late(&interaction.action);
        if late {
            let thinking = CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            );
            if let Err(err) = incoming.respond(&http, thinking).await {
                error!("failed to defer interaction: {err}");
                return;
            }
        }

        // Run the handler on its own task so a panic only costs this interaction.
        let ctx = self.ctx.clone();
        let outcome = match tokio::spawn(async move { dispatch(&ctx, interaction).await }).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("interaction handler panicked: {err}");
                Outcome::ephemeral(GENERIC_FAILURE)
            }
        };

        let answered = if late {
            match deferred_answer(&outcome.reply) {
                Some(edit) => incoming.edit_original(&http, edit).await,
                None => {
                    warn!("reply cannot follow a deferred interaction, dropping it");
                    Ok(())
                }
            }
        } else {
            incoming.respond(&http, response(&outcome.reply)).await
        };
        if let Err(err) = answered {
            error!("failed to answer interaction: {err}");
            return;
        }

        for item in &outcome.follow_ups {
            if let Err(err) = incoming.follow_up(&http, follow_up(item)).await {
                warn!("failed to send follow-up: {err}");
            }
        }

        let expiring = expiring_panel(&outcome.reply);
        let deferred = outcome.deferred;
        if expiring.is_none() && deferred.is_none() {
            return;
        }

        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            if let Some(deferred) = deferred {
                if let Some(report) = run_deferred(&ctx, deferred).await {
                    if let Err(err) = incoming.follow_up(&http, follow_up(&report)).await {
                        debug!("deferred report not delivered: {err}");
                    }
                }
            }
            if let Some((disabled, timeout)) = expiring {
                tokio::time::sleep(timeout).await;
                let edit = EditInteractionResponse::new()
                    .components(discord::action_rows(&disabled.rows));
                if let Err(err) = incoming.edit_original(&http, edit).await {
                    debug!("expired panel not disabled: {err}");
                }
            }
        });
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = ready.user.name.as_str(), "connected to Discord");
        match ensure_entry_point(&self.ctx, &self.store).await {
            Ok(EntryPointStatus::Reattached(id)) => info!(message = id, "intake panel reattached"),
            Ok(EntryPointStatus::Created(id)) => info!(message = id, "intake panel posted"),
            Err(err) => error!("ticket entry point unavailable: {err}"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: GatewayInteraction) {
        let (incoming, parsed) = match interaction {
            GatewayInteraction::Component(component) => {
                let parsed = from_component(&component);
                (Incoming::Component(component), parsed)
            }
            GatewayInteraction::Modal(modal) => {
                let parsed = from_modal(&modal);
                (Incoming::Modal(modal), parsed)
            }
            _ => return,
        };

        match parsed {
            Some(parsed) => self.handle(ctx.http.clone(), incoming, parsed).await,
            None => debug!("ignoring interaction with unknown custom id"),
        }
    }
}
