use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ButtonStyle as DiscordButtonStyle, ChannelId, ChannelType, Colour, CreateActionRow,
    CreateButton, CreateChannel, CreateEmbed, CreateInputText, CreateInteractionResponseMessage,
    CreateMessage, CreateModal, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
    EditMessage, GuildId, Http, InputTextStyle, MessageId, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId, UserId,
};
use serenity::http::HttpError;

use crate::domain::channel::{ChannelRequest, Overwrite, Permission};
use crate::domain::panel::{Button, ButtonStyle, Embed, ModalForm, Panel, Row, Select};
use crate::error::{AppError, AppResult};
use crate::services::ChatPlatform;

/// Discord REST implementation of the chat seam, scoped to one guild.
pub struct DiscordChat {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl DiscordChat {
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            guild_id: GuildId::new(guild_id),
        }
    }
}

fn chat_error(err: serenity::Error) -> AppError {
    AppError::Chat(err.to_string())
}

fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

#[async_trait]
impl ChatPlatform for DiscordChat {
    async fn fetch_channel(&self, channel_id: u64) -> AppResult<()> {
        ChannelId::new(channel_id)
            .to_channel(&self.http)
            .await
            .map(|_| ())
            .map_err(chat_error)
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> AppResult<bool> {
        match ChannelId::new(channel_id)
            .message(&self.http, MessageId::new(message_id))
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if is_not_found(&err) => Ok(false),
            Err(err) => Err(chat_error(err)),
        }
    }

    async fn send_panel(&self, channel_id: u64, panel: &Panel) -> AppResult<u64> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, create_message(panel))
            .await
            .map_err(chat_error)?;
        Ok(message.id.get())
    }

    async fn edit_panel(&self, channel_id: u64, message_id: u64, panel: &Panel) -> AppResult<()> {
        ChannelId::new(channel_id)
            .edit_message(&self.http, MessageId::new(message_id), edit_message(panel))
            .await
            .map(|_| ())
            .map_err(chat_error)
    }

    async fn create_text_channel(&self, request: &ChannelRequest) -> AppResult<u64> {
        let mut builder = CreateChannel::new(request.name.as_str())
            .kind(ChannelType::Text)
            .topic(request.topic.as_str())
            .permissions(request.overwrites.iter().map(permission_overwrite));
        if let Some(category_id) = request.category_id {
            builder = builder.category(ChannelId::new(category_id));
        }

        let channel = self
            .guild_id
            .create_channel(&self.http, builder)
            .await
            .map_err(chat_error)?;
        Ok(channel.id.get())
    }

    async fn delete_channel(&self, channel_id: u64, reason: &str) -> AppResult<()> {
        self.http
            .delete_channel(ChannelId::new(channel_id), Some(reason))
            .await
            .map(|_| ())
            .map_err(chat_error)
    }

    async fn find_category(&self, name: &str) -> AppResult<Option<u64>> {
        let channels = self
            .guild_id
            .channels(&self.http)
            .await
            .map_err(chat_error)?;
        Ok(channels
            .values()
            .find(|channel| {
                channel.kind == ChannelType::Category && channel.name.eq_ignore_ascii_case(name)
            })
            .map(|channel| channel.id.get()))
    }

    async fn resolve_roles(&self, role_ids: &[u64]) -> AppResult<Vec<u64>> {
        let roles = self.guild_id.roles(&self.http).await.map_err(chat_error)?;
        Ok(role_ids
            .iter()
            .copied()
            .filter(|id| roles.contains_key(&RoleId::new(*id)))
            .collect())
    }

    async fn member_roles(&self, user_id: u64) -> AppResult<Vec<u64>> {
        let member = self
            .guild_id
            .member(&self.http, UserId::new(user_id))
            .await
            .map_err(chat_error)?;
        Ok(member.roles.iter().map(|role| role.get()).collect())
    }
}

fn permission_overwrite(overwrite: &Overwrite) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: permissions(&overwrite.allow),
        deny: permissions(&overwrite.deny),
        kind: PermissionOverwriteType::Role(RoleId::new(overwrite.role_id)),
    }
}

fn permissions(list: &[Permission]) -> Permissions {
    list.iter().fold(Permissions::empty(), |acc, permission| {
        acc | match permission {
            Permission::ViewChannel => Permissions::VIEW_CHANNEL,
            Permission::SendMessages => Permissions::SEND_MESSAGES,
            Permission::ReadMessageHistory => Permissions::READ_MESSAGE_HISTORY,
            Permission::AttachFiles => Permissions::ATTACH_FILES,
            Permission::EmbedLinks => Permissions::EMBED_LINKS,
            Permission::ManageChannels => Permissions::MANAGE_CHANNELS,
            Permission::ManageMessages => Permissions::MANAGE_MESSAGES,
        }
    })
}

pub fn embed(embed: &Embed) -> CreateEmbed {
    embed.fields.iter().fold(
        CreateEmbed::new()
            .title(embed.title.as_str())
            .description(embed.description.as_str())
            .colour(Colour::new(embed.colour)),
        |builder, field| builder.field(field.name.as_str(), field.value.as_str(), field.inline),
    )
}

pub fn action_rows(rows: &[Row]) -> Vec<CreateActionRow> {
    rows.iter()
        .map(|row| match row {
            Row::Buttons(buttons) => CreateActionRow::Buttons(buttons.iter().map(button).collect()),
            Row::Select(select) => CreateActionRow::SelectMenu(select_menu(select)),
        })
        .collect()
}

fn button(button: &Button) -> CreateButton {
    let style = match button.style {
        ButtonStyle::Primary => DiscordButtonStyle::Primary,
        ButtonStyle::Secondary => DiscordButtonStyle::Secondary,
        ButtonStyle::Success => DiscordButtonStyle::Success,
        ButtonStyle::Danger => DiscordButtonStyle::Danger,
    };
    CreateButton::new(button.action.to_string())
        .label(button.label.as_str())
        .style(style)
        .disabled(button.disabled)
}

fn select_menu(select: &Select) -> CreateSelectMenu {
    let options = select
        .options
        .iter()
        .map(|option| CreateSelectMenuOption::new(option.label.as_str(), option.value.as_str()))
        .collect();
    CreateSelectMenu::new(
        select.action.to_string(),
        CreateSelectMenuKind::String { options },
    )
    .placeholder(select.placeholder.as_str())
    .disabled(select.disabled)
}

pub fn modal(form: &ModalForm) -> CreateModal {
    let rows = form
        .fields
        .iter()
        .map(|field| {
            let style = if field.paragraph {
                InputTextStyle::Paragraph
            } else {
                InputTextStyle::Short
            };
            CreateActionRow::InputText(
                CreateInputText::new(style, field.label, field.id)
                    .placeholder(field.placeholder)
                    .required(field.required),
            )
        })
        .collect();
    CreateModal::new(form.action.to_string(), form.title.as_str()).components(rows)
}

fn create_message(panel: &Panel) -> CreateMessage {
    let mut message = CreateMessage::new().components(action_rows(&panel.rows));
    if let Some(content) = &panel.content {
        message = message.content(content.as_str());
    }
    if let Some(panel_embed) = &panel.embed {
        message = message.embed(embed(panel_embed));
    }
    message
}

fn edit_message(panel: &Panel) -> EditMessage {
    EditMessage::new()
        .content(panel.content.clone().unwrap_or_default())
        .embeds(panel.embed.iter().map(embed).collect())
        .components(action_rows(&panel.rows))
}

/// Interaction response body that fully replaces whatever the message showed.
pub fn response_message(panel: &Panel) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(panel.content.clone().unwrap_or_default())
        .embeds(panel.embed.iter().map(embed).collect())
        .components(action_rows(&panel.rows))
}
