use std::time::Duration;

use crate::domain::action::{ActionId, PanelTag};
use crate::domain::lifecycle::LifecycleState;
use crate::domain::ticket::{Category, Collaborator, Issue, Priority, RepoTarget};

/// Select menus cannot carry more options than this.
pub const MAX_SELECT_OPTIONS: usize = 25;
pub const NO_COLLABORATOR_VALUE: &str = "none";

pub const COMPLETE_PANEL_TIMEOUT: Duration = Duration::from_secs(300);
pub const CONFIRM_DELETE_TIMEOUT: Duration = Duration::from_secs(60);

pub mod colour {
    pub const BLURPLE: u32 = 0x5865F2;
    pub const BLUE: u32 = 0x3498DB;
    pub const ORANGE: u32 = 0xE67E22;
    pub const GREEN: u32 = 0x2ECC71;
    pub const RED: u32 = 0xE74C3C;
}

/// Platform-neutral rendering of one message and its controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub rows: Vec<Row>,
    pub expires_after: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Buttons(Vec<Button>),
    Select(Select),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub action: ActionId,
    pub label: String,
    pub style: ButtonStyle,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub action: ActionId,
    pub placeholder: String,
    pub options: Vec<SelectOption>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Structured text-entry form opened from the intake panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalForm {
    pub action: ActionId,
    pub title: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub paragraph: bool,
    pub required: bool,
}

pub const FIELD_TITLE: &str = "ticket_title";
pub const FIELD_DESCRIPTION: &str = "ticket_description";
pub const FIELD_TECHNICAL: &str = "technical_description";

impl ModalForm {
    pub fn ticket(category: Category, priority: Priority, repo: RepoTarget) -> Self {
        Self {
            action: ActionId::SubmitForm {
                category,
                priority,
                repo,
            },
            title: "Create Ticket".to_string(),
            fields: vec![
                FormField {
                    id: FIELD_TITLE,
                    label: "Ticket Title",
                    placeholder: "Short summary of the problem",
                    paragraph: false,
                    required: true,
                },
                FormField {
                    id: FIELD_DESCRIPTION,
                    label: "Ticket Description",
                    placeholder: "What happened and what did you expect?",
                    paragraph: true,
                    required: true,
                },
                FormField {
                    id: FIELD_TECHNICAL,
                    label: "Technical Description",
                    placeholder: "Stack traces, endpoints, versions (optional)",
                    paragraph: true,
                    required: false,
                },
            ],
        }
    }
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            colour,
            fields: Vec::new(),
        }
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

impl Panel {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embed: Some(embed),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Same panel with every control greyed out. Used once a panel times out.
    pub fn disabled(mut self) -> Self {
        for row in &mut self.rows {
            match row {
                Row::Buttons(buttons) => buttons.iter_mut().for_each(|b| b.disabled = true),
                Row::Select(select) => select.disabled = true,
            }
        }
        self.expires_after = None;
        self
    }

    pub fn actions(&self) -> Vec<&ActionId> {
        self.rows
            .iter()
            .flat_map(|row| match row {
                Row::Buttons(buttons) => buttons.iter().map(|b| &b.action).collect::<Vec<_>>(),
                Row::Select(select) => vec![&select.action],
            })
            .collect()
    }
}

/// Every panel the bot renders, together with the data its controls need.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    Intake,
    Todo {
        repo: RepoTarget,
        issue: Issue,
        collaborators: Vec<Collaborator>,
        claimed_by: Option<String>,
    },
    Done {
        repo: RepoTarget,
        issue: Issue,
        assignee: String,
    },
    Complete {
        /// `None` when the ticket has no dedicated channel to clean up.
        delete_until: Option<i64>,
    },
    ConfirmDelete {
        channel_id: u64,
        expires_at: i64,
    },
}

impl PanelKind {
    pub fn tag(&self) -> PanelTag {
        match self {
            PanelKind::Intake => PanelTag::Intake,
            PanelKind::Todo { .. } => PanelTag::Todo,
            PanelKind::Done { .. } => PanelTag::Done,
            PanelKind::Complete { .. } => PanelTag::Complete,
            PanelKind::ConfirmDelete { .. } => PanelTag::ConfirmDelete,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.tag().state()
    }

    pub fn render(&self) -> Panel {
        match self {
            PanelKind::Intake => render_intake(),
            PanelKind::Todo {
                repo,
                issue,
                collaborators,
                claimed_by,
            } => render_todo(
                *repo,
                issue,
                collaborators,
                claimed_by.as_deref(),
                self.state(),
            ),
            PanelKind::Done {
                repo,
                issue,
                assignee,
            } => render_done(*repo, issue, assignee, self.state()),
            PanelKind::Complete { delete_until } => render_complete(*delete_until),
            PanelKind::ConfirmDelete {
                channel_id,
                expires_at,
            } => render_confirm_delete(*channel_id, *expires_at),
        }
    }
}

fn render_intake() -> Panel {
    let embed = Embed::new(
        "🎫 Create Ticket",
        "Choose the ticket category, priority and repository.\n\
         Then click **Create Ticket**.",
        colour::BLURPLE,
    );

    let select = |action: ActionId, placeholder: &str, options: Vec<SelectOption>| {
        Row::Select(Select {
            action,
            placeholder: placeholder.to_string(),
            options,
            disabled: false,
        })
    };

    Panel {
        content: None,
        embed: Some(embed),
        rows: vec![
            select(
                ActionId::SelectCategory,
                "Choose a category",
                Category::ALL
                    .iter()
                    .map(|c| option(c.label(), c.as_str()))
                    .collect(),
            ),
            select(
                ActionId::SelectPriority,
                "Choose a priority",
                Priority::ALL
                    .iter()
                    .map(|p| option(p.label(), p.as_str()))
                    .collect(),
            ),
            select(
                ActionId::SelectRepo,
                "Choose a repository (default: backend)",
                RepoTarget::ALL
                    .iter()
                    .map(|r| option(r.label(), r.as_str()))
                    .collect(),
            ),
            Row::Buttons(vec![Button {
                action: ActionId::CreateTicket,
                label: "🎟️ Create Ticket".to_string(),
                style: ButtonStyle::Success,
                disabled: false,
            }]),
        ],
        expires_after: None,
    }
}

fn render_todo(
    repo: RepoTarget,
    issue: &Issue,
    collaborators: &[Collaborator],
    claimed_by: Option<&str>,
    state: LifecycleState,
) -> Panel {
    let mut options = collaborators
        .iter()
        .take(MAX_SELECT_OPTIONS)
        .map(|c| option(&c.login, &c.login))
        .collect::<Vec<_>>();
    let empty = options.is_empty();
    if empty {
        options.push(option("No collaborators found", NO_COLLABORATOR_VALUE));
    }

    let embed = match claimed_by {
        None => Embed::new(
            format!("📋 New Ticket #{}", issue.number),
            "Pick an assignee to start working on this ticket.",
            colour::BLUE,
        )
        .field("GitHub Issue", format!("[View Issue]({})", issue.url), false)
        .field("Repository", repo.as_str(), true)
        .field("Status", state.status_label(), true),
        Some(claimer) => Embed::new(
            "🔄 Ticket Claimed",
            format!("**Claimed by:** {claimer}"),
            colour::ORANGE,
        )
        .field("GitHub Issue", format!("[View Issue]({})", issue.url), false)
        .field("Status", "Claimed - Awaiting GitHub Assignment", true)
        .field(
            "Note",
            "Use the dropdown above to assign this ticket in GitHub",
            false,
        ),
    };

    Panel {
        content: None,
        embed: Some(embed),
        rows: vec![
            Row::Select(Select {
                action: ActionId::Assign {
                    repo,
                    issue: issue.number,
                },
                placeholder: "Select an assignee".to_string(),
                options,
                disabled: empty,
            }),
            Row::Buttons(vec![Button {
                action: ActionId::Claim {
                    repo,
                    issue: issue.number,
                },
                label: "🚀 Claim Ticket".to_string(),
                style: ButtonStyle::Primary,
                disabled: false,
            }]),
        ],
        expires_after: None,
    }
}

fn render_done(
    repo: RepoTarget,
    issue: &Issue,
    assignee: &str,
    state: LifecycleState,
) -> Panel {
    let embed = Embed::new(
        "🔄 Ticket in Progress",
        format!("**Assignee:** {assignee}"),
        colour::ORANGE,
    )
    .field("GitHub Issue", format!("[View Issue]({})", issue.url), false)
    .field("Status", state.status_label(), true);

    Panel {
        content: None,
        embed: Some(embed),
        rows: vec![Row::Buttons(vec![Button {
            action: ActionId::MarkDone {
                repo,
                issue: issue.number,
            },
            label: "✅ Mark as Done".to_string(),
            style: ButtonStyle::Success,
            disabled: false,
        }])],
        expires_after: None,
    }
}

fn render_complete(delete_until: Option<i64>) -> Panel {
    let mut panel = Panel::text("✅ **Ticket completed and moved to done channel**");
    if let Some(expires_at) = delete_until {
        panel.rows.push(Row::Buttons(vec![Button {
            action: ActionId::DeleteChannel { expires_at },
            label: "🗑️ Delete Channel".to_string(),
            style: ButtonStyle::Danger,
            disabled: false,
        }]));
        panel.expires_after = Some(COMPLETE_PANEL_TIMEOUT);
    }
    panel
}

fn render_confirm_delete(channel_id: u64, expires_at: i64) -> Panel {
    let embed = Embed::new(
        "⚠️ Delete Channel Confirmation",
        format!(
            "Are you sure you want to delete <#{channel_id}>?\n\n\
             **This action cannot be undone!**"
        ),
        colour::RED,
    );

    Panel {
        content: None,
        embed: Some(embed),
        rows: vec![Row::Buttons(vec![
            Button {
                action: ActionId::ConfirmDelete { expires_at },
                label: "✅ Yes, Delete".to_string(),
                style: ButtonStyle::Danger,
                disabled: false,
            },
            Button {
                action: ActionId::CancelDelete { expires_at },
                label: "❌ Cancel".to_string(),
                style: ButtonStyle::Secondary,
                disabled: false,
            },
        ])],
        expires_after: Some(CONFIRM_DELETE_TIMEOUT),
    }
}

/// Summary posted to the completion channel once the issue is closed.
pub fn completion_summary(repo_path: &str, url: &str, assignee: Option<&str>) -> Panel {
    Panel::embed(
        Embed::new(
            "✅ Ticket Completed",
            "This ticket has been successfully completed and closed.",
            colour::GREEN,
        )
        .field("GitHub Issue", format!("[View Closed Issue]({url})"), false)
        .field("Assignee", assignee.unwrap_or("Unassigned"), true)
        .field("Repository", repo_path, true),
    )
}

fn option(label: &str, value: &str) -> SelectOption {
    SelectOption {
        label: label.to_string(),
        value: value.to_string(),
    }
}
