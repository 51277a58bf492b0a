//! Hand-written fakes shared by the workflow tests.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{AppConfig, ChannelConfig, GitHubConfig, ProvisioningConfig, RoleConfig};
use crate::context::AppContext;
use crate::domain::action::ActionId;
use crate::domain::channel::ChannelRequest;
use crate::domain::panel::Panel;
use crate::domain::ticket::{ClosedIssue, Collaborator, Issue, RepoTarget, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::services::{ChatPlatform, IssueTrackerService};
use crate::workflow::interaction::{Actor, Interaction};

pub const GUILD: u64 = 100;
pub const TICKET_CHANNEL: u64 = 1;
pub const TODO_CHANNEL: u64 = 2;
pub const DONE_CHANNEL: u64 = 3;
pub const DEV_ROLE: u64 = 10;
pub const STAFF_ROLE: u64 = 11;
pub const ADMIN_ROLE: u64 = 12;
pub const DEFAULT_CATEGORY: u64 = 50;

pub fn test_config() -> AppConfig {
    AppConfig {
        discord_token: "discord-token".to_string(),
        guild_id: GUILD,
        github: GitHubConfig {
            token: "gh-token".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            web_url: "https://github.com".to_string(),
            owner: "acme".to_string(),
            backend_repo: "api".to_string(),
            frontend_repo: "web".to_string(),
        },
        channels: ChannelConfig {
            ticket: TICKET_CHANNEL,
            todo: TODO_CHANNEL,
            done: DONE_CHANNEL,
            create: None,
        },
        roles: RoleConfig {
            developer: DEV_ROLE,
            staff: Some(STAFF_ROLE),
            admin: Some(ADMIN_ROLE),
            owner: None,
            head_staff: None,
            head_mod: None,
            trial_mod: None,
            designer: None,
        },
        provisioning: ProvisioningConfig {
            enabled: true,
            category_name: "Tickets".to_string(),
            default_category_id: Some(DEFAULT_CATEGORY),
        },
        entry_point_file: PathBuf::from("ticket_message.json"),
    }
}

pub fn test_context(tracker: Arc<FakeTracker>, chat: Arc<FakeChat>) -> AppContext {
    AppContext::new(Arc::new(test_config()), tracker, chat)
}

pub fn actor(id: u64) -> Actor {
    Actor {
        id,
        name: format!("member{id}"),
    }
}

pub fn interaction(action: ActionId, actor_id: u64, channel_id: u64) -> Interaction {
    Interaction {
        action,
        actor: actor(actor_id),
        channel_id,
        message_id: Some(500),
        values: Vec::new(),
        fields: HashMap::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    Create {
        repo: RepoTarget,
        title: String,
        labels: Vec<String>,
    },
    ListCollaborators(RepoTarget),
    Assign {
        repo: RepoTarget,
        issue: u64,
        assignee: String,
    },
    Close {
        repo: RepoTarget,
        issue: u64,
    },
}

pub struct FakeTracker {
    pub create: Result<Issue, String>,
    pub assign: Result<String, String>,
    pub close: Result<ClosedIssue, String>,
    pub collaborators: Vec<Collaborator>,
    pub calls: Mutex<Vec<TrackerCall>>,
}

impl Default for FakeTracker {
    fn default() -> Self {
        Self {
            create: Ok(Issue {
                number: 42,
                url: "https://github.com/acme/api/issues/42".to_string(),
            }),
            assign: Ok("https://github.com/acme/api/issues/42".to_string()),
            close: Ok(ClosedIssue {
                url: "https://github.com/acme/api/issues/42".to_string(),
                assignee: Some("octocat".to_string()),
            }),
            collaborators: vec![Collaborator {
                login: "octocat".to_string(),
            }],
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeTracker {
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: TrackerCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
    async fn create_issue(&self, draft: &TicketDraft) -> AppResult<Issue> {
        self.record(TrackerCall::Create {
            repo: draft.repo,
            title: draft.title.clone(),
            labels: draft.labels(),
        });
        self.create.clone().map_err(AppError::IssueTracker)
    }

    async fn list_collaborators(&self, repo: RepoTarget) -> Vec<Collaborator> {
        self.record(TrackerCall::ListCollaborators(repo));
        self.collaborators.clone()
    }

    async fn assign_issue(
        &self,
        repo: RepoTarget,
        issue: u64,
        assignee: &str,
    ) -> AppResult<String> {
        self.record(TrackerCall::Assign {
            repo,
            issue,
            assignee: assignee.to_string(),
        });
        self.assign.clone().map_err(AppError::IssueTracker)
    }

    async fn close_issue(&self, repo: RepoTarget, issue: u64) -> AppResult<ClosedIssue> {
        self.record(TrackerCall::Close { repo, issue });
        self.close.clone().map_err(AppError::IssueTracker)
    }

    fn issue_url(&self, repo: RepoTarget, issue: u64) -> String {
        let name = match repo {
            RepoTarget::Frontend => "web",
            RepoTarget::Backend => "api",
        };
        format!("https://github.com/acme/{name}/issues/{issue}")
    }

    fn repo_path(&self, repo: RepoTarget) -> String {
        match repo {
            RepoTarget::Frontend => "acme/web".to_string(),
            RepoTarget::Backend => "acme/api".to_string(),
        }
    }
}

pub struct FakeChat {
    pub categories: HashMap<String, u64>,
    pub guild_roles: Vec<u64>,
    pub member_roles: HashMap<u64, Vec<u64>>,
    pub unreachable_channels: HashSet<u64>,
    pub fail_channel_creation: bool,
    pub messages: Mutex<HashSet<(u64, u64)>>,
    pub sent: Mutex<Vec<(u64, Panel)>>,
    pub edited: Mutex<Vec<(u64, u64, Panel)>>,
    pub created: Mutex<Vec<ChannelRequest>>,
    pub deleted: Mutex<Vec<u64>>,
    next_id: AtomicU64,
}

impl Default for FakeChat {
    fn default() -> Self {
        Self {
            categories: HashMap::from([("tickets".to_string(), 60)]),
            guild_roles: vec![GUILD, DEV_ROLE, STAFF_ROLE, ADMIN_ROLE],
            member_roles: HashMap::new(),
            unreachable_channels: HashSet::new(),
            fail_channel_creation: false,
            messages: Mutex::new(HashSet::new()),
            sent: Mutex::new(Vec::new()),
            edited: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1000),
        }
    }
}

impl FakeChat {
    pub fn with_member(mut self, user_id: u64, roles: &[u64]) -> Self {
        self.member_roles.insert(user_id, roles.to_vec());
        self
    }

    pub fn sent(&self) -> Vec<(u64, Panel)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel_id: u64) -> Vec<Panel> {
        self.sent()
            .into_iter()
            .filter(|(channel, _)| *channel == channel_id)
            .map(|(_, panel)| panel)
            .collect()
    }

    pub fn edited(&self) -> Vec<(u64, u64, Panel)> {
        self.edited.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<ChannelRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.deleted.lock().unwrap().clone()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn reachable(&self, channel_id: u64) -> AppResult<()> {
        if self.unreachable_channels.contains(&channel_id) {
            return Err(AppError::Chat(format!("Unknown Channel {channel_id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatPlatform for FakeChat {
    async fn fetch_channel(&self, channel_id: u64) -> AppResult<()> {
        self.reachable(channel_id)
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> AppResult<bool> {
        self.reachable(channel_id)?;
        Ok(self
            .messages
            .lock()
            .unwrap()
            .contains(&(channel_id, message_id)))
    }

    async fn send_panel(&self, channel_id: u64, panel: &Panel) -> AppResult<u64> {
        self.reachable(channel_id)?;
        let id = self.next_id();
        self.messages.lock().unwrap().insert((channel_id, id));
        self.sent.lock().unwrap().push((channel_id, panel.clone()));
        Ok(id)
    }

    async fn edit_panel(&self, channel_id: u64, message_id: u64, panel: &Panel) -> AppResult<()> {
        self.reachable(channel_id)?;
        self.edited
            .lock()
            .unwrap()
            .push((channel_id, message_id, panel.clone()));
        Ok(())
    }

    async fn create_text_channel(&self, request: &ChannelRequest) -> AppResult<u64> {
        if self.fail_channel_creation {
            return Err(AppError::Chat("Missing Permissions".to_string()));
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(self.next_id())
    }

    async fn delete_channel(&self, channel_id: u64, _reason: &str) -> AppResult<()> {
        self.reachable(channel_id)?;
        self.deleted.lock().unwrap().push(channel_id);
        Ok(())
    }

    async fn find_category(&self, name: &str) -> AppResult<Option<u64>> {
        Ok(self.categories.get(&name.to_lowercase()).copied())
    }

    async fn resolve_roles(&self, role_ids: &[u64]) -> AppResult<Vec<u64>> {
        Ok(role_ids
            .iter()
            .copied()
            .filter(|id| self.guild_roles.contains(id))
            .collect())
    }

    async fn member_roles(&self, user_id: u64) -> AppResult<Vec<u64>> {
        Ok(self.member_roles.get(&user_id).cloned().unwrap_or_default())
    }
}
