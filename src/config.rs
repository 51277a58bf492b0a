use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_WEB_URL: &str = "https://github.com";
const DEFAULT_CATEGORY_NAME: &str = "Tickets";
const DEFAULT_ENTRY_POINT_FILE: &str = "ticket_message.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub guild_id: u64,
    pub github: GitHubConfig,
    pub channels: ChannelConfig,
    pub roles: RoleConfig,
    pub provisioning: ProvisioningConfig,
    pub entry_point_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: String,
    pub api_url: String,
    pub web_url: String,
    pub owner: String,
    pub backend_repo: String,
    pub frontend_repo: String,
}

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Channel holding the intake message.
    pub ticket: u64,
    pub todo: u64,
    pub done: u64,
    /// Optional announcement channel for new tickets.
    pub create: Option<u64>,
}

impl ChannelConfig {
    /// Channels shared by the whole team. These are never deleted.
    pub fn shared(&self) -> Vec<u64> {
        let mut ids = vec![self.ticket, self.todo, self.done];
        ids.extend(self.create);
        ids
    }
}

#[derive(Debug, Clone)]
pub struct RoleConfig {
    pub developer: u64,
    pub staff: Option<u64>,
    pub admin: Option<u64>,
    pub owner: Option<u64>,
    pub head_staff: Option<u64>,
    pub head_mod: Option<u64>,
    pub trial_mod: Option<u64>,
    pub designer: Option<u64>,
}

/// How a role is treated on a dedicated ticket channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAccess {
    Member,
    Manager,
}

impl RoleConfig {
    /// Roles allowed to delete a completed ticket's channel.
    pub fn deletion_roles(&self) -> Vec<u64> {
        let mut roles = vec![self.developer];
        roles.extend([self.staff, self.admin, self.owner].into_iter().flatten());
        roles
    }

    /// Configured optional roles granted access to ticket channels.
    pub fn channel_roles(&self) -> Vec<(u64, RoleAccess)> {
        [
            (self.staff, RoleAccess::Member),
            (self.admin, RoleAccess::Manager),
            (self.owner, RoleAccess::Manager),
            (self.head_staff, RoleAccess::Manager),
            (self.head_mod, RoleAccess::Member),
            (self.trial_mod, RoleAccess::Member),
            (self.designer, RoleAccess::Member),
        ]
        .into_iter()
        .filter_map(|(role, access)| role.map(|id| (id, access)))
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    pub enabled: bool,
    pub category_name: String,
    pub default_category_id: Option<u64>,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        // A missing .env file is fine; the process environment may already be set.
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        Ok(Self {
            discord_token: vars.required("DISCORD_TOKEN")?,
            guild_id: vars.required_id("GUILD_ID")?,
            github: GitHubConfig {
                token: vars.required("GITHUB_TOKEN")?,
                api_url: vars
                    .optional("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
                web_url: vars
                    .optional("GITHUB_WEB_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_WEB_URL.to_string()),
                owner: vars.required("REPO_OWNER")?,
                backend_repo: vars.required("REPO_NAME")?,
                frontend_repo: vars.required("REPO_NAME_FRONTEND")?,
            },
            channels: ChannelConfig {
                ticket: vars.required_id("TICKET_CHANNEL_ID")?,
                todo: vars.required_id("TODO_CHANNEL_ID")?,
                done: vars.required_id("DONE_CHANNEL_ID")?,
                create: vars.optional_id("CREATE_CHANNEL_ID")?,
            },
            roles: RoleConfig {
                developer: vars.required_id("DEV_ROLE_ID")?,
                staff: vars.optional_id("STAFF_ROLE_ID")?,
                admin: vars.optional_id("ADMIN_ROLE_ID")?,
                owner: vars.optional_id("OWNER_ROLE_ID")?,
                head_staff: vars.optional_id("HEAD_STAFF_ROLE_ID")?,
                head_mod: vars.optional_id("HEAD_MOD_ROLE_ID")?,
                trial_mod: vars.optional_id("TRIAL_MOD_ROLE_ID")?,
                designer: vars.optional_id("DESIGNER_ROLE_ID")?,
            },
            provisioning: ProvisioningConfig {
                enabled: vars.flag("TICKET_CHANNELS", true)?,
                category_name: vars
                    .optional("TICKET_CATEGORY_NAME")
                    .unwrap_or_else(|| DEFAULT_CATEGORY_NAME.to_string()),
                default_category_id: vars.optional_id("TICKET_DEFAULT_CATEGORY_ID")?,
            },
            entry_point_file: vars
                .optional("ENTRY_POINT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY_POINT_FILE)),
        })
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> AppResult<String> {
        self.optional(key)
            .ok_or_else(|| AppError::Configuration(format!("{key} is not set")))
    }

    fn optional_id(&self, key: &str) -> AppResult<Option<u64>> {
        self.optional(key)
            .map(|value| {
                value.parse::<u64>().map_err(|_| {
                    AppError::Configuration(format!("{key} must be a numeric id, got '{value}'"))
                })
            })
            .transpose()
    }

    fn required_id(&self, key: &str) -> AppResult<u64> {
        self.optional_id(key)?
            .ok_or_else(|| AppError::Configuration(format!("{key} is not set")))
    }

    fn flag(&self, key: &str, default: bool) -> AppResult<bool> {
        match self.optional(key).map(|v| v.to_lowercase()) {
            None => Ok(default),
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
            Some(v) => Err(AppError::Configuration(format!(
                "{key} must be true or false, got '{v}'"
            ))),
        }
    }
}
