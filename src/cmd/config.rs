use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked).
    Show,
    /// Validate the environment without connecting to Discord.
    Check,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    let config = AppConfig::load()?;
    match command {
        ConfigCommand::Show => {
            for line in describe(&config) {
                println!("{line}");
            }
        }
        ConfigCommand::Check => println!("Configuration OK."),
    }
    Ok(())
}

fn describe(config: &AppConfig) -> Vec<String> {
    let github = &config.github;
    let roles = &config.roles;
    let provisioning = &config.provisioning;

    vec![
        format!("Discord token: {}", mask_secret(&config.discord_token)),
        format!("Guild: {}", config.guild_id),
        format!("GitHub token: {}", mask_secret(&github.token)),
        format!("GitHub API: {}", github.api_url),
        format!("Backend repository: {}/{}", github.owner, github.backend_repo),
        format!("Frontend repository: {}/{}", github.owner, github.frontend_repo),
        format!("Ticket channel: {}", config.channels.ticket),
        format!("Todo channel: {}", config.channels.todo),
        format!("Done channel: {}", config.channels.done),
        format!("Announcement channel: {}", display_id(config.channels.create)),
        format!("Developer role: {}", roles.developer),
        format!("Staff role: {}", display_id(roles.staff)),
        format!("Admin role: {}", display_id(roles.admin)),
        format!("Owner role: {}", display_id(roles.owner)),
        format!("Head staff role: {}", display_id(roles.head_staff)),
        format!("Head mod role: {}", display_id(roles.head_mod)),
        format!("Trial mod role: {}", display_id(roles.trial_mod)),
        format!("Designer role: {}", display_id(roles.designer)),
        format!("Ticket channels: {}", if provisioning.enabled { "on" } else { "off" }),
        format!("Ticket category: {}", provisioning.category_name),
        format!(
            "Fallback category: {}",
            display_id(provisioning.default_category_id)
        ),
        format!("Entry point file: {}", config.entry_point_file.display()),
    ]
}

fn display_id(value: Option<u64>) -> String {
    value
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(token: &str) -> String {
    match token.chars().count() {
        0 => "<not set>".to_string(),
        n if n > 6 => {
            let prefix: String = token.chars().take(3).collect();
            let suffix: String = token.chars().skip(n - 3).collect();
            format!("{prefix}***{suffix}")
        }
        _ => "***".to_string(),
    }
}
