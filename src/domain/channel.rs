use crate::domain::ticket::RepoTarget;

const MAX_TITLE_SLUG: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ViewChannel,
    SendMessages,
    ReadMessageHistory,
    AttachFiles,
    EmbedLinks,
    ManageChannels,
    ManageMessages,
}

impl Permission {
    pub const MEMBER: [Permission; 5] = [
        Permission::ViewChannel,
        Permission::SendMessages,
        Permission::ReadMessageHistory,
        Permission::AttachFiles,
        Permission::EmbedLinks,
    ];

    pub const MANAGE: [Permission; 2] = [Permission::ManageChannels, Permission::ManageMessages];
}

/// Permission override for one role on a ticket channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overwrite {
    pub role_id: u64,
    pub allow: Vec<Permission>,
    pub deny: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRequest {
    pub name: ChannelName,
    pub category_id: Option<u64>,
    pub topic: String,
    pub overwrites: Vec<Overwrite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelName(pub String);

impl ChannelName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn for_ticket(repo: RepoTarget, title: &str) -> Self {
        let slug = slugify(title);
        let capped = slug
            .char_indices()
            .take_while(|(idx, _)| *idx < MAX_TITLE_SLUG)
            .map(|(_, c)| c)
            .collect::<String>();
        let capped = capped.trim_end_matches('-');
        let capped = if capped.is_empty() { "ticket" } else { capped };
        Self(format!("{}-{}", repo.as_str(), capped))
    }
}

fn slugify(input: &str) -> String {
    let clean = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();

    let trimmed = clean.trim_matches('-');
    let mut result = String::with_capacity(trimmed.len());
    let mut prev_dash = false;
    for ch in trimmed.chars() {
        if ch == '-' {
            if !prev_dash {
                result.push(ch);
            }
            prev_dash = true;
        } else {
            result.push(ch);
            prev_dash = false;
        }
    }
    result
}
