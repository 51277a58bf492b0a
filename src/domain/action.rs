use std::fmt;

use crate::domain::lifecycle::{LifecycleEvent, LifecycleState};
use crate::domain::ticket::{Category, Priority, RepoTarget};

/// Panel family an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTag {
    Intake,
    Todo,
    Done,
    Complete,
    ConfirmDelete,
}

impl PanelTag {
    /// State a ticket is in while this panel is showing.
    pub fn state(self) -> LifecycleState {
        match self {
            PanelTag::Intake => LifecycleState::AwaitingForm,
            PanelTag::Todo => LifecycleState::AwaitingAssignment,
            PanelTag::Done => LifecycleState::InProgress,
            PanelTag::Complete => LifecycleState::Completed,
            PanelTag::ConfirmDelete => LifecycleState::PendingDeletion,
        }
    }
}

/// Stable custom id attached to every interactive control.
///
/// Everything a handler needs is encoded in the id itself, so a control on any
/// persisted message can be routed again after a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionId {
    SelectCategory,
    SelectPriority,
    SelectRepo,
    CreateTicket,
    SubmitForm {
        category: Category,
        priority: Priority,
        repo: RepoTarget,
    },
    Assign {
        repo: RepoTarget,
        issue: u64,
    },
    Claim {
        repo: RepoTarget,
        issue: u64,
    },
    MarkDone {
        repo: RepoTarget,
        issue: u64,
    },
    DeleteChannel {
        expires_at: i64,
    },
    ConfirmDelete {
        expires_at: i64,
    },
    CancelDelete {
        expires_at: i64,
    },
}

const SELECT_CATEGORY: &str = "ticket_category";
const SELECT_PRIORITY: &str = "ticket_priority";
const SELECT_REPO: &str = "ticket_repo";
const CREATE_TICKET: &str = "ticket_create_button";
const SUBMIT_FORM: &str = "ticket_modal";
const ASSIGN: &str = "assign";
const CLAIM: &str = "claim";
const MARK_DONE: &str = "done";
const DELETE_CHANNEL: &str = "delete_channel";
const CONFIRM_DELETE: &str = "confirm_delete";
const CANCEL_DELETE: &str = "cancel_delete";

impl ActionId {
    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split(':');
        let prefix = parts.next()?;
        let args = parts.collect::<Vec<_>>();

        let action = match (prefix, args.as_slice()) {
            (SELECT_CATEGORY, []) => ActionId::SelectCategory,
            (SELECT_PRIORITY, []) => ActionId::SelectPriority,
            (SELECT_REPO, []) => ActionId::SelectRepo,
            (CREATE_TICKET, []) => ActionId::CreateTicket,
            (SUBMIT_FORM, [category, priority, repo]) => ActionId::SubmitForm {
                category: Category::from_str(category)?,
                priority: Priority::from_str(priority)?,
                repo: RepoTarget::from_str(repo)?,
            },
            (ASSIGN, [repo, issue]) => ActionId::Assign {
                repo: RepoTarget::from_str(repo)?,
                issue: issue.parse().ok()?,
            },
            (CLAIM, [repo, issue]) => ActionId::Claim {
                repo: RepoTarget::from_str(repo)?,
                issue: issue.parse().ok()?,
            },
            (MARK_DONE, [repo, issue]) => ActionId::MarkDone {
                repo: RepoTarget::from_str(repo)?,
                issue: issue.parse().ok()?,
            },
            (DELETE_CHANNEL, [expires_at]) => ActionId::DeleteChannel {
                expires_at: expires_at.parse().ok()?,
            },
            (CONFIRM_DELETE, [expires_at]) => ActionId::ConfirmDelete {
                expires_at: expires_at.parse().ok()?,
            },
            (CANCEL_DELETE, [expires_at]) => ActionId::CancelDelete {
                expires_at: expires_at.parse().ok()?,
            },
            _ => return None,
        };
        Some(action)
    }

    pub fn panel(&self) -> PanelTag {
        match self {
            ActionId::SelectCategory
            | ActionId::SelectPriority
            | ActionId::SelectRepo
            | ActionId::CreateTicket
            | ActionId::SubmitForm { .. } => PanelTag::Intake,
            ActionId::Assign { .. } | ActionId::Claim { .. } => PanelTag::Todo,
            ActionId::MarkDone { .. } => PanelTag::Done,
            ActionId::DeleteChannel { .. } => PanelTag::Complete,
            ActionId::ConfirmDelete { .. } | ActionId::CancelDelete { .. } => {
                PanelTag::ConfirmDelete
            }
        }
    }

    /// Lifecycle event the action drives, if any. Intake selections and the
    /// button that opens the form only collect input.
    pub fn event(&self) -> Option<LifecycleEvent> {
        match self {
            ActionId::SelectCategory
            | ActionId::SelectPriority
            | ActionId::SelectRepo
            | ActionId::CreateTicket => None,
            ActionId::SubmitForm { .. } => Some(LifecycleEvent::IssueCreated),
            ActionId::Assign { .. } => Some(LifecycleEvent::AssigneeSet),
            ActionId::Claim { .. } => Some(LifecycleEvent::Claimed),
            ActionId::MarkDone { .. } => Some(LifecycleEvent::IssueClosed),
            ActionId::DeleteChannel { .. } => Some(LifecycleEvent::DeletionRequested),
            ActionId::ConfirmDelete { .. } => Some(LifecycleEvent::DeletionConfirmed),
            ActionId::CancelDelete { .. } => Some(LifecycleEvent::DeletionCancelled),
        }
    }

    /// Deadline after which the control must no longer act.
    pub fn expires_at(&self) -> Option<i64> {
        match self {
            ActionId::DeleteChannel { expires_at }
            | ActionId::ConfirmDelete { expires_at }
            | ActionId::CancelDelete { expires_at } => Some(*expires_at),
            _ => None,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionId::SelectCategory => f.write_str(SELECT_CATEGORY),
            ActionId::SelectPriority => f.write_str(SELECT_PRIORITY),
            ActionId::SelectRepo => f.write_str(SELECT_REPO),
            ActionId::CreateTicket => f.write_str(CREATE_TICKET),
            ActionId::SubmitForm {
                category,
                priority,
                repo,
            } => write!(
                f,
                "{SUBMIT_FORM}:{}:{}:{}",
                category.as_str(),
                priority.as_str(),
                repo.as_str()
            ),
            ActionId::Assign { repo, issue } => write!(f, "{ASSIGN}:{}:{issue}", repo.as_str()),
            ActionId::Claim { repo, issue } => write!(f, "{CLAIM}:{}:{issue}", repo.as_str()),
            ActionId::MarkDone { repo, issue } => {
                write!(f, "{MARK_DONE}:{}:{issue}", repo.as_str())
            }
            ActionId::DeleteChannel { expires_at } => write!(f, "{DELETE_CHANNEL}:{expires_at}"),
            ActionId::ConfirmDelete { expires_at } => write!(f, "{CONFIRM_DELETE}:{expires_at}"),
            ActionId::CancelDelete { expires_at } => write!(f, "{CANCEL_DELETE}:{expires_at}"),
        }
    }
}
