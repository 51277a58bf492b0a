use async_trait::async_trait;

use crate::domain::ticket::{ClosedIssue, Collaborator, Issue, RepoTarget, TicketDraft};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn create_issue(&self, draft: &TicketDraft) -> AppResult<Issue>;

    /// Never fails; an unreachable tracker yields an empty list.
    async fn list_collaborators(&self, repo: RepoTarget) -> Vec<Collaborator>;

    /// Returns the issue's browser URL.
    async fn assign_issue(&self, repo: RepoTarget, issue: u64, assignee: &str)
    -> AppResult<String>;

    async fn close_issue(&self, repo: RepoTarget, issue: u64) -> AppResult<ClosedIssue>;

    fn issue_url(&self, repo: RepoTarget, issue: u64) -> String;

    /// `owner/name` of the repository behind a target.
    fn repo_path(&self, repo: RepoTarget) -> String;
}
