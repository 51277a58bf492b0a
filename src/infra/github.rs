use async_trait::async_trait;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GitHubConfig;
use crate::domain::ticket::{ClosedIssue, Collaborator, Issue, RepoTarget, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const USER_AGENT_VALUE: &str = concat!("ticketbot/", env!("CARGO_PKG_VERSION"));
const COLLABORATOR_PAGE_SIZE: u32 = 100;

pub struct GitHubClient {
    http: Client,
    api_url: String,
    web_url: String,
    token: String,
    owner: String,
    backend_repo: String,
    frontend_repo: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            web_url: config.web_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            owner: config.owner.clone(),
            backend_repo: config.backend_repo.clone(),
            frontend_repo: config.frontend_repo.clone(),
        }
    }

    fn repo_name(&self, repo: RepoTarget) -> &str {
        match repo {
            RepoTarget::Frontend => &self.frontend_repo,
            RepoTarget::Backend => &self.backend_repo,
        }
    }

    fn repo_endpoint(&self, repo: RepoTarget) -> String {
        format!("{}/repos/{}/{}", self.api_url, self.owner, self.repo_name(repo))
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
    }

    async fn patch_issue<T: Serialize + ?Sized>(
        &self,
        repo: RepoTarget,
        issue: u64,
        body: &T,
    ) -> AppResult<IssueResponse> {
        let url = format!("{}/issues/{issue}", self.repo_endpoint(repo));
        let response = self
            .request(reqwest::Method::PATCH, url)
            .json(body)
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call GitHub: {err}")))?;

        let response = expect_status(response, StatusCode::OK).await?;
        response
            .json()
            .await
            .map_err(|err| {
                AppError::IssueTracker(format!("failed to parse GitHub response: {err}"))
            })
    }
}

async fn expect_status(response: Response, expected: StatusCode) -> AppResult<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response>".to_string());
    Err(AppError::IssueTracker(format!(
        "GitHub responded with {status}: {body}"
    )))
}

#[async_trait]
impl IssueTrackerService for GitHubClient {
    async fn create_issue(&self, draft: &TicketDraft) -> AppResult<Issue> {
        let body = draft.body();
        let request_body = CreateIssueRequest {
            title: &draft.title,
            body: &body,
            labels: draft.labels(),
        };

        let url = format!("{}/issues", self.repo_endpoint(draft.repo));
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call GitHub: {err}")))?;

        let response = expect_status(response, StatusCode::CREATED).await?;
        let payload: IssueResponse = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse GitHub response: {err}"))
        })?;

        info!(
            repo = self.repo_name(draft.repo),
            issue = payload.number,
            "created GitHub issue"
        );
        Ok(Issue {
            number: payload.number,
            url: payload.html_url,
        })
    }

    async fn list_collaborators(&self, repo: RepoTarget) -> Vec<Collaborator> {
        let url = format!(
            "{}/collaborators?per_page={COLLABORATOR_PAGE_SIZE}",
            self.repo_endpoint(repo)
        );
        let response = match self.request(reqwest::Method::GET, url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(repo = self.repo_name(repo), "error fetching collaborators: {err}");
                return Vec::new();
            }
        };

        let response = match expect_status(response, StatusCode::OK).await {
            Ok(response) => response,
            Err(err) => {
                warn!(repo = self.repo_name(repo), "error fetching collaborators: {err}");
                return Vec::new();
            }
        };

        match response.json::<Vec<UserResponse>>().await {
            Ok(users) => users
                .into_iter()
                .map(|user| Collaborator { login: user.login })
                .collect(),
            Err(err) => {
                warn!(repo = self.repo_name(repo), "invalid collaborator payload: {err}");
                Vec::new()
            }
        }
    }

    async fn assign_issue(
        &self,
        repo: RepoTarget,
        issue: u64,
        assignee: &str,
    ) -> AppResult<String> {
        let payload = self
            .patch_issue(
                repo,
                issue,
                &AssignIssueRequest {
                    assignees: vec![assignee],
                },
            )
            .await?;
        Ok(payload.html_url)
    }

    async fn close_issue(&self, repo: RepoTarget, issue: u64) -> AppResult<ClosedIssue> {
        let payload = self
            .patch_issue(repo, issue, &CloseIssueRequest { state: "closed" })
            .await?;
        Ok(ClosedIssue {
            url: payload.html_url,
            assignee: payload.assignee.map(|user| user.login),
        })
    }

    fn issue_url(&self, repo: RepoTarget, issue: u64) -> String {
        format!(
            "{}/{}/{}/issues/{issue}",
            self.web_url,
            self.owner,
            self.repo_name(repo)
        )
    }

    fn repo_path(&self, repo: RepoTarget) -> String {
        format!("{}/{}", self.owner, self.repo_name(repo))
    }
}

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    labels: Vec<String>,
}

#[derive(Serialize)]
struct AssignIssueRequest<'a> {
    assignees: Vec<&'a str>,
}

#[derive(Serialize)]
struct CloseIssueRequest {
    state: &'static str,
}

#[derive(Deserialize)]
struct IssueResponse {
    number: u64,
    html_url: String,
    assignee: Option<UserResponse>,
}

#[derive(Deserialize)]
struct UserResponse {
    login: String,
}
