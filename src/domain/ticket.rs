use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bug,
    Feature,
    Documentation,
    Help,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Bug,
        Category::Feature,
        Category::Documentation,
        Category::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Feature => "feature",
            Category::Documentation => "documentation",
            Category::Help => "help",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Bug => "🐞 Bug",
            Category::Feature => "✨ Feature",
            Category::Documentation => "📚 Documentation",
            Category::Help => "🆘 Help",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "bug" => Some(Category::Bug),
            "feature" => Some(Category::Feature),
            "documentation" => Some(Category::Documentation),
            "help" => Some(Category::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "🔴 High",
            Priority::Medium => "🟡 Medium",
            Priority::Low => "🟢 Low",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// Which of the two configured repositories receives the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoTarget {
    Frontend,
    Backend,
}

impl RepoTarget {
    pub const ALL: [RepoTarget; 2] = [RepoTarget::Frontend, RepoTarget::Backend];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepoTarget::Frontend => "frontend",
            RepoTarget::Backend => "backend",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepoTarget::Frontend => "🎨 Frontend",
            RepoTarget::Backend => "🎯 Backend",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "frontend" => Some(RepoTarget::Frontend),
            "backend" => Some(RepoTarget::Backend),
            _ => None,
        }
    }
}

/// Validated form input, ready to be filed as an issue.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub category: Category,
    pub priority: Priority,
    pub repo: RepoTarget,
    pub title: String,
    pub description: String,
    pub technical_description: Option<String>,
}

impl TicketDraft {
    pub fn new(
        category: Category,
        priority: Priority,
        repo: RepoTarget,
        title: &str,
        description: &str,
        technical_description: Option<&str>,
    ) -> AppResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation(
                "❌ The ticket title must not be empty.".to_string(),
            ));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "❌ The ticket description must not be empty.".to_string(),
            ));
        }
        let technical_description = technical_description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(Self {
            category,
            priority,
            repo,
            title: title.to_string(),
            description: description.to_string(),
            technical_description,
        })
    }

    pub fn labels(&self) -> Vec<String> {
        vec![
            self.category.as_str().to_string(),
            self.priority.as_str().to_string(),
        ]
    }

    pub fn body(&self) -> String {
        format!(
            "### Description\n{}\n\n### Technical Description\n{}\n",
            self.description,
            self.technical_description.as_deref().unwrap_or("-")
        )
    }
}

/// Identity of a filed issue. Never changes once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub number: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collaborator {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedIssue {
    pub url: String,
    pub assignee: Option<String>,
}
