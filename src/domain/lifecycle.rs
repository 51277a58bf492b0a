use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    AwaitingForm,
    AwaitingAssignment,
    InProgress,
    Completed,
    PendingDeletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    IssueCreated,
    Claimed,
    AssigneeSet,
    IssueClosed,
    DeletionRequested,
    DeletionCancelled,
    DeletionConfirmed,
}

impl LifecycleState {
    /// Forward-only transition table. Claiming and cancelling a deletion are the
    /// only moves that do not advance the ticket.
    pub fn next(self, event: LifecycleEvent) -> Option<LifecycleState> {
        use LifecycleEvent as E;
        use LifecycleState as S;

        match (self, event) {
            (S::AwaitingForm, E::IssueCreated) => Some(S::AwaitingAssignment),
            (S::AwaitingAssignment, E::Claimed) => Some(S::AwaitingAssignment),
            (S::AwaitingAssignment, E::AssigneeSet) => Some(S::InProgress),
            (S::InProgress, E::IssueClosed) => Some(S::Completed),
            (S::Completed, E::DeletionRequested) => Some(S::PendingDeletion),
            (S::PendingDeletion, E::DeletionCancelled) => Some(S::Completed),
            (S::PendingDeletion, E::DeletionConfirmed) => Some(S::PendingDeletion),
            _ => None,
        }
    }

    pub fn advance(self, event: LifecycleEvent) -> AppResult<LifecycleState> {
        self.next(event)
            .ok_or(AppError::InvalidTransition { from: self, event })
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            LifecycleState::AwaitingForm => "Awaiting Form",
            LifecycleState::AwaitingAssignment => "Waiting for Assignment",
            LifecycleState::InProgress => "Work in Progress",
            LifecycleState::Completed => "Completed",
            LifecycleState::PendingDeletion => "Pending Deletion",
        }
    }
}
