use std::collections::HashMap;
use std::time::Duration;

use crate::domain::action::ActionId;
use crate::domain::panel::{ModalForm, Panel};

/// Member who triggered an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    pub name: String,
}

impl Actor {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// One button press, select change or form submission, stripped of platform types.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub action: ActionId,
    pub actor: Actor,
    pub channel_id: u64,
    /// Message carrying the control; `None` for forms opened outside a message.
    pub message_id: Option<u64>,
    pub values: Vec<String>,
    pub fields: HashMap<String, String>,
}

impl Interaction {
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }
}

/// Immediate answer to an interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Acknowledge,
    Ephemeral(String),
    EphemeralPanel(Panel),
    /// Replace the message the control lives on.
    Update(Panel),
    Modal(ModalForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    Public(String),
    Ephemeral(String),
}

/// Work that must run after the reply has been sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    DeleteChannel { channel_id: u64, delay: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub reply: Reply,
    pub follow_ups: Vec<FollowUp>,
    pub deferred: Option<Deferred>,
}

impl Outcome {
    pub fn reply(reply: Reply) -> Self {
        Self {
            reply,
            follow_ups: Vec::new(),
            deferred: None,
        }
    }

    pub fn ephemeral(message: impl Into<String>) -> Self {
        Self::reply(Reply::Ephemeral(message.into()))
    }

    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_ups.push(follow_up);
        self
    }

    pub fn with_deferred(mut self, deferred: Deferred) -> Self {
        self.deferred = Some(deferred);
        self
    }
}
