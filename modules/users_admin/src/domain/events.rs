use chrono::{DateTime, Utc};

/// Transport-agnostic domain event, published after a mutation is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDomainEvent {
    Created { id: String, at: DateTime<Utc> },
    Updated { id: String, at: DateTime<Utc> },
    Deleted { id: String, at: DateTime<Utc> },
    LoggedIn { id: String, at: DateTime<Utc> },
}

impl UserDomainEvent {
    pub fn user_id(&self) -> &str {
        match self {
            Self::Created { id, .. }
            | Self::Updated { id, .. }
            | Self::Deleted { id, .. }
            | Self::LoggedIn { id, .. } => id,
        }
    }
}
