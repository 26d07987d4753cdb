use crate::domain::events::UserDomainEvent;
use crate::domain::ports::EventPublisher;

/// Publishes domain events as structured log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl EventPublisher<UserDomainEvent> for TracingEventPublisher {
    fn publish(&self, event: &UserDomainEvent) {
        let (action, at) = match event {
            UserDomainEvent::Created { at, .. } => ("user created", at),
            UserDomainEvent::Updated { at, .. } => ("user updated", at),
            UserDomainEvent::Deleted { at, .. } => ("user deleted", at),
            UserDomainEvent::LoggedIn { at, .. } => ("user logged in", at),
        };
        tracing::info!(user_id = %event.user_id(), at = %at, "{}", action);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventPublisher;

impl EventPublisher<UserDomainEvent> for NoopEventPublisher {
    fn publish(&self, _event: &UserDomainEvent) {}
}
