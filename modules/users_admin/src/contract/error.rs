use thiserror::Error;

/// Errors that are safe to expose to consumers of the contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersAdminError {
    #[error("User not found: {id}")]
    NotFound { id: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("You don't have permission to {action}")]
    PermissionDenied { permission: String, action: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl UsersAdminError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn permission_denied(permission: impl Into<String>) -> Self {
        let permission = permission.into();
        let action = describe_permission(&permission);
        Self::PermissionDenied { permission, action }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Turn `delete-users` into `delete users` for user-facing denial messages.
fn describe_permission(permission: &str) -> String {
    permission.replace('-', " ")
}

impl From<crate::domain::error::DomainError> for UsersAdminError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id),
            Validation { field, message } => Self::validation(field, message),
            PermissionDenied { permission } => Self::permission_denied(permission),
            DuplicateId { id } => Self::internal(format!("duplicate user id {id}")),
            Persistence { message } => Self::internal(message),
        }
    }
}
