use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Permission denied: '{permission}' is required")]
    PermissionDenied { permission: String },

    #[error("Generated user id '{id}' is already in use")]
    DuplicateId { id: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn empty_name() -> Self {
        Self::validation("name", "Name is required")
    }

    pub fn invalid_email(email: &str) -> Self {
        if email.trim().is_empty() {
            Self::validation("email", "Email is required")
        } else {
            Self::validation("email", format!("Email is invalid: '{email}'"))
        }
    }

    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied {
            permission: permission.into(),
        }
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// The form field a validation error belongs to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
