use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::events::UserDomainEvent;
use crate::domain::ports::{Clock, EventPublisher, IdGenerator};
use crate::domain::repo::UsersRepository;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Attempts at drawing an unused id before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

/// True if `email` has the basic `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::empty_name());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if !is_valid_email(email) {
        return Err(DomainError::invalid_email(email));
    }
    Ok(())
}

/// Owner of the canonical, insertion-ordered user collection.
///
/// Every mutation writes the whole collection through the repository before
/// the in-memory copy is replaced, so a failed write leaves both untouched.
pub struct UserStore {
    users: Vec<User>,
    repo: Arc<dyn UsersRepository>,
    events: Arc<dyn EventPublisher<UserDomainEvent>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl UserStore {
    /// Load the collection from the repository, falling back to `seed` when the
    /// slot is empty or unreadable. The seed is persisted immediately.
    #[instrument(name = "users_admin.store.load", skip_all)]
    pub fn load(
        repo: Arc<dyn UsersRepository>,
        events: Arc<dyn EventPublisher<UserDomainEvent>>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        seed: Vec<User>,
    ) -> Self {
        let users = match repo.load() {
            Ok(Some(users)) => {
                debug!("Loaded {} users from storage", users.len());
                Some(users)
            }
            Ok(None) => {
                info!("User storage is empty, seeding default dataset");
                None
            }
            Err(e) => {
                warn!("Stored users are unreadable, seeding default dataset: {:#}", e);
                None
            }
        };

        let users = match users {
            Some(users) => users,
            None => {
                if let Err(e) = repo.save(&seed) {
                    warn!("Failed to persist seed dataset (continuing): {:#}", e);
                }
                seed
            }
        };

        Self {
            users,
            repo,
            events,
            clock,
            ids,
        }
    }

    /// Full collection in insertion order.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&User, DomainError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(
        name = "users_admin.store.create",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub fn create(&mut self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        validate_name(&new_user.name)?;
        validate_email(&new_user.email)?;

        let id = self.fresh_id()?;
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            status: new_user.status,
            created_at: self.clock.now(),
            last_login: new_user.last_login,
        };

        let mut next = self.users.clone();
        next.push(user.clone());
        self.commit(next)?;

        self.events.publish(&UserDomainEvent::Created {
            id: user.id.clone(),
            at: user.created_at,
        });

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "users_admin.store.update", skip(self, patch), fields(user_id = %id))]
    pub fn update(&mut self, id: &str, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        let index = self.position(id)?;

        if let Some(ref name) = patch.name {
            validate_name(name)?;
        }
        if let Some(ref email) = patch.email {
            validate_email(email)?;
        }

        let mut current = self.users[index].clone();
        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(email) = patch.email {
            current.email = email;
        }
        if let Some(role) = patch.role {
            current.role = role;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        if let Some(last_login) = patch.last_login {
            current.last_login = Some(last_login);
        }

        let mut next = self.users.clone();
        next[index] = current.clone();
        self.commit(next)?;

        self.events.publish(&UserDomainEvent::Updated {
            id: current.id.clone(),
            at: self.clock.now(),
        });

        info!("Successfully updated user");
        Ok(current)
    }

    #[instrument(name = "users_admin.store.delete", skip(self), fields(user_id = %id))]
    pub fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        let index = self.position(id)?;
        let mut next = self.users.clone();
        next.remove(index);
        self.commit(next)?;

        self.events.publish(&UserDomainEvent::Deleted {
            id: id.to_string(),
            at: self.clock.now(),
        });

        info!("Successfully deleted user");
        Ok(())
    }

    /// Stamp `last_login` with the current time for a successful sign-in.
    #[instrument(name = "users_admin.store.record_login", skip(self), fields(user_id = %id))]
    pub fn record_login(&mut self, id: &str) -> Result<User, DomainError> {
        let index = self.position(id)?;
        let now = self.clock.now();

        let mut next = self.users.clone();
        next[index].last_login = Some(now);
        let user = next[index].clone();
        self.commit(next)?;

        self.events.publish(&UserDomainEvent::LoggedIn {
            id: user.id.clone(),
            at: now,
        });

        debug!("Recorded login");
        Ok(user)
    }

    // --- helpers ---

    fn position(&self, id: &str) -> Result<usize, DomainError> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    fn fresh_id(&self) -> Result<String, DomainError> {
        let mut last = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !self.users.iter().any(|u| u.id == id) {
                return Ok(id);
            }
            debug!("Generated id {} collides, retrying", id);
            last = id;
        }
        Err(DomainError::duplicate_id(last))
    }

    /// Persist `next` and only then adopt it as the in-memory collection.
    fn commit(&mut self, next: Vec<User>) -> Result<(), DomainError> {
        self.repo
            .save(&next)
            .map_err(|e| DomainError::persistence(format!("{e:#}")))?;
        self.users = next;
        Ok(())
    }
}
