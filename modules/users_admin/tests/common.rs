#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use users_admin::contract::model::{AuthUser, NewUser, Role, User, UserStatus};
use users_admin::domain::events::UserDomainEvent;
use users_admin::domain::permissions::STANDARD_ROLES;
use users_admin::domain::ports::EventPublisher;
use users_admin::domain::repo::UsersRepository;
use users_admin::domain::seed::default_users;
use users_admin::domain::store::UserStore;
use users_admin::infra::system::{FixedClock, SequentialIdGenerator};

/// In-memory repository that counts writes and can be told to fail them.
#[derive(Default)]
pub struct CountingRepo {
    pub stored: Mutex<Option<Vec<User>>>,
    pub saves: AtomicUsize,
    pub fail_saves: AtomicBool,
    pub fail_loads: AtomicBool,
}

impl CountingRepo {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with(users: Vec<User>) -> Arc<Self> {
        let repo = Self::default();
        *repo.stored.lock() = Some(users);
        Arc::new(repo)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn stored_users(&self) -> Option<Vec<User>> {
        self.stored.lock().clone()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl UsersRepository for CountingRepo {
    fn load(&self) -> anyhow::Result<Option<Vec<User>>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            anyhow::bail!("slot unreadable");
        }
        Ok(self.stored.lock().clone())
    }

    fn save(&self, users: &[User]) -> anyhow::Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            anyhow::bail!("quota exceeded");
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock() = Some(users.to_vec());
        Ok(())
    }
}

/// Keeps every published event for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<UserDomainEvent>>,
}

impl RecordingPublisher {
    pub fn taken(&self) -> Vec<UserDomainEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventPublisher<UserDomainEvent> for RecordingPublisher {
    fn publish(&self, event: &UserDomainEvent) {
        self.events.lock().push(event.clone());
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn role(id: &str) -> Role {
    STANDARD_ROLES.get(id).cloned().unwrap()
}

pub fn actor(role_id: &str) -> AuthUser {
    AuthUser {
        id: format!("actor-{role_id}"),
        name: format!("{role_id} actor"),
        email: format!("{role_id}@example.com"),
        role: role(role_id),
    }
}

pub fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        role: role("user"),
        status: UserStatus::Active,
        last_login: None,
    }
}

/// A store over `repo` with a fixed clock and ids starting at 100.
pub fn store_over(repo: Arc<CountingRepo>) -> (UserStore, Arc<RecordingPublisher>) {
    let events = Arc::new(RecordingPublisher::default());
    let store = UserStore::load(
        repo,
        events.clone(),
        Arc::new(FixedClock(now())),
        Arc::new(SequentialIdGenerator::starting_at(100)),
        default_users(&STANDARD_ROLES),
    );
    (store, events)
}

/// A store already holding the twelve seed users.
pub fn seeded_store() -> (UserStore, Arc<CountingRepo>, Arc<RecordingPublisher>) {
    let repo = CountingRepo::with(default_users(&STANDARD_ROLES));
    let (store, events) = store_over(repo.clone());
    (store, repo, events)
}
