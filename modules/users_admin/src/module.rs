use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::UsersAdminConfig;
use crate::contract::client::UsersAdminApi;
use crate::contract::model::AuthUser;
use crate::domain::events::UserDomainEvent;
use crate::domain::permissions::{RoleCatalog, STANDARD_ROLES};
use crate::domain::ports::{Authenticator, Clock, EventPublisher, IdGenerator};
use crate::domain::seed::default_users;
use crate::domain::store::UserStore;
use crate::gateways::local::UsersAdminLocalClient;
use crate::infra::storage::{KeyValueStore, KvUsersRepository, SessionStore};
use crate::infra::system::{SystemClock, UuidIdGenerator};

/// Wiring for the users admin core: one store, one session, one client,
/// all sharing the same key-value medium.
pub struct UsersAdmin {
    store: Arc<Mutex<UserStore>>,
    session: Arc<SessionStore>,
    catalog: RoleCatalog,
    config: UsersAdminConfig,
}

/// Optional overrides for the injected collaborators.
pub struct UsersAdminDeps {
    pub events: Arc<dyn EventPublisher<UserDomainEvent>>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl Default for UsersAdminDeps {
    fn default() -> Self {
        Self {
            events: Arc::new(crate::infra::events::TracingEventPublisher),
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidIdGenerator),
        }
    }
}

impl UsersAdmin {
    pub fn init(
        config: UsersAdminConfig,
        kv: Arc<dyn KeyValueStore>,
        deps: UsersAdminDeps,
    ) -> anyhow::Result<Self> {
        info!("Initializing users_admin module");
        debug!(
            "Loaded users_admin config: default_page_size={}, max_page_size={}, users_key={}",
            config.default_page_size, config.max_page_size, config.users_key
        );
        if config.default_page_size == 0 || config.max_page_size == 0 {
            anyhow::bail!("page sizes must be positive");
        }

        let catalog = STANDARD_ROLES.clone();
        let repo = KvUsersRepository::new(kv.clone(), config.users_key.clone());
        let store = UserStore::load(
            Arc::new(repo),
            deps.events,
            deps.clock,
            deps.ids,
            default_users(&catalog),
        );
        let session = SessionStore::new(kv, config.session_key.clone());

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            session: Arc::new(session),
            catalog,
            config,
        })
    }

    /// Client that authorizes mutations against the signed-in session.
    pub fn client(&self) -> Arc<dyn UsersAdminApi> {
        Arc::new(UsersAdminLocalClient::new(
            self.store.clone(),
            self.session.clone(),
            self.catalog.clone(),
            self.config.max_page_size,
        ))
    }

    /// Client that authorizes mutations against a fixed actor.
    pub fn client_for(&self, actor: Option<AuthUser>) -> Arc<dyn UsersAdminApi> {
        Arc::new(UsersAdminLocalClient::new(
            self.store.clone(),
            Arc::new(actor),
            self.catalog.clone(),
            self.config.max_page_size,
        ))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn roles(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &UsersAdminConfig {
        &self.config
    }

    /// Check credentials, remember the principal and stamp the matching
    /// user record's last login. `Ok(None)` means the credentials were refused.
    pub fn login(
        &self,
        authenticator: &dyn Authenticator,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Option<AuthUser>> {
        let Some(actor) = authenticator.authenticate(email, password) else {
            info!("Login refused for {}", email);
            return Ok(None);
        };

        self.session.sign_in(&actor)?;
        if let Err(e) = self.store.lock().record_login(&actor.id) {
            debug!("No user record to stamp for actor {}: {}", actor.id, e);
        }
        info!("Signed in as {} ({})", actor.email, actor.role.id);
        Ok(Some(actor))
    }

    pub fn logout(&self) -> anyhow::Result<()> {
        self.session.sign_out()?;
        info!("Signed out");
        Ok(())
    }
}
