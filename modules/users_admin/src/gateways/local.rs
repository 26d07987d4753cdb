use std::sync::Arc;

use parking_lot::Mutex;

use crate::contract::{
    client::UsersAdminApi,
    error::UsersAdminError,
    model::{DashboardStats, FilterCriteria, NewUser, Pagination, User, UserPatch, UsersPage},
};
use crate::domain::filter::filtered_page;
use crate::domain::gate::AuthorizationGate;
use crate::domain::permissions::RoleCatalog;
use crate::domain::ports::ActorSupplier;
use crate::domain::store::UserStore;

/// Local implementation of the UsersAdminApi trait that routes mutations
/// through the authorization gate on behalf of the current actor.
pub struct UsersAdminLocalClient {
    store: Arc<Mutex<UserStore>>,
    actor: Arc<dyn ActorSupplier>,
    catalog: RoleCatalog,
    max_page_size: usize,
}

impl UsersAdminLocalClient {
    pub fn new(
        store: Arc<Mutex<UserStore>>,
        actor: Arc<dyn ActorSupplier>,
        catalog: RoleCatalog,
        max_page_size: usize,
    ) -> Self {
        Self {
            store,
            actor,
            catalog,
            max_page_size: max_page_size.max(1),
        }
    }
}

impl UsersAdminApi for UsersAdminLocalClient {
    fn list_users(&self) -> Vec<User> {
        self.store.lock().list().to_vec()
    }

    fn get_user(&self, id: &str) -> Result<User, UsersAdminError> {
        self.store.lock().get(id).cloned().map_err(Into::into)
    }

    fn filtered_page(&self, criteria: &FilterCriteria, pagination: Pagination) -> UsersPage {
        let pagination = Pagination {
            page: pagination.page,
            page_size: pagination.page_size.min(self.max_page_size),
        };
        filtered_page(self.store.lock().list(), criteria, pagination)
    }

    fn stats(&self) -> DashboardStats {
        DashboardStats::compute(self.store.lock().list(), &self.catalog)
    }

    fn create_user(&self, new_user: NewUser) -> Result<User, UsersAdminError> {
        let actor = self.actor.current_actor();
        let mut store = self.store.lock();
        AuthorizationGate::new(&mut store, actor.as_ref())
            .create(new_user)
            .map_err(Into::into)
    }

    fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, UsersAdminError> {
        let actor = self.actor.current_actor();
        let mut store = self.store.lock();
        AuthorizationGate::new(&mut store, actor.as_ref())
            .update(id, patch)
            .map_err(Into::into)
    }

    fn delete_user(&self, id: &str) -> Result<(), UsersAdminError> {
        let actor = self.actor.current_actor();
        let mut store = self.store.lock();
        AuthorizationGate::new(&mut store, actor.as_ref())
            .delete(id)
            .map_err(Into::into)
    }
}
