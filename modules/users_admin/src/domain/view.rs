use crate::contract::model::{FilterCriteria, Pagination, User, UserStatus, UsersPage};
use crate::domain::filter::{filtered_page, matches, total_pages};

/// State of the users table: filter selection plus the requested page.
///
/// Holds no copy of the data. Callers run [`UsersView::recompute`] after any
/// mutation or setter call to obtain the current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersView {
    criteria: FilterCriteria,
    pagination: Pagination,
}

impl Default for UsersView {
    fn default() -> Self {
        Self::new(Pagination::default().page_size)
    }
}

impl UsersView {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            pagination: Pagination {
                page: 1,
                page_size: page_size.max(1),
            },
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.pagination.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<UserStatus>) {
        self.criteria.status = status;
        self.pagination.page = 1;
    }

    pub fn set_role_filter(&mut self, role_id: Option<String>) {
        self.criteria.role_id = role_id;
        self.pagination.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size.max(1);
        self.pagination.page = 1;
    }

    /// Derive the window from `users`, first pulling the page back onto the
    /// last non-empty page if the result set shrank underneath it.
    pub fn recompute(&mut self, users: &[User]) -> UsersPage {
        let total = users
            .iter()
            .filter(|u| matches(u, &self.criteria))
            .count();
        let last = total_pages(total, self.pagination.page_size).max(1);
        if self.pagination.page > last {
            self.pagination.page = last;
        }
        filtered_page(users, &self.criteria, self.pagination)
    }
}
