//! Pure derivation of the visible window from the full collection.

use crate::contract::model::{FilterCriteria, Pagination, User, UsersPage};

/// True if `user` survives the search, status and role predicates.
pub fn matches(user: &User, criteria: &FilterCriteria) -> bool {
    let term = criteria.search_term.to_lowercase();
    matches_lowered(user, &term, criteria)
}

fn matches_lowered(user: &User, term: &str, criteria: &FilterCriteria) -> bool {
    if !term.is_empty()
        && !user.name.to_lowercase().contains(term)
        && !user.email.to_lowercase().contains(term)
    {
        return false;
    }
    if let Some(status) = criteria.status {
        if user.status != status {
            return false;
        }
    }
    if let Some(ref role_id) = criteria.role_id {
        if &user.role.id != role_id {
            return false;
        }
    }
    true
}

/// `ceil(total / page_size)`; zero when nothing matches.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Filter `users` (kept in store order) and cut out the requested page.
///
/// A page past the end yields an empty `items`; `page` and `page_size` are
/// floored at 1 so the slice bounds are always defined.
pub fn filtered_page(users: &[User], criteria: &FilterCriteria, pagination: Pagination) -> UsersPage {
    let page = pagination.page.max(1);
    let page_size = pagination.page_size.max(1);
    let term = criteria.search_term.to_lowercase();

    let matching: Vec<&User> = users
        .iter()
        .filter(|u| matches_lowered(u, &term, criteria))
        .collect();

    let total = matching.len();
    let start = (page - 1).saturating_mul(page_size);
    let items = matching
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    UsersPage {
        items,
        total,
        total_pages: total_pages(total, page_size),
        page,
        page_size,
    }
}
