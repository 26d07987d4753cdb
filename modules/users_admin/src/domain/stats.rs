use crate::contract::model::{DashboardStats, RoleCount, User, UserStatus};
use crate::domain::permissions::{RoleCatalog, ADMIN_ROLE};

/// How many users the "recent users" card lists.
pub const RECENT_USERS: usize = 5;

impl DashboardStats {
    /// Aggregate the full collection. Every catalog role appears in the
    /// distribution, in catalog order, even with a zero count.
    pub fn compute(users: &[User], catalog: &RoleCatalog) -> Self {
        let count_status = |status: UserStatus| users.iter().filter(|u| u.status == status).count();
        let count_role = |role_id: &str| users.iter().filter(|u| u.role.id == role_id).count();

        let role_distribution = catalog
            .all()
            .iter()
            .map(|role| RoleCount {
                role_id: role.id.clone(),
                role_name: role.name.clone(),
                count: count_role(&role.id),
            })
            .collect();

        let mut recent: Vec<&User> = users.iter().collect();
        // Stable sort: equal timestamps keep insertion order.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            total_users: users.len(),
            active_users: count_status(UserStatus::Active),
            inactive_users: count_status(UserStatus::Inactive),
            admin_users: count_role(ADMIN_ROLE),
            role_distribution,
            recent_users: recent.into_iter().take(RECENT_USERS).cloned().collect(),
        }
    }
}
