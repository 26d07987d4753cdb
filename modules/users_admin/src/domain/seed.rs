//! Sample users written to an empty slot on first run.

use std::time::{Duration, UNIX_EPOCH};

use chrono::{DateTime, Utc};

use crate::contract::model::{Role, User, UserStatus};
use crate::domain::permissions::{RoleCatalog, ADMIN_ROLE, MANAGER_ROLE, USER_ROLE};

fn utc(epoch_secs: u64) -> DateTime<Utc> {
    DateTime::<Utc>::from(UNIX_EPOCH + Duration::from_secs(epoch_secs))
}

fn role(catalog: &RoleCatalog, id: &str) -> Role {
    catalog.get(id).cloned().unwrap_or_else(|| Role {
        id: id.to_string(),
        name: id.to_string(),
        permissions: Vec::new(),
    })
}

/// Twelve users across the admin / manager / user roles, in id order.
pub fn default_users(catalog: &RoleCatalog) -> Vec<User> {
    use UserStatus::{Active, Inactive};

    // (id, name, email, role, status, created_at, last_login)
    let rows: [(&str, &str, &str, &str, UserStatus, u64, Option<u64>); 12] = [
        // 2023-01-15T08:30:00Z / 2023-06-20T14:25:30Z
        ("1", "John Doe", "john.doe@example.com", ADMIN_ROLE, Active, 1673771400, Some(1687271130)),
        ("2", "Jane Smith", "jane.smith@example.com", MANAGER_ROLE, Active, 1676024100, Some(1687167910)),
        ("3", "Robert Johnson", "robert.johnson@example.com", USER_ROLE, Inactive, 1678026000, Some(1685273445)),
        ("4", "Emily Davis", "emily.davis@example.com", MANAGER_ROLE, Active, 1678871400, Some(1687105215)),
        ("5", "Michael Wilson", "michael.wilson@example.com", USER_ROLE, Active, 1680435900, Some(1686823530)),
        ("6", "Sarah Brown", "sarah.brown@example.com", USER_ROLE, Inactive, 1681997400, None),
        ("7", "David Miller", "david.miller@example.com", MANAGER_ROLE, Active, 1683300000, Some(1687007745)),
        ("8", "Jessica Taylor", "jessica.taylor@example.com", USER_ROLE, Active, 1684406400, Some(1686389420)),
        ("9", "Daniel Anderson", "daniel.anderson@example.com", ADMIN_ROLE, Active, 1685016900, Some(1687189810)),
        ("10", "Laura Thomas", "laura.thomas@example.com", USER_ROLE, Active, 1686216300, Some(1686926435)),
        ("11", "Christopher White", "christopher.white@example.com", MANAGER_ROLE, Active, 1686579000, Some(1687260315)),
        // 2023-06-15T10:30:00Z, never logged in
        ("12", "Amanda Clark", "amanda.clark@example.com", USER_ROLE, Inactive, 1686825000, None),
    ];

    rows.into_iter()
        .map(|(id, name, email, role_id, status, created, last_login)| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role(catalog, role_id),
            status,
            created_at: utc(created),
            last_login: last_login.map(utc),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permissions::STANDARD_ROLES;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn seed_has_twelve_users_across_three_roles() {
        let users = default_users(&STANDARD_ROLES);
        assert_eq!(users.len(), 12);

        let count = |role: &str| users.iter().filter(|u| u.role.id == role).count();
        assert_eq!(count(ADMIN_ROLE), 2);
        assert_eq!(count(MANAGER_ROLE), 4);
        assert_eq!(count(USER_ROLE), 6);
    }

    #[test]
    fn seed_timestamps_match_calendar_dates() {
        let users = default_users(&STANDARD_ROLES);
        assert_eq!(
            users[0].created_at,
            Utc.with_ymd_and_hms(2023, 1, 15, 8, 30, 0).unwrap()
        );
        assert_eq!(
            users[11].created_at,
            Utc.with_ymd_and_hms(2023, 6, 15, 10, 30, 0).unwrap()
        );
        assert_eq!(users[0].last_login.unwrap().second(), 30);
        assert!(users[5].last_login.is_none());
    }

    #[test]
    fn seed_ids_are_unique() {
        let users = default_users(&STANDARD_ROLES);
        let mut ids: Vec<_> = users.iter().map(|u| u.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }
}
