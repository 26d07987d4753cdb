mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::*;
use users_admin::contract::model::{UserPatch, UserStatus};
use users_admin::domain::error::DomainError;
use users_admin::domain::events::UserDomainEvent;
use users_admin::domain::permissions::STANDARD_ROLES;
use users_admin::domain::seed::default_users;
use users_admin::infra::storage::{KeyValueStore, KvUsersRepository, MemoryKeyValueStore};
use users_admin::infra::events::NoopEventPublisher;
use users_admin::infra::system::{FixedClock, SequentialIdGenerator};
use users_admin::domain::store::UserStore;

#[test]
fn empty_slot_is_seeded_and_persisted() {
    let repo = CountingRepo::empty();
    let (store, _) = store_over(repo.clone());

    assert_eq!(store.len(), 12);
    assert_eq!(repo.save_count(), 1);
    assert_eq!(repo.stored_users().unwrap(), default_users(&STANDARD_ROLES));
}

#[test]
fn unreadable_slot_falls_back_to_seed() {
    let repo = CountingRepo::empty();
    repo.fail_loads.store(true, Ordering::SeqCst);
    let (store, _) = store_over(repo.clone());

    assert_eq!(store.list(), default_users(&STANDARD_ROLES).as_slice());
    assert_eq!(repo.save_count(), 1);
}

#[test]
fn corrupt_json_in_slot_falls_back_to_seed() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    kv.set("users", "[{\"id\": 1,").unwrap();

    let store = UserStore::load(
        Arc::new(KvUsersRepository::new(kv.clone(), "users")),
        Arc::new(NoopEventPublisher),
        Arc::new(FixedClock(now())),
        Arc::new(SequentialIdGenerator::starting_at(1)),
        default_users(&STANDARD_ROLES),
    );

    assert_eq!(store.len(), 12);
    let raw = kv.get("users").unwrap().unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[test]
fn existing_collection_is_loaded_not_reseeded() {
    let mut users = default_users(&STANDARD_ROLES);
    users.truncate(3);
    let repo = CountingRepo::with(users.clone());
    let (store, _) = store_over(repo.clone());

    assert_eq!(store.list(), users.as_slice());
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn create_assigns_id_and_timestamp_and_appends() {
    let (mut store, repo, events) = seeded_store();

    let created = store
        .create(new_user("Ann Lee", "ann.lee@example.com"))
        .unwrap();

    assert_eq!(created.id, "100");
    assert_eq!(created.created_at, now());
    assert_eq!(store.len(), 13);
    assert_eq!(store.list().last().unwrap(), &created);
    assert_eq!(repo.save_count(), 1);
    assert_eq!(
        events.taken(),
        vec![UserDomainEvent::Created {
            id: "100".into(),
            at: now()
        }]
    );
}

#[test]
fn created_user_survives_reload() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let load = || {
        UserStore::load(
            Arc::new(KvUsersRepository::new(kv.clone(), "users")),
            Arc::new(NoopEventPublisher),
            Arc::new(FixedClock(now())),
            Arc::new(SequentialIdGenerator::starting_at(500)),
            default_users(&STANDARD_ROLES),
        )
    };

    let mut store = load();
    let created = store
        .create(new_user("Ann Lee", "ann.lee@example.com"))
        .unwrap();

    let reloaded = load();
    assert_eq!(reloaded.len(), 13);
    let found = reloaded.get(&created.id).unwrap();
    assert_eq!(found, &created);
    assert_eq!(found.name, "Ann Lee");
    assert_eq!(found.created_at, now());
}

#[test]
fn create_rejects_empty_name() {
    let (mut store, repo, _) = seeded_store();

    let err = store.create(new_user("", "a@b.com")).unwrap_err();

    assert_eq!(err.field(), Some("name"));
    assert_eq!(store.len(), 12);
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn create_rejects_malformed_email() {
    let (mut store, _, _) = seeded_store();
    for bad in ["", "plain", "a@b", "a @b.com"] {
        let err = store.create(new_user("Ann", bad)).unwrap_err();
        assert_eq!(err.field(), Some("email"), "email {bad:?}");
    }
    assert_eq!(store.len(), 12);
}

#[test]
fn duplicate_emails_are_allowed() {
    let (mut store, _, _) = seeded_store();
    let dup = store
        .create(new_user("Another John", "john.doe@example.com"))
        .unwrap();
    assert_eq!(dup.email, "john.doe@example.com");
}

#[test]
fn update_merges_only_given_fields() {
    let (mut store, repo, events) = seeded_store();
    let before = store.get("3").unwrap().clone();

    let updated = store
        .update(
            "3",
            UserPatch {
                status: Some(UserStatus::Active),
                role: Some(role("manager")),
                ..UserPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.status, UserStatus::Active);
    assert_eq!(updated.role.id, "manager");
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.email, before.email);
    assert_eq!(updated.created_at, before.created_at);
    assert_eq!(updated.last_login, before.last_login);
    assert_eq!(store.get("3").unwrap(), &updated);
    assert_eq!(repo.stored_users().unwrap()[2], updated);
    assert!(matches!(
        events.taken().as_slice(),
        [UserDomainEvent::Updated { id, .. }] if id == "3"
    ));
}

#[test]
fn update_keeps_position_in_collection() {
    let (mut store, _, _) = seeded_store();
    store
        .update(
            "5",
            UserPatch {
                name: Some("Mike Wilson".into()),
                ..UserPatch::default()
            },
        )
        .unwrap();
    assert_eq!(store.list()[4].name, "Mike Wilson");
}

#[test]
fn update_validates_patched_fields() {
    let (mut store, repo, _) = seeded_store();

    let err = store
        .update(
            "1",
            UserPatch {
                email: Some("nope".into()),
                ..UserPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.field(), Some("email"));

    let err = store
        .update(
            "1",
            UserPatch {
                name: Some("  ".into()),
                ..UserPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.field(), Some("name"));
    assert_eq!(repo.save_count(), 0);
    assert_eq!(store.get("1").unwrap().email, "john.doe@example.com");
}

#[test]
fn update_and_delete_of_missing_id_are_not_found() {
    let (mut store, repo, _) = seeded_store();

    assert_eq!(
        store.update("999", UserPatch::default()).unwrap_err(),
        DomainError::user_not_found("999")
    );
    assert_eq!(
        store.delete("999").unwrap_err(),
        DomainError::user_not_found("999")
    );
    assert_eq!(store.len(), 12);
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn delete_removes_and_persists() {
    let (mut store, repo, events) = seeded_store();

    store.delete("6").unwrap();

    assert_eq!(store.len(), 11);
    assert!(store.get("6").is_err());
    let stored = repo.stored_users().unwrap();
    assert_eq!(stored.len(), 11);
    assert!(stored.iter().all(|u| u.id != "6"));
    assert!(matches!(
        events.taken().as_slice(),
        [UserDomainEvent::Deleted { id, .. }] if id == "6"
    ));
}

#[test]
fn failed_write_rolls_back_every_mutation() {
    let (mut store, repo, events) = seeded_store();
    let before = store.list().to_vec();
    repo.set_fail_saves(true);

    let err = store.create(new_user("Ann", "ann@example.com")).unwrap_err();
    assert!(matches!(err, DomainError::Persistence { .. }));

    let err = store
        .update(
            "1",
            UserPatch {
                name: Some("Renamed".into()),
                ..UserPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::Persistence { .. }));

    let err = store.delete("1").unwrap_err();
    assert!(matches!(err, DomainError::Persistence { .. }));

    assert_eq!(store.list(), before.as_slice());
    assert_eq!(repo.stored_users().unwrap(), before);
    assert!(events.taken().is_empty());
}

#[test]
fn record_login_stamps_last_login() {
    let (mut store, _, events) = seeded_store();
    assert!(store.get("6").unwrap().last_login.is_none());

    let user = store.record_login("6").unwrap();

    assert_eq!(user.last_login, Some(now()));
    assert_eq!(store.get("6").unwrap().last_login, Some(now()));
    assert_eq!(
        events.taken(),
        vec![UserDomainEvent::LoggedIn {
            id: "6".into(),
            at: now()
        }]
    );
}

#[test]
fn colliding_generated_ids_are_skipped() {
    let repo = CountingRepo::with(default_users(&STANDARD_ROLES));
    let mut store = UserStore::load(
        repo,
        Arc::new(NoopEventPublisher),
        Arc::new(FixedClock(now())),
        // "11" and "12" are taken by seed users
        Arc::new(SequentialIdGenerator::starting_at(11)),
        default_users(&STANDARD_ROLES),
    );

    let created = store.create(new_user("Ann", "ann@example.com")).unwrap();
    assert_eq!(created.id, "13");
}
