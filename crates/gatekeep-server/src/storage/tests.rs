//! Storage layer tests for Gatekeep.

use super::db::Database;
use super::models::{NewUser, UserChanges};
use gatekeep_core::db::{DatabaseError, unix_timestamp};

async fn test_db() -> Database {
    Database::open_in_memory().await.unwrap()
}

fn new_user(login: &str) -> NewUser {
    NewUser {
        login: login.into(),
        username: login.to_uppercase(),
        surname: "Tester".into(),
        email: format!("{login}@example.com"),
        password_hash: "hash123".into(),
        is_admin: false,
    }
}

// === User tests ===

#[tokio::test]
async fn create_and_get_user() {
    let db = test_db().await;
    let user = db.create_user(&new_user("alice")).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.login, "alice");
    assert_eq!(user.username, "ALICE");
    assert_eq!(user.email, "alice@example.com");
    assert!(!user.is_admin);

    let by_id = db.get_user(user.id).await.unwrap();
    assert_eq!(by_id, user);
}

#[tokio::test]
async fn ids_are_assigned_incrementally() {
    let db = test_db().await;
    let a = db.create_user(&new_user("alice")).await.unwrap();
    let b = db.create_user(&new_user("bob")).await.unwrap();
    assert!(b.id > a.id);
}

#[tokio::test]
async fn get_user_by_login() {
    let db = test_db().await;
    let created = db.create_user(&new_user("alice")).await.unwrap();

    let user = db.get_user_by_login("alice").await.unwrap();
    assert_eq!(user.id, created.id);

    let err = db.get_user_by_login("bob").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn duplicate_login_is_conflict() {
    let db = test_db().await;
    db.create_user(&new_user("alice")).await.unwrap();

    let mut dup = new_user("alice");
    dup.email = "other@example.com".into();
    let err = db.create_user(&dup).await.unwrap_err();
    assert!(err.is_conflict_on("users.login"), "got {err:?}");
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let db = test_db().await;
    db.create_user(&new_user("alice")).await.unwrap();

    let mut dup = new_user("alice2");
    dup.email = "alice@example.com".into();
    let err = db.create_user(&dup).await.unwrap_err();
    assert!(err.is_conflict_on("users.email"), "got {err:?}");
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let db = test_db().await;
    let user = db.create_user(&new_user("alice")).await.unwrap();

    let updated = db
        .update_user_by_login(
            "alice",
            &UserChanges {
                surname: Some("Liddell".into()),
                ..UserChanges::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, user.id);
    assert_eq!(updated.surname, "Liddell");
    assert_eq!(updated.username, user.username);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.password_hash, user.password_hash);
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let db = test_db().await;
    let err = db
        .update_user(42, &UserChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));
}

#[tokio::test]
async fn set_admin_flag() {
    let db = test_db().await;
    db.create_user(&new_user("alice")).await.unwrap();

    assert!(db.set_admin("alice", true).await.unwrap());
    assert!(db.get_user_by_login("alice").await.unwrap().is_admin);
    assert!(!db.set_admin("nobody", true).await.unwrap());
}

// === Token tests ===

#[tokio::test]
async fn save_and_get_token() {
    let db = test_db().await;
    let user = db.create_user(&new_user("alice")).await.unwrap();

    let now = unix_timestamp();
    let token = db.save_token(user.id, "tok-1", now + 300, now).await.unwrap();

    assert_eq!(token.user_id, user.id);
    assert_eq!(token.access_token, "tok-1");
    assert_eq!(token.expires_at, now + 300);
    assert_eq!(token.refresh_token, "");
}

#[tokio::test]
async fn save_token_overwrites_previous() {
    let db = test_db().await;
    let user = db.create_user(&new_user("alice")).await.unwrap();

    let first = db.save_token(user.id, "tok-1", 100, 1).await.unwrap();
    let second = db.save_token(user.id, "tok-2", 200, 2).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.access_token, "tok-2");
    assert_eq!(second.expires_at, 200);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tokens WHERE user_id = ?")
        .bind(user.id)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn token_requires_existing_user() {
    let db = test_db().await;
    assert!(db.save_token(999, "tok", 1, 1).await.is_err());
}

#[tokio::test]
async fn delete_user_cascades_to_token() {
    let db = test_db().await;
    let user = db.create_user(&new_user("alice")).await.unwrap();
    db.save_token(user.id, "tok-1", 100, 1).await.unwrap();

    assert!(db.delete_user_by_login("alice").await.unwrap());
    assert!(db.get_user_by_login("alice").await.unwrap_err().is_not_found());
    assert!(db.get_token_for_user(user.id).await.unwrap().is_none());

    assert!(!db.delete_user_by_login("alice").await.unwrap());
}
