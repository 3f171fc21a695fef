use medinear_session::{
    FileStorage, History, MemoryStorage, Navigator, Role, Session, SessionStorage, SessionStore,
    User,
};
use std::sync::Arc;

fn owner() -> User {
    User {
        id: "owner-1".to_string(),
        name: "Ravi".to_string(),
        email: "ravi@example.com".to_string(),
        role: Role::MedicalShopOwner,
        ..Default::default()
    }
}

#[test]
fn test_session_rehydrates_from_storage() {
    let storage = Arc::new(MemoryStorage::with_session(Session::new(
        "persisted-token",
        Some(owner()),
    )));
    let store = SessionStore::new(storage, Arc::new(History::new()));

    assert!(store.is_authenticated());
    assert_eq!(store.token().as_deref(), Some("persisted-token"));
    assert_eq!(store.role(), Some(Role::MedicalShopOwner));
}

#[test]
fn test_file_storage_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let first = SessionStore::new(
        Arc::new(FileStorage::new(&path)),
        Arc::new(History::new()),
    );
    first.establish("abc", Some(owner())).unwrap();

    let second = SessionStore::new(
        Arc::new(FileStorage::new(&path)),
        Arc::new(History::new()),
    );
    assert_eq!(second.token().as_deref(), Some("abc"));
    assert_eq!(second.user().map(|u| u.name), Some("Ravi".to_string()));
}

#[test]
fn test_corrupt_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = SessionStore::new(Arc::new(FileStorage::new(&path)), Arc::new(History::new()));
    assert!(!store.is_authenticated());
}

#[test]
fn test_logout_clears_storage_and_goes_home() {
    let storage = Arc::new(MemoryStorage::new());
    let history = Arc::new(History::new());
    let store = SessionStore::new(storage.clone(), history.clone());

    store.establish("t", Some(owner())).unwrap();
    store.logout().unwrap();

    assert!(!store.is_authenticated());
    assert_eq!(storage.load().unwrap(), None);
    assert_eq!(history.current().as_deref(), Some("/"));
}

#[test]
fn test_expire_redirects_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let history = Arc::new(History::new());
    let store = SessionStore::new(Arc::new(FileStorage::new(&path)), history.clone());
    store.establish("t", None).unwrap();
    assert!(path.exists());

    let clone = store.clone();
    clone.expire();

    assert!(!store.is_authenticated());
    assert!(!path.exists());
    assert_eq!(history.visited(), vec!["/login".to_string()]);
}

#[test]
fn test_update_user_keeps_token() {
    let store = SessionStore::in_memory();
    store.establish("t", None).unwrap();

    let mut user = owner();
    user.phone = Some("555-0101".to_string());
    store.update_user(user).unwrap();

    assert_eq!(store.token().as_deref(), Some("t"));
    assert_eq!(store.user().and_then(|u| u.phone).as_deref(), Some("555-0101"));
}
