//! Session context for the MediNear client
//!
//! The session holds the bearer token and the cached user record. It is
//! rehydrated from a [`SessionStorage`] on construction and every change is
//! written back, so a restarted client picks up where it left off. Redirects
//! go through an injected [`Navigator`] rather than a global.

mod navigator;
mod storage;

use medinear_geolocation::GeoPoint;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;

pub use navigator::*;
pub use storage::*;

/// Route shown after logout
pub const HOME_ROUTE: &str = "/";

/// Route shown when the backend rejects the token
pub const LOGIN_ROUTE: &str = "/login";

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    MedicalShopOwner,
    HospitalOwner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::MedicalShopOwner => "medical_shop_owner",
            Self::HospitalOwner => "hospital_owner",
        }
    }

    pub fn is_owner(&self) -> bool {
        !matches!(self, Self::User)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "medical_shop_owner" => Ok(Self::MedicalShopOwner),
            "hospital_owner" => Ok(Self::HospitalOwner),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// Token plus the cached user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// Application-scoped session context
///
/// Cloning is cheap; every clone observes the same session.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    /// Create a store, rehydrating whatever the storage holds
    pub fn new(storage: Arc<dyn SessionStorage>, navigator: Arc<dyn Navigator>) -> Self {
        let restored = match storage.load() {
            Ok(session) => session,
            Err(err) => {
                log::warn!("discarding unreadable persisted session: {}", err);
                None
            }
        };

        if restored.is_some() {
            log::debug!("session restored from storage");
        }

        Self {
            current: Arc::new(RwLock::new(restored)),
            storage,
            navigator,
        }
    }

    /// A store without persistence, mostly useful in tests and one-shot tools
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(History::new()))
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        self.navigator.clone()
    }

    pub fn get(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.get().map(|session| session.token)
    }

    pub fn user(&self) -> Option<User> {
        self.get().and_then(|session| session.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Store a freshly issued token and user
    pub fn establish(&self, token: impl Into<String>, user: Option<User>) -> Result<(), SessionError> {
        let session = Session::new(token, user);
        self.storage.save(&session)?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    /// Replace the cached user, keeping the token
    pub fn update_user(&self, user: User) -> Result<(), SessionError> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = guard.as_mut() {
            session.user = Some(user);
            self.storage.save(session)?;
        }
        Ok(())
    }

    /// Drop the session from memory and storage
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.storage.clear()
    }

    /// User-initiated logout
    pub fn logout(&self) -> Result<(), SessionError> {
        log::info!("logging out");
        let cleared = self.clear();
        self.navigator.navigate(HOME_ROUTE);
        cleared
    }

    /// The backend rejected the token; force a fresh login
    pub fn expire(&self) {
        log::warn!("session rejected by the server, redirecting to {}", LOGIN_ROUTE);
        if let Err(err) = self.clear() {
            log::error!("failed to clear persisted session: {}", err);
        }
        self.navigator.navigate(LOGIN_ROUTE);
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(
            serde_json::to_value(Role::MedicalShopOwner).unwrap(),
            serde_json::json!("medical_shop_owner")
        );
        assert_eq!("hospital_owner".parse::<Role>(), Ok(Role::HospitalOwner));
        assert!("admin".parse::<Role>().is_err());
        assert!(!Role::User.is_owner());
    }

    #[test]
    fn test_user_accepts_mongo_id() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Asha",
            "email": "asha@example.com",
            "role": "hospital_owner",
            "location": { "type": "Point", "coordinates": [77.2, 28.6] }
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::HospitalOwner);
        assert!(user.location.and_then(|l| l.coordinates()).is_some());
    }

    #[test]
    fn test_update_user_without_session_is_noop() {
        let store = SessionStore::in_memory();
        store.update_user(User::default()).unwrap();
        assert!(!store.is_authenticated());
    }
}
