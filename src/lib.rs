//! MediNear Client Library
//!
//! A Rust client for the MediNear healthcare directory, providing account
//! management, geofenced medical shop and hospital listings, and the owner
//! panels used to maintain them.

pub mod auth;
pub mod browser;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod hospitals;
pub mod owner;
pub mod routing;
pub mod shops;

use std::sync::Arc;

use reqwest::Client;

use medinear_geolocation::{Geolocator, LocationProvider};
use medinear_session::{FileStorage, History, MemoryStorage, Navigator, SessionStorage, SessionStore};

use crate::auth::AuthApi;
use crate::browser::ResourceBrowser;
use crate::config::ClientOptions;
use crate::fetch::ApiClient;
use crate::hospitals::{Hospital, HospitalsApi};
use crate::shops::{MedicalShop, MedicalShopsApi};

pub use crate::error::{Error, Result};

/// The main entry point for the MediNear client
#[derive(Debug, Clone)]
pub struct MediNear {
    /// Client options
    pub options: ClientOptions,
    api: ApiClient,
    session: SessionStore,
    geolocator: Geolocator,
}

impl MediNear {
    /// Create a new client
    ///
    /// The session lives in memory unless `options.persist_session` is set,
    /// in which case it is read from and written to `options.session_file`.
    /// The geolocator reports an unsupported platform; use
    /// [`MediNear::with_parts`] to plug a location provider in.
    ///
    /// # Example
    ///
    /// ```
    /// use medinear::{MediNear, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_api_url("https://medinear.example.com/api");
    /// let client = MediNear::new(options).unwrap();
    /// assert!(!client.session().is_authenticated());
    /// ```
    pub fn new(options: ClientOptions) -> Result<Self> {
        let storage: Arc<dyn SessionStorage> = match (&options.session_file, options.persist_session) {
            (Some(path), true) => Arc::new(FileStorage::new(path)),
            (None, true) => {
                return Err(Error::config("persist_session is set but no session file was given"))
            }
            _ => Arc::new(MemoryStorage::new()),
        };

        Self::with_parts(options, storage, Arc::new(History::new()), None)
    }

    /// Create a client from `MEDINEAR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env()?)
    }

    /// Create a client from explicit session storage, navigation and
    /// location capabilities
    pub fn with_parts(
        options: ClientOptions,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
        provider: Option<Arc<dyn LocationProvider>>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let session = SessionStore::new(storage, navigator);
        let api = ApiClient::new(&options.api_url, http_client, session.clone());
        let geolocator = match provider {
            Some(provider) => Geolocator::new(provider, options.geolocation.clone()),
            None => Geolocator::unsupported(),
        };

        Ok(Self {
            options,
            api,
            session,
            geolocator,
        })
    }

    /// Get the underlying API client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Get the session shared by every request
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn geolocator(&self) -> &Geolocator {
        &self.geolocator
    }

    /// Get the client for registration, login and profile operations
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.api.clone())
    }

    /// Get the client for the medical shop endpoints
    pub fn medical_shops(&self) -> MedicalShopsApi {
        MedicalShopsApi::new(self.api.clone())
    }

    /// Get the client for the hospital endpoints
    pub fn hospitals(&self) -> HospitalsApi {
        HospitalsApi::new(self.api.clone())
    }

    /// A medical shop browser starting at the configured radius
    pub fn shop_browser(&self) -> ResourceBrowser<MedicalShop> {
        ResourceBrowser::new(self.options.default_radius)
    }

    /// A hospital browser starting at the configured radius
    pub fn hospital_browser(&self) -> ResourceBrowser<Hospital> {
        ResourceBrowser::new(self.options.default_radius)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::browser::{ResourceBrowser, SearchRadius};
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, FormError};
    pub use crate::MediNear;
    pub use medinear_geolocation::Coordinates;
    pub use medinear_session::Role;
}
