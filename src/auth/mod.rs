//! Account endpoints and session bookkeeping

mod types;

use medinear_geolocation::{Coordinates, GeoPoint};
use medinear_session::User;

use crate::error::{Error, FormError, Result};
use crate::fetch::ApiClient;
use crate::routing::Route;

pub use types::*;

/// Client for the `/auth` endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Store the token and user of a successful response and move on to the
    /// dashboard
    fn establish(&self, response: AuthResponse) -> Result<User> {
        let token = response
            .token
            .ok_or_else(|| Error::general("Response carried no token"))?;
        let user = response.user.unwrap_or_default();

        self.api.session().establish(token, Some(user.clone()))?;
        self.api.session().navigator().navigate(Route::Dashboard.path());
        log::info!("signed in as {}", user.email);
        Ok(user)
    }

    /// Create an account; nothing is sent when the form does not validate
    pub async fn register(&self, form: &RegisterForm) -> std::result::Result<User, FormError> {
        let result: Result<User> = async {
            let request = form.validate()?;
            let response: AuthResponse = self
                .api
                .post("/auth/register")
                .json(&request)?
                .send()
                .await?;
            self.establish(response)
        }
        .await;

        result.map_err(|err| FormError::from_error(err, "Registration failed"))
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> std::result::Result<User, FormError> {
        let result: Result<User> = async {
            let response: AuthResponse = self
                .api
                .post("/auth/login")
                .json(credentials)?
                .send()
                .await?;
            self.establish(response)
        }
        .await;

        result.map_err(|err| FormError::from_error(err, "Login failed"))
    }

    /// Fetch the signed-in user and refresh the cached copy
    pub async fn me(&self) -> Result<User> {
        let me: MeResponse = self.api.get("/auth/me").send().await?;
        self.api.session().update_user(me.user.clone())?;
        Ok(me.user)
    }

    /// Save the user's home location
    pub async fn update_location(&self, at: Coordinates) -> Result<()> {
        let body = LocationPayload {
            coordinates: at.to_lng_lat(),
        };
        self.api
            .put("/auth/update-location")
            .json(&body)?
            .send_empty()
            .await?;

        if let Some(mut user) = self.api.session().user() {
            user.location = Some(GeoPoint::new(at));
            self.api.session().update_user(user)?;
        }
        Ok(())
    }

    /// Forget the session and go home
    pub fn logout(&self) -> Result<()> {
        self.api.session().logout()?;
        Ok(())
    }
}
