use serde::{Deserialize, Serialize};

use medinear_geolocation::{Coordinates, Geolocator, LocationError};
use medinear_session::{Role, User};

use crate::error::{Error, Result};

const MIN_PASSWORD_LEN: usize = 6;

/// Sign-up form, all fields as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub location: Option<Coordinates>,
}

impl RegisterForm {
    /// Check the passwords and build the request body
    pub fn validate(&self) -> Result<RegisterRequest> {
        if self.password != self.confirm_password {
            return Err(Error::validation("Passwords do not match"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation("Password must be at least 6 characters"));
        }

        Ok(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            role: self.role,
            location: self.location.map(|at| LocationPayload {
                coordinates: at.to_lng_lat(),
            }),
        })
    }

    /// Fill `location` from the device and return the status line to show
    pub async fn capture_location(&mut self, geo: &Geolocator) -> &'static str {
        match geo.locate().await {
            Ok(position) => {
                self.location = Some(position.coords);
                "Location captured"
            }
            Err(LocationError::Unsupported) => "Geolocation is not supported by your browser",
            Err(err) => {
                log::info!("location capture failed: {}", err);
                "Unable to retrieve location"
            }
        }
    }
}

/// `{ "coordinates": [lng, lat] }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationPayload {
    pub coordinates: [f64; 2],
}

/// Body of `POST /auth/register`; the confirmation password stays local
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Answer to a successful login or registration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /auth/me`; older backends put the user under `data`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MeResponse {
    #[serde(alias = "data")]
    pub user: User,
}
