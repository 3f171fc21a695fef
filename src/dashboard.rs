//! Signed-in user's landing screen

use medinear_geolocation::{Coordinates, Geolocator, LocationError};
use medinear_session::{Role, User};

use crate::routing::{owner_link_label, Route};

/// Device location status with a manual retry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPanel {
    location: Option<Coordinates>,
    error: Option<String>,
}

impl LocationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Message shown in the info alert, next to the "Try Again" button
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the resource cards carry the "Location enabled" badge
    pub fn location_enabled(&self) -> bool {
        self.location.is_some()
    }

    /// Ask for the location; also the retry action
    pub async fn refresh(&mut self, geo: &Geolocator) {
        match geo.locate().await {
            Ok(position) => {
                self.location = Some(position.coords);
                self.error = None;
            }
            Err(err) => self.fail(&err),
        }
    }

    fn fail(&mut self, err: &LocationError) {
        log::info!("dashboard location unavailable: {}", err);
        // A previously found location stays valid
        self.error = Some(err.user_message().to_string());
    }
}

/// One line of the "Your Information" card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

fn role_title(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::MedicalShopOwner => "Medical Shop Owner",
        Role::HospitalOwner => "Hospital Owner",
    }
}

/// Everything the dashboard renders about the user
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub welcome: String,
    /// Resource pages linked from the dashboard
    pub links: Vec<Route>,
    /// Button leading owners to their management panel
    pub owner_link: Option<&'static str>,
    pub info: Vec<InfoRow>,
}

impl DashboardView {
    pub fn new(user: &User) -> Self {
        let mut info = vec![
            InfoRow {
                label: "Name",
                value: user.name.clone(),
            },
            InfoRow {
                label: "Email",
                value: user.email.clone(),
            },
            InfoRow {
                label: "Role",
                value: role_title(user.role).to_string(),
            },
        ];
        if let Some(phone) = user.phone.as_ref().filter(|p| !p.is_empty()) {
            info.push(InfoRow {
                label: "Phone",
                value: phone.clone(),
            });
        }
        if let Some(address) = user.address.as_ref().filter(|a| !a.is_empty()) {
            info.push(InfoRow {
                label: "Address",
                value: address.clone(),
            });
        }

        Self {
            welcome: format!("Welcome back, {}!", user.name),
            links: vec![Route::MedicalShops, Route::Hospitals],
            owner_link: owner_link_label(user.role),
            info,
        }
    }
}
