//! Route table and navigation guard

use medinear_session::{Role, SessionStore};

/// Every screen of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    MedicalShops,
    Hospitals,
    Dashboard,
    OwnerDashboard,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::MedicalShops,
        Route::Hospitals,
        Route::Dashboard,
        Route::OwnerDashboard,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::MedicalShops => "/medical-shops",
            Route::Hospitals => "/hospitals",
            Route::Dashboard => "/dashboard",
            Route::OwnerDashboard => "/owner-dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.iter().copied().find(|route| route.path() == path)
    }

    /// Whether the screen needs a signed-in user
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::MedicalShops | Route::Hospitals | Route::Dashboard | Route::OwnerDashboard
        )
    }
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    /// Replace the current history entry with this route
    Redirect(Route),
}

/// Resolve a path against the route table and the session
pub fn resolve(path: &str, session: &SessionStore) -> Resolution {
    match Route::from_path(path) {
        None => {
            log::debug!("unknown route {}, redirecting home", path);
            Resolution::Redirect(Route::Home)
        }
        Some(route) if route.requires_session() && !session.is_authenticated() => {
            Resolution::Redirect(Route::Login)
        }
        Some(route) => Resolution::Render(route),
    }
}

/// One navigation bar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

impl NavLink {
    fn new(label: &'static str, route: Route) -> Self {
        Self { label, route }
    }
}

/// Navigation bar entries for the current session
pub fn nav_links(session: &SessionStore) -> Vec<NavLink> {
    if !session.is_authenticated() {
        return vec![
            NavLink::new("Login", Route::Login),
            NavLink::new("Sign Up", Route::Register),
        ];
    }

    let mut links = vec![NavLink::new("Dashboard", Route::Dashboard)];
    if session.role().map_or(false, |role| role.is_owner()) {
        links.push(NavLink::new("Owner Panel", Route::OwnerDashboard));
    }
    links.push(NavLink::new("Medical Shops", Route::MedicalShops));
    links.push(NavLink::new("Hospitals", Route::Hospitals));
    links
}

/// Label of the dashboard button that leads owners to their panel
pub fn owner_link_label(role: Role) -> Option<&'static str> {
    match role {
        Role::MedicalShopOwner => Some("Manage My Medical Shop"),
        Role::HospitalOwner => Some("Manage My Hospital"),
        Role::User => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medinear_session::User;

    fn signed_in(role: Role) -> SessionStore {
        let session = SessionStore::in_memory();
        session
            .establish(
                "token",
                Some(User {
                    role,
                    ..Default::default()
                }),
            )
            .unwrap();
        session
    }

    #[test]
    fn test_unknown_path_redirects_home() {
        let session = SessionStore::in_memory();
        assert_eq!(resolve("/nope", &session), Resolution::Redirect(Route::Home));
        assert_eq!(resolve("/login/", &session), Resolution::Render(Route::Login));
    }

    #[test]
    fn test_private_routes_need_a_session() {
        let anonymous = SessionStore::in_memory();
        for route in Route::ALL {
            let expected = if route.requires_session() {
                Resolution::Redirect(Route::Login)
            } else {
                Resolution::Render(route)
            };
            assert_eq!(resolve(route.path(), &anonymous), expected);
        }

        let session = signed_in(Role::User);
        assert_eq!(
            resolve("/owner-dashboard", &session),
            Resolution::Render(Route::OwnerDashboard)
        );
    }

    #[test]
    fn test_owner_link_only_for_owners() {
        let labels = |session: &SessionStore| {
            nav_links(session)
                .into_iter()
                .map(|link| link.label)
                .collect::<Vec<_>>()
        };

        assert_eq!(labels(&SessionStore::in_memory()), vec!["Login", "Sign Up"]);
        assert!(!labels(&signed_in(Role::User)).contains(&"Owner Panel"));
        assert_eq!(
            labels(&signed_in(Role::HospitalOwner)),
            vec!["Dashboard", "Owner Panel", "Medical Shops", "Hospitals"]
        );
        assert_eq!(owner_link_label(Role::User), None);
    }
}
