//! Location acquisition for the MediNear client
//!
//! This crate provides the coordinate conventions shared with the backend
//! (GeoJSON `[longitude, latitude]` order) and a small helper that wraps a
//! platform location API with support, permission and timeout handling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Location errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Permission to read the location was denied")]
    PermissionDenied,

    #[error("Location request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

impl LocationError {
    /// Message shown next to a manual "try again" control
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unsupported => "Geolocation is not supported by your browser.",
            _ => "Unable to retrieve your location. Please enable location services.",
        }
    }
}

/// A longitude/latitude pair
///
/// Always constructed in `(lng, lat)` order to match the backend's
/// geospatial convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Read a GeoJSON position
    pub fn from_lng_lat(position: [f64; 2]) -> Self {
        Self::new(position[0], position[1])
    }

    /// GeoJSON position as sent to creation endpoints
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Map libraries expect `[lat, lng]`
    pub fn to_lat_lng(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// GeoJSON point as stored on users, shops and hospitals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

fn point_type() -> String {
    "Point".to_string()
}

impl GeoPoint {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            kind: point_type(),
            coordinates: coordinates.to_lng_lat().to_vec(),
        }
    }

    /// The stored position, if the backend sent a complete pair
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self.coordinates.as_slice() {
            [lng, lat, ..] => Some(Coordinates::new(*lng, *lat)),
            _ => None,
        }
    }
}

/// A position fix reported by a provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coords: Coordinates,
    /// Accuracy radius in meters, when known
    pub accuracy: Option<f64>,
}

impl Position {
    pub fn new(coords: Coordinates) -> Self {
        Self {
            coords,
            accuracy: None,
        }
    }
}

/// Options passed to the provider for each request
#[derive(Debug, Clone, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Platform location API
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the platform can report positions at all
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self, options: &PositionOptions)
        -> Result<Position, LocationError>;
}

/// Provider that always reports the same position
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Position);

impl FixedLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self(Position::new(coords))
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        Ok(self.0)
    }
}

/// Provider for a user who refused the permission prompt
#[derive(Debug, Clone, Default)]
pub struct DeniedLocation;

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// Location acquisition helper
///
/// Each call issues exactly one request to the provider. Failed requests are
/// never retried; callers expose a manual retry control instead.
#[derive(Clone)]
pub struct Geolocator {
    provider: Option<Arc<dyn LocationProvider>>,
    options: PositionOptions,
}

impl Geolocator {
    pub fn new(provider: Arc<dyn LocationProvider>, options: PositionOptions) -> Self {
        Self {
            provider: Some(provider),
            options,
        }
    }

    /// A geolocator for a platform without location support
    pub fn unsupported() -> Self {
        Self {
            provider: None,
            options: PositionOptions::default(),
        }
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    pub fn is_supported(&self) -> bool {
        self.provider
            .as_ref()
            .map(|provider| provider.is_supported())
            .unwrap_or(false)
    }

    /// Request the current position
    pub async fn locate(&self) -> Result<Position, LocationError> {
        let provider = match &self.provider {
            Some(provider) if provider.is_supported() => provider,
            _ => {
                log::debug!("location requested on an unsupported platform");
                return Err(LocationError::Unsupported);
            }
        };

        let deadline = self.options.timeout;
        match tokio::time::timeout(deadline, provider.current_position(&self.options)).await {
            Ok(Ok(position)) => Ok(position),
            Ok(Err(err)) => {
                log::warn!("location request failed: {}", err);
                Err(err)
            }
            Err(_) => {
                log::warn!("location request timed out after {:?}", deadline);
                Err(LocationError::Timeout(deadline))
            }
        }
    }

    /// Request the current position and hand the outcome to one of two continuations
    pub async fn locate_with<T, S, F>(&self, on_success: S, on_failure: F) -> T
    where
        S: FnOnce(Position) -> T,
        F: FnOnce(LocationError) -> T,
    {
        match self.locate().await {
            Ok(position) => on_success(position),
            Err(err) => on_failure(err),
        }
    }
}

impl Default for Geolocator {
    fn default() -> Self {
        Self::unsupported()
    }
}

impl std::fmt::Debug for Geolocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geolocator")
            .field("supported", &self.is_supported())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SlowLocation;

    #[async_trait]
    impl LocationProvider for SlowLocation {
        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<Position, LocationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Position::new(Coordinates::new(0.0, 0.0)))
        }
    }

    struct CountingDenied(AtomicUsize);

    #[async_trait]
    impl LocationProvider for CountingDenied {
        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<Position, LocationError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(LocationError::PermissionDenied)
        }
    }

    struct NoPlatform;

    #[async_trait]
    impl LocationProvider for NoPlatform {
        fn is_supported(&self) -> bool {
            false
        }

        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<Position, LocationError> {
            unreachable!("unsupported providers are never queried")
        }
    }

    #[test]
    fn test_coordinates_keep_lng_lat_order() {
        let coords = Coordinates::new(77.2090, 28.6139);
        assert_eq!(coords.to_lng_lat(), [77.2090, 28.6139]);
        assert_eq!(coords.to_lat_lng(), [28.6139, 77.2090]);
        assert_eq!(Coordinates::from_lng_lat([1.5, 2.5]), Coordinates::new(1.5, 2.5));
    }

    #[test]
    fn test_geo_point_reads_nested_location() {
        let point: GeoPoint =
            serde_json::from_value(serde_json::json!({ "type": "Point", "coordinates": [72.8, 19.0] }))
                .unwrap();
        assert_eq!(point.coordinates(), Some(Coordinates::new(72.8, 19.0)));

        let empty: GeoPoint = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty.kind, "Point");
        assert_eq!(empty.coordinates(), None);
    }

    #[test]
    fn test_locate_success() {
        tokio_test::block_on(async {
            let geo = Geolocator::new(
                Arc::new(FixedLocation::new(Coordinates::new(77.0, 28.0))),
                PositionOptions::default(),
            );
            let position = geo.locate().await.unwrap();
            assert_eq!(position.coords, Coordinates::new(77.0, 28.0));
        });
    }

    #[test]
    fn test_locate_unsupported() {
        tokio_test::block_on(async {
            assert_eq!(
                Geolocator::unsupported().locate().await,
                Err(LocationError::Unsupported)
            );

            let geo = Geolocator::new(Arc::new(NoPlatform), PositionOptions::default());
            assert!(!geo.is_supported());
            assert_eq!(geo.locate().await, Err(LocationError::Unsupported));
        });
    }

    #[test]
    fn test_locate_times_out() {
        tokio_test::block_on(async {
            let options = PositionOptions {
                enable_high_accuracy: true,
                timeout: Duration::from_millis(20),
            };
            let geo = Geolocator::new(Arc::new(SlowLocation), options);
            assert_eq!(
                geo.locate().await,
                Err(LocationError::Timeout(Duration::from_millis(20)))
            );
        });
    }

    #[test]
    fn test_denied_is_not_retried() {
        tokio_test::block_on(async {
            let provider = Arc::new(CountingDenied(AtomicUsize::new(0)));
            let geo = Geolocator::new(provider.clone(), PositionOptions::default());

            let outcome = geo
                .locate_with(|_| "located", |err| err.user_message())
                .await;

            assert_eq!(
                outcome,
                "Unable to retrieve your location. Please enable location services."
            );
            assert_eq!(provider.0.load(Ordering::SeqCst), 1);
        });
    }
}
