//! Map view model: center, zoom and markers for a list of resources

use medinear_geolocation::Coordinates;

use super::Resource;

/// Center used when neither the device nor the first resource has a position
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    longitude: 77.2090,
    latitude: 28.6139,
};

const ZOOM_WITH_LOCATION: u8 = 13;
const ZOOM_WITHOUT_LOCATION: u8 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub title: String,
    pub address: String,
    pub position: Coordinates,
    pub selected: bool,
}

impl Marker {
    /// Driving directions to the marker in Google Maps
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}&travelmode=driving",
            self.position.latitude, self.position.longitude
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// Build the map for `resources`; `None` when there is nothing to show
    pub fn build<R: Resource>(
        resources: &[R],
        device: Option<Coordinates>,
        selected: Option<&str>,
    ) -> Option<Self> {
        let first = resources.first()?;

        let center = device
            .or_else(|| first.coordinates())
            .unwrap_or(DEFAULT_CENTER);

        let markers = resources
            .iter()
            .filter_map(|resource| {
                let position = resource.coordinates()?;
                Some(Marker {
                    id: resource.id().to_string(),
                    title: resource.name().to_string(),
                    address: resource.address().to_string(),
                    position,
                    selected: selected == Some(resource.id()),
                })
            })
            .collect();

        Some(Self {
            center,
            zoom: if device.is_some() {
                ZOOM_WITH_LOCATION
            } else {
                ZOOM_WITHOUT_LOCATION
            },
            markers,
        })
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }
}
