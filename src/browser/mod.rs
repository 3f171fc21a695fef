//! Geofenced resource browser
//!
//! One browser drives both the medical shop and the hospital listings: it
//! acquires the device location, fetches resources near it (or everything when
//! no location is available), and keeps the list, the map and the detail pane
//! pointed at the same selection.
//!
//! Fetches are split into [`ResourceBrowser::begin_fetch`] and
//! [`ResourceBrowser::finish_fetch`] so a front end can issue requests
//! concurrently. Each ticket carries a generation number and only the newest
//! ticket may update the list; a slow response to a superseded request is
//! dropped.

mod map;
mod radius;
mod resources;

use async_trait::async_trait;

use medinear_geolocation::{Coordinates, Geolocator, LocationError};

use crate::error::Result;

pub use map::*;
pub use radius::*;

/// Summary rendered for one list entry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub badges: Vec<String>,
    pub details: Vec<String>,
    pub selected: bool,
}

/// A listable, locatable record
pub trait Resource: Clone + Send + Sync {
    /// Lower-case name of one record, e.g. "hospital"
    const SINGULAR: &'static str;
    /// Lower-case name of many records, e.g. "hospitals"
    const PLURAL: &'static str;
    /// Short plural used in error banners, e.g. "shops"
    const SHORT_PLURAL: &'static str = Self::PLURAL;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn address(&self) -> &str;
    fn coordinates(&self) -> Option<Coordinates>;

    /// List entry for this record
    fn card(&self) -> Card;
}

/// Fetch strategy for one resource type
#[async_trait]
pub trait ResourceSource<R: Resource>: Send + Sync {
    async fn nearby(&self, at: Coordinates, radius: SearchRadius) -> Result<Vec<R>>;

    async fn all(&self) -> Result<Vec<R>>;
}

/// The request a fetch issues
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceQuery {
    Nearby {
        at: Coordinates,
        radius: SearchRadius,
    },
    All,
}

impl ResourceQuery {
    pub async fn run<R, S>(&self, source: &S) -> Result<Vec<R>>
    where
        R: Resource,
        S: ResourceSource<R> + ?Sized,
    {
        match *self {
            ResourceQuery::Nearby { at, radius } => source.nearby(at, radius).await,
            ResourceQuery::All => source.all().await,
        }
    }

    fn failure_message<R: Resource>(&self) -> String {
        match self {
            ResourceQuery::Nearby { .. } => format!("Failed to fetch nearby {}", R::SHORT_PLURAL),
            ResourceQuery::All => format!("Failed to fetch {}", R::SHORT_PLURAL),
        }
    }
}

/// Handle for one in-flight fetch
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    pub query: ResourceQuery,
}

/// Everything a front end needs to draw the browser
#[derive(Debug)]
pub struct BrowserView<'a, R> {
    pub loading: bool,
    pub results_count: usize,
    pub cards: Vec<Card>,
    /// Zero results after a completed fetch
    pub empty_state: bool,
    pub error: Option<&'a str>,
    /// Radius picker, offered only when a device location is known
    pub radius: Option<SearchRadius>,
    pub location_error: Option<&'a LocationError>,
    pub map: Option<MapView>,
    pub detail: Option<&'a R>,
}

/// List + map + detail state for one resource type
#[derive(Debug, Clone)]
pub struct ResourceBrowser<R: Resource> {
    resources: Vec<R>,
    selected: Option<String>,
    location: Option<Coordinates>,
    location_error: Option<LocationError>,
    radius: SearchRadius,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<R: Resource> Default for ResourceBrowser<R> {
    fn default() -> Self {
        Self::new(SearchRadius::default())
    }
}

impl<R: Resource> ResourceBrowser<R> {
    pub fn new(radius: SearchRadius) -> Self {
        Self {
            resources: Vec::new(),
            selected: None,
            location: None,
            location_error: None,
            radius,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    pub fn resources(&self) -> &[R] {
        &self.resources
    }

    pub fn radius(&self) -> SearchRadius {
        self.radius
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn location_error(&self) -> Option<&LocationError> {
        self.location_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The query the next fetch would issue
    pub fn query(&self) -> ResourceQuery {
        match self.location {
            Some(at) => ResourceQuery::Nearby {
                at,
                radius: self.radius,
            },
            None => ResourceQuery::All,
        }
    }

    /// Start a fetch; every earlier ticket becomes stale
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            query: self.query(),
        }
    }

    /// Apply the outcome of a fetch. Returns `false` when the ticket was
    /// superseded and the outcome was dropped.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<R>>) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "dropping stale {} response (generation {}, current {})",
                R::PLURAL,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(resources) => {
                log::debug!("loaded {} {}", resources.len(), R::PLURAL);
                self.resources = resources;
                self.selected = None;
                self.error = None;
            }
            Err(err) => {
                log::warn!("{} fetch failed: {}", R::PLURAL, err);
                self.error = Some(ticket.query.failure_message::<R>());
            }
        }
        true
    }

    /// Issue the fetch for the current location and radius and wait for it
    pub async fn fetch<S>(&mut self, source: &S)
    where
        S: ResourceSource<R> + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = ticket.query.run(source).await;
        self.finish_fetch(ticket, result);
    }

    /// First load: acquire the location, then fetch
    pub async fn mount<S>(&mut self, geo: &Geolocator, source: &S)
    where
        S: ResourceSource<R> + ?Sized,
    {
        self.refresh_location(geo, source).await;
    }

    /// Re-run location acquisition. Success fetches nearby resources,
    /// failure falls back to the unfiltered list.
    pub async fn refresh_location<S>(&mut self, geo: &Geolocator, source: &S)
    where
        S: ResourceSource<R> + ?Sized,
    {
        match geo.locate().await {
            Ok(position) => {
                self.location = Some(position.coords);
                self.location_error = None;
            }
            Err(err) => {
                log::info!("no device location, listing all {}: {}", R::PLURAL, err);
                self.location = None;
                self.location_error = Some(err);
            }
        }
        self.fetch(source).await;
    }

    /// Use a location obtained elsewhere and re-fetch
    pub async fn update_location<S>(&mut self, at: Coordinates, source: &S)
    where
        S: ResourceSource<R> + ?Sized,
    {
        self.location = Some(at);
        self.location_error = None;
        self.fetch(source).await;
    }

    /// Change the radius and re-fetch
    pub async fn set_radius<S>(&mut self, radius: SearchRadius, source: &S)
    where
        S: ResourceSource<R> + ?Sized,
    {
        if self.radius == radius {
            return;
        }
        self.radius = radius;
        self.fetch(source).await;
    }

    /// Select the resource with `id`; the list card and the map marker both
    /// resolve to this one selection
    pub fn select(&mut self, id: &str) -> bool {
        if self.resources.iter().any(|resource| resource.id() == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// A list card was clicked
    pub fn select_card(&mut self, index: usize) -> bool {
        match self.resources.get(index) {
            Some(resource) => {
                self.selected = Some(resource.id().to_string());
                true
            }
            None => false,
        }
    }

    /// A map marker was clicked
    pub fn select_marker(&mut self, id: &str) -> bool {
        self.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&R> {
        let id = self.selected.as_deref()?;
        self.resources.iter().find(|resource| resource.id() == id)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn view(&self) -> BrowserView<'_, R> {
        let selected = self.selected.as_deref();

        let cards = self
            .resources
            .iter()
            .map(|resource| Card {
                selected: selected == Some(resource.id()),
                ..resource.card()
            })
            .collect();

        BrowserView {
            loading: self.loading,
            results_count: self.resources.len(),
            cards,
            empty_state: !self.loading && self.resources.is_empty(),
            error: self.error.as_deref(),
            radius: self.location.map(|_| self.radius),
            location_error: self.location_error.as_ref(),
            map: MapView::build(&self.resources, self.location, selected),
            detail: self.selected(),
        }
    }
}
