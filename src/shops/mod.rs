//! Medical shop endpoints

mod types;

use medinear_geolocation::Coordinates;

use crate::browser::SearchRadius;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::owner::ReplaceCollection;

pub use types::*;

const BASE_PATH: &str = "/medical-shops";

/// Client for the `/medical-shops` endpoints
#[derive(Debug, Clone)]
pub struct MedicalShopsApi {
    api: ApiClient,
}

impl MedicalShopsApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Path of one shop, the prefix of its nested collections
    pub fn resource_path(id: &str) -> String {
        format!("{}/{}", BASE_PATH, id)
    }

    /// Every shop, unfiltered
    pub async fn all(&self) -> Result<Vec<MedicalShop>> {
        self.api.get(BASE_PATH).send_data().await
    }

    /// Shops within `radius` of `at`
    pub async fn nearby(&self, at: Coordinates, radius: SearchRadius) -> Result<Vec<MedicalShop>> {
        self.api
            .get(&format!("{}/nearby", BASE_PATH))
            .query("latitude", at.latitude)
            .query("longitude", at.longitude)
            .query("maxDistance", radius.meters())
            .send_data()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<MedicalShop> {
        self.api.get(&Self::resource_path(id)).send_data().await
    }

    /// The signed-in owner's shop; a 404 means it was not created yet
    pub async fn my_shop(&self) -> Result<MedicalShop> {
        self.api
            .get(&format!("{}/my-shop", BASE_PATH))
            .send_data()
            .await
    }

    pub async fn create(&self, shop: &CreateShopRequest) -> Result<MedicalShop> {
        self.api.post(BASE_PATH).json(shop)?.send_data().await
    }

    pub async fn update(&self, id: &str, changes: &UpdateShopRequest) -> Result<()> {
        self.api
            .put(&Self::resource_path(id))
            .json(changes)?
            .send_empty()
            .await
    }

    /// Replace the whole medicines collection
    pub async fn update_medicines(&self, id: &str, medicines: &[Medicine]) -> Result<()> {
        ReplaceCollection::new(Self::resource_path(id), medicines.to_vec())
            .send(&self.api)
            .await
    }

    pub async fn add_review(&self, id: &str, review: &ReviewDraft) -> Result<()> {
        let review = review.validate()?;
        self.api
            .post(&format!("{}/reviews", Self::resource_path(id)))
            .json(&review)?
            .send_empty()
            .await
    }
}
