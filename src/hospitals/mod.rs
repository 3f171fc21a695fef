//! Hospital endpoints

mod types;

use medinear_geolocation::Coordinates;

use crate::browser::SearchRadius;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::owner::ReplaceCollection;

pub use types::*;

const BASE_PATH: &str = "/hospitals";

/// Client for the `/hospitals` endpoints
#[derive(Debug, Clone)]
pub struct HospitalsApi {
    api: ApiClient,
}

impl HospitalsApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Path of one hospital, the prefix of its nested collections
    pub fn resource_path(id: &str) -> String {
        format!("{}/{}", BASE_PATH, id)
    }

    pub async fn all(&self) -> Result<Vec<Hospital>> {
        self.api.get(BASE_PATH).send_data().await
    }

    /// Hospitals within `radius` of `at`
    pub async fn nearby(&self, at: Coordinates, radius: SearchRadius) -> Result<Vec<Hospital>> {
        self.api
            .get(&format!("{}/nearby", BASE_PATH))
            .query("latitude", at.latitude)
            .query("longitude", at.longitude)
            .query("maxDistance", radius.meters())
            .send_data()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Hospital> {
        self.api.get(&Self::resource_path(id)).send_data().await
    }

    /// Doctors of one hospital, optionally narrowed to a specialization
    pub async fn doctors(&self, id: &str, specialization: Option<&str>) -> Result<Vec<Doctor>> {
        let mut request = self
            .api
            .get(&format!("{}/doctors", Self::resource_path(id)));
        if let Some(specialization) = specialization {
            request = request.query("specialization", specialization);
        }
        request.send_data().await
    }

    /// The signed-in owner's hospital; a 404 means it was not created yet
    pub async fn my_hospital(&self) -> Result<Hospital> {
        self.api
            .get(&format!("{}/my-hospital", BASE_PATH))
            .send_data()
            .await
    }

    pub async fn create(&self, hospital: &CreateHospitalRequest) -> Result<Hospital> {
        self.api.post(BASE_PATH).json(hospital)?.send_data().await
    }

    pub async fn update(&self, id: &str, changes: &UpdateHospitalRequest) -> Result<()> {
        self.api
            .put(&Self::resource_path(id))
            .json(changes)?
            .send_empty()
            .await
    }

    pub async fn update_doctors(&self, id: &str, doctors: &[Doctor]) -> Result<()> {
        ReplaceCollection::new(Self::resource_path(id), doctors.to_vec())
            .send(&self.api)
            .await
    }

    pub async fn update_tests(&self, id: &str, tests: &[MedicalTest]) -> Result<()> {
        ReplaceCollection::new(Self::resource_path(id), tests.to_vec())
            .send(&self.api)
            .await
    }

    pub async fn update_services(&self, id: &str, services: &[HospitalService]) -> Result<()> {
        ReplaceCollection::new(Self::resource_path(id), services.to_vec())
            .send(&self.api)
            .await
    }
}
