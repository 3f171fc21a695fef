//! Browser bindings for medical shops and hospitals

use async_trait::async_trait;

use medinear_geolocation::Coordinates;

use super::{Card, Resource, ResourceSource, SearchRadius};
use crate::error::Result;
use crate::hospitals::{Hospital, HospitalsApi};
use crate::shops::{MedicalShop, MedicalShopsApi};

impl Resource for MedicalShop {
    const SINGULAR: &'static str = "medical shop";
    const PLURAL: &'static str = "medical shops";
    const SHORT_PLURAL: &'static str = "shops";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn coordinates(&self) -> Option<Coordinates> {
        MedicalShop::coordinates(self)
    }

    fn card(&self) -> Card {
        let mut badges = Vec::new();
        if self.average_rating > 0.0 {
            badges.push(format!("{:.1}", self.average_rating));
        }

        let mut details = Vec::new();
        if !self.phone.is_empty() {
            details.push(self.phone.clone());
        }
        if !self.medicines.is_empty() {
            details.push(format!("{} medicines available", self.medicines.len()));
        }

        Card {
            id: self.id.clone(),
            title: self.name.clone(),
            subtitle: self.address.clone(),
            badges,
            details,
            selected: false,
        }
    }
}

impl Resource for Hospital {
    const SINGULAR: &'static str = "hospital";
    const PLURAL: &'static str = "hospitals";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn coordinates(&self) -> Option<Coordinates> {
        Hospital::coordinates(self)
    }

    fn card(&self) -> Card {
        let mut badges = Vec::new();
        if self.emergency_services {
            badges.push("Emergency".to_string());
        }
        if !self.hospital_type.is_empty() {
            badges.push(self.hospital_type.clone());
        }

        let mut details = Vec::new();
        if !self.phone.is_empty() {
            details.push(self.phone.clone());
        }
        if self.beds_available > 0 {
            details.push(format!("{} Beds", self.beds_available));
        }

        Card {
            id: self.id.clone(),
            title: self.name.clone(),
            subtitle: self.address.clone(),
            badges,
            details,
            selected: false,
        }
    }
}

#[async_trait]
impl ResourceSource<MedicalShop> for MedicalShopsApi {
    async fn nearby(&self, at: Coordinates, radius: SearchRadius) -> Result<Vec<MedicalShop>> {
        MedicalShopsApi::nearby(self, at, radius).await
    }

    async fn all(&self) -> Result<Vec<MedicalShop>> {
        MedicalShopsApi::all(self).await
    }
}

#[async_trait]
impl ResourceSource<Hospital> for HospitalsApi {
    async fn nearby(&self, at: Coordinates, radius: SearchRadius) -> Result<Vec<Hospital>> {
        HospitalsApi::nearby(self, at, radius).await
    }

    async fn all(&self) -> Result<Vec<Hospital>> {
        HospitalsApi::all(self).await
    }
}
