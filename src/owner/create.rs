//! Creation forms shown to owners who have no shop or hospital yet

use medinear_geolocation::{Coordinates, Geolocator};

use crate::error::{Error, FormError, Result};
use crate::hospitals::{
    CreateHospitalRequest, Doctor, Hospital, HospitalService, HospitalsApi, MedicalTest,
};
use crate::shops::{CreateShopRequest, MedicalShop, MedicalShopsApi};

use super::collection::ItemDraft;
use super::drafts::{DoctorDraft, ServiceDraft, TestDraft};

const REQUIRED_FIELDS: &str = "Please fill in all required fields";

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn require(fields: &[&str]) -> Result<()> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(Error::validation(REQUIRED_FIELDS));
    }
    Ok(())
}

/// Prefill coordinates from the device; the form keeps `[0, 0]` when the
/// location cannot be read
async fn capture(geo: &Geolocator, coordinates: &mut Coordinates) -> bool {
    match geo.locate().await {
        Ok(position) => {
            *coordinates = position.coords;
            true
        }
        Err(_) => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShopForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub opening_hours: String,
    pub coordinates: Coordinates,
}

impl Default for ShopForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            address: String::new(),
            email: String::new(),
            opening_hours: String::new(),
            coordinates: Coordinates::new(0.0, 0.0),
        }
    }
}

impl ShopForm {
    pub async fn capture_location(&mut self, geo: &Geolocator) -> bool {
        capture(geo, &mut self.coordinates).await
    }

    pub fn to_request(&self) -> Result<CreateShopRequest> {
        require(&[self.name.as_str(), self.phone.as_str(), self.address.as_str()])?;

        Ok(CreateShopRequest {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            email: optional(&self.email),
            opening_hours: optional(&self.opening_hours),
            coordinates: self.coordinates.to_lng_lat(),
        })
    }

    pub async fn submit(&self, api: &MedicalShopsApi) -> std::result::Result<MedicalShop, FormError> {
        let request = self
            .to_request()
            .map_err(|err| FormError::from_error(err, "Failed to create shop"))?;
        api.create(&request)
            .await
            .map_err(|err| FormError::from_error(err, "Failed to create shop"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HospitalForm {
    pub name: String,
    pub hospital_type: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub opening_hours: String,
    pub emergency_services: bool,
    pub beds_available: u32,
    /// Comma separated, as typed
    pub specializations: String,
    pub coordinates: Coordinates,
    doctors: Vec<Doctor>,
    tests: Vec<MedicalTest>,
    services: Vec<HospitalService>,
}

impl Default for HospitalForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            hospital_type: "Private".to_string(),
            phone: String::new(),
            address: String::new(),
            email: String::new(),
            opening_hours: String::new(),
            emergency_services: false,
            beds_available: 0,
            specializations: String::new(),
            coordinates: Coordinates::new(0.0, 0.0),
            doctors: Vec::new(),
            tests: Vec::new(),
            services: Vec::new(),
        }
    }
}

impl HospitalForm {
    pub async fn capture_location(&mut self, geo: &Geolocator) -> bool {
        capture(geo, &mut self.coordinates).await
    }

    /// Bed count input; anything unparsable counts as zero
    pub fn set_beds(&mut self, value: &str) {
        self.beds_available = value.trim().parse().unwrap_or(0);
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn tests(&self) -> &[MedicalTest] {
        &self.tests
    }

    pub fn services(&self) -> &[HospitalService] {
        &self.services
    }

    /// Stage a doctor to be created along with the hospital
    pub fn stage_doctor(&mut self, draft: &DoctorDraft) -> Result<()> {
        self.doctors.push(draft.validate()?);
        Ok(())
    }

    pub fn unstage_doctor(&mut self, index: usize) {
        if index < self.doctors.len() {
            self.doctors.remove(index);
        }
    }

    pub fn stage_test(&mut self, draft: &TestDraft) -> Result<()> {
        self.tests.push(draft.validate()?);
        Ok(())
    }

    pub fn unstage_test(&mut self, index: usize) {
        if index < self.tests.len() {
            self.tests.remove(index);
        }
    }

    pub fn stage_service(&mut self, draft: &ServiceDraft) -> Result<()> {
        self.services.push(draft.validate()?);
        Ok(())
    }

    pub fn unstage_service(&mut self, index: usize) {
        if index < self.services.len() {
            self.services.remove(index);
        }
    }

    fn specialization_list(&self) -> Vec<String> {
        self.specializations
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn to_request(&self) -> Result<CreateHospitalRequest> {
        require(&[self.name.as_str(), self.phone.as_str(), self.address.as_str()])?;

        Ok(CreateHospitalRequest {
            name: self.name.trim().to_string(),
            hospital_type: self.hospital_type.clone(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            email: optional(&self.email),
            opening_hours: optional(&self.opening_hours),
            emergency_services: self.emergency_services,
            beds_available: self.beds_available,
            specializations: self.specialization_list(),
            doctors: self.doctors.clone(),
            tests: self.tests.clone(),
            services: self.services.clone(),
            coordinates: self.coordinates.to_lng_lat(),
        })
    }

    pub async fn submit(&self, api: &HospitalsApi) -> std::result::Result<Hospital, FormError> {
        let request = self
            .to_request()
            .map_err(|err| FormError::from_error(err, "Failed to create hospital"))?;
        api.create(&request)
            .await
            .map_err(|err| FormError::from_error(err, "Failed to create hospital"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medinear_geolocation::{DeniedLocation, FixedLocation, PositionOptions};
    use std::sync::Arc;

    #[test]
    fn test_shop_form_requires_name_phone_address() {
        let form = ShopForm {
            name: "City Pharmacy".to_string(),
            address: "1 Main Road".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_request().unwrap_err().to_string(), REQUIRED_FIELDS);
    }

    #[test]
    fn test_shop_form_sends_lng_lat() {
        tokio_test::block_on(async {
            let mut form = ShopForm {
                name: "City Pharmacy".to_string(),
                phone: "555".to_string(),
                address: "1 Main Road".to_string(),
                ..Default::default()
            };
            let geo = Geolocator::new(
                Arc::new(FixedLocation::new(Coordinates::new(77.2, 28.6))),
                PositionOptions::default(),
            );
            assert!(form.capture_location(&geo).await);

            let request = form.to_request().unwrap();
            assert_eq!(request.coordinates, [77.2, 28.6]);
            assert_eq!(request.email, None);
        });
    }

    #[test]
    fn test_denied_location_keeps_origin() {
        tokio_test::block_on(async {
            let mut form = HospitalForm::default();
            let geo = Geolocator::new(Arc::new(DeniedLocation), PositionOptions::default());
            assert!(!form.capture_location(&geo).await);
            assert_eq!(form.coordinates.to_lng_lat(), [0.0, 0.0]);
        });
    }

    #[test]
    fn test_hospital_form_splits_specializations_and_stages_items() {
        let mut form = HospitalForm {
            name: "General".to_string(),
            phone: "555".to_string(),
            address: "Ring Road".to_string(),
            specializations: " Cardiology, ,Neurology ,".to_string(),
            ..Default::default()
        };
        form.set_beds("abc");
        assert_eq!(form.beds_available, 0);
        form.set_beds("25");

        form.stage_doctor(&DoctorDraft {
            name: "Dr. Rao".to_string(),
            specialization: "Cardiology".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert!(form.stage_test(&TestDraft::default()).is_err());
        form.stage_service(&ServiceDraft {
            name: "Ambulance".to_string(),
            ..Default::default()
        })
        .unwrap();
        form.unstage_service(0);

        let request = form.to_request().unwrap();
        assert_eq!(request.specializations, vec!["Cardiology", "Neurology"]);
        assert_eq!(request.beds_available, 25);
        assert_eq!(request.hospital_type, "Private");
        assert_eq!(request.doctors.len(), 1);
        assert!(request.tests.is_empty());
        assert!(request.services.is_empty());
    }
}
