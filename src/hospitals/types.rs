//! Records exchanged with the hospital endpoints

use serde::{Deserialize, Serialize};

use medinear_geolocation::{Coordinates, GeoPoint};

/// A hospital and its nested collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub hospital_type: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub emergency_services: bool,
    #[serde(default)]
    pub beds_available: u32,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub tests: Vec<MedicalTest>,
    #[serde(default)]
    pub services: Vec<HospitalService>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Hospital {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.as_ref().and_then(GeoPoint::coordinates)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    /// Years of practice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default = "available")]
    pub is_available: bool,
}

fn available() -> bool {
    true
}

/// A diagnostic test offered by a hospital
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MedicalTest {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HospitalService {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body of `POST /hospitals`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHospitalRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub hospital_type: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    pub emergency_services: bool,
    pub beds_available: u32,
    pub specializations: Vec<String>,
    pub doctors: Vec<Doctor>,
    pub tests: Vec<MedicalTest>,
    pub services: Vec<HospitalService>,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

/// Body of `PUT /hospitals/:id`; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHospitalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub hospital_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_services: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds_available: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializations: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hospital_from_backend_json() {
        let hospital: Hospital = serde_json::from_value(serde_json::json!({
            "_id": "h1",
            "name": "General Hospital",
            "type": "Government",
            "emergencyServices": true,
            "bedsAvailable": 40,
            "doctors": [{ "name": "Dr. Rao", "specialization": "Cardiology" }]
        }))
        .unwrap();

        assert_eq!(hospital.hospital_type, "Government");
        assert!(hospital.emergency_services);
        assert!(hospital.doctors[0].is_available);
        assert_eq!(hospital.coordinates(), None);
    }

    #[test]
    fn test_incomplete_nested_items_still_load() {
        let hospital: Hospital = serde_json::from_value(serde_json::json!({
            "_id": "h2",
            "doctors": [{ "name": "Dr. Iyer" }],
            "tests": [{ "name": "Blood panel" }],
            "services": [{ "category": "Emergency" }]
        }))
        .unwrap();

        assert_eq!(hospital.doctors[0].specialization, "");
        assert_eq!(hospital.tests[0].price, 0.0);
        assert_eq!(hospital.services[0].name, "");
        assert_eq!(hospital.services[0].category.as_deref(), Some("Emergency"));
    }

    #[test]
    fn test_doctor_omits_empty_optionals() {
        let doctor = Doctor {
            name: "Dr. Rao".to_string(),
            specialization: "Cardiology".to_string(),
            is_available: true,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&doctor).unwrap(),
            serde_json::json!({
                "name": "Dr. Rao",
                "specialization": "Cardiology",
                "isAvailable": true
            })
        );
    }
}
