//! Form drafts for medicines, doctors, tests and services

use crate::error::{Error, Result};
use crate::hospitals::{Doctor, Hospital, HospitalService, HospitalsApi, MedicalTest};
use crate::shops::{MedicalShop, MedicalShopsApi, Medicine};

use super::OwnedResource;
use super::collection::{
    CollectionEditor, CollectionOwner, EditAction, ItemDraft, LineItem, ReplaceCollection,
};

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_price(value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(Error::validation("Price must be a non-negative number")),
    }
}

fn parse_count(value: &str, field: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::validation(format!("{} must be a whole number", field)))
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicineDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub manufacturer: String,
}

impl ItemDraft for MedicineDraft {
    type Item = Medicine;

    fn validate(&self) -> Result<Medicine> {
        if blank(&self.name) || blank(&self.price) || blank(&self.stock) {
            return Err(Error::validation(
                "Please fill in required fields (name, price, stock)",
            ));
        }

        Ok(Medicine {
            id: None,
            name: self.name.trim().to_string(),
            description: optional(&self.description),
            price: parse_price(&self.price)?,
            stock: parse_count(&self.stock, "Stock")?,
            manufacturer: optional(&self.manufacturer),
        })
    }

    fn from_item(item: &Medicine) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.to_string(),
            stock: item.stock.to_string(),
            manufacturer: item.manufacturer.clone().unwrap_or_default(),
        }
    }
}

impl LineItem for Medicine {
    const COLLECTION: &'static str = "medicines";
    const LABEL: &'static str = "medicine";

    type Draft = MedicineDraft;

    fn backend_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_backend_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn collection_in(resource: &mut OwnedResource) -> Option<&mut Vec<Self>> {
        match resource {
            OwnedResource::Shop(shop) => Some(&mut shop.medicines),
            _ => None,
        }
    }
}

impl CollectionOwner<Medicine> for MedicalShop {
    fn resource_path(&self) -> String {
        MedicalShopsApi::resource_path(&self.id)
    }

    fn collection(&self) -> &[Medicine] {
        &self.medicines
    }
}

impl CollectionEditor<Medicine> {
    /// Inline stock change on one medicine
    pub fn set_stock(&self, index: usize, stock: &str) -> Result<ReplaceCollection<Medicine>> {
        let mut medicine = self
            .items()
            .get(index)
            .cloned()
            .ok_or_else(|| Error::validation(format!("No medicine at position {}", index + 1)))?;
        medicine.stock = parse_count(stock, "Stock")?;

        let mut items = self.items().to_vec();
        items[index] = medicine;
        Ok(ReplaceCollection::with_action(
            self.resource_path(),
            items,
            EditAction::UpdateStock,
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorDraft {
    pub name: String,
    pub specialization: String,
    pub qualification: String,
    pub experience: String,
    pub consultation_fee: String,
    pub availability: String,
    pub is_available: bool,
}

impl Default for DoctorDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            specialization: String::new(),
            qualification: String::new(),
            experience: String::new(),
            consultation_fee: String::new(),
            availability: String::new(),
            is_available: true,
        }
    }
}

impl ItemDraft for DoctorDraft {
    type Item = Doctor;

    fn validate(&self) -> Result<Doctor> {
        if blank(&self.name) || blank(&self.specialization) {
            return Err(Error::validation(
                "Please fill in required fields (name, specialization)",
            ));
        }

        let experience = match optional(&self.experience) {
            Some(years) => Some(parse_count(&years, "Experience")?),
            None => None,
        };
        let consultation_fee = match optional(&self.consultation_fee) {
            Some(fee) => Some(parse_price(&fee)?),
            None => None,
        };

        Ok(Doctor {
            id: None,
            name: self.name.trim().to_string(),
            specialization: self.specialization.trim().to_string(),
            qualification: optional(&self.qualification),
            experience,
            consultation_fee,
            availability: optional(&self.availability),
            is_available: self.is_available,
        })
    }

    fn from_item(item: &Doctor) -> Self {
        Self {
            name: item.name.clone(),
            specialization: item.specialization.clone(),
            qualification: item.qualification.clone().unwrap_or_default(),
            experience: item.experience.map(|y| y.to_string()).unwrap_or_default(),
            consultation_fee: item
                .consultation_fee
                .map(|fee| fee.to_string())
                .unwrap_or_default(),
            availability: item.availability.clone().unwrap_or_default(),
            is_available: item.is_available,
        }
    }
}

impl LineItem for Doctor {
    const COLLECTION: &'static str = "doctors";
    const LABEL: &'static str = "doctor";

    type Draft = DoctorDraft;

    fn backend_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_backend_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn collection_in(resource: &mut OwnedResource) -> Option<&mut Vec<Self>> {
        match resource {
            OwnedResource::Hospital(hospital) => Some(&mut hospital.doctors),
            _ => None,
        }
    }
}

impl CollectionOwner<Doctor> for Hospital {
    fn resource_path(&self) -> String {
        HospitalsApi::resource_path(&self.id)
    }

    fn collection(&self) -> &[Doctor] {
        &self.doctors
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub duration: String,
    pub category: String,
}

impl ItemDraft for TestDraft {
    type Item = MedicalTest;

    fn validate(&self) -> Result<MedicalTest> {
        if blank(&self.name) || blank(&self.price) {
            return Err(Error::validation("Please fill in required fields (name, price)"));
        }

        Ok(MedicalTest {
            id: None,
            name: self.name.trim().to_string(),
            description: optional(&self.description),
            price: parse_price(&self.price)?,
            duration: optional(&self.duration),
            category: optional(&self.category),
        })
    }

    fn from_item(item: &MedicalTest) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.to_string(),
            duration: item.duration.clone().unwrap_or_default(),
            category: item.category.clone().unwrap_or_default(),
        }
    }
}

impl LineItem for MedicalTest {
    const COLLECTION: &'static str = "tests";
    const LABEL: &'static str = "test";

    type Draft = TestDraft;

    fn backend_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_backend_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn collection_in(resource: &mut OwnedResource) -> Option<&mut Vec<Self>> {
        match resource {
            OwnedResource::Hospital(hospital) => Some(&mut hospital.tests),
            _ => None,
        }
    }
}

impl CollectionOwner<MedicalTest> for Hospital {
    fn resource_path(&self) -> String {
        HospitalsApi::resource_path(&self.id)
    }

    fn collection(&self) -> &[MedicalTest] {
        &self.tests
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub category: String,
}

impl ItemDraft for ServiceDraft {
    type Item = HospitalService;

    fn validate(&self) -> Result<HospitalService> {
        if blank(&self.name) {
            return Err(Error::validation("Please fill in service name"));
        }

        Ok(HospitalService {
            id: None,
            name: self.name.trim().to_string(),
            description: optional(&self.description),
            category: optional(&self.category),
        })
    }

    fn from_item(item: &HospitalService) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            category: item.category.clone().unwrap_or_default(),
        }
    }
}

impl LineItem for HospitalService {
    const COLLECTION: &'static str = "services";
    const LABEL: &'static str = "service";

    type Draft = ServiceDraft;

    fn backend_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_backend_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn collection_in(resource: &mut OwnedResource) -> Option<&mut Vec<Self>> {
        match resource {
            OwnedResource::Hospital(hospital) => Some(&mut hospital.services),
            _ => None,
        }
    }
}

impl CollectionOwner<HospitalService> for Hospital {
    fn resource_path(&self) -> String {
        HospitalsApi::resource_path(&self.id)
    }

    fn collection(&self) -> &[HospitalService] {
        &self.services
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine_draft(name: &str, price: &str, stock: &str) -> MedicineDraft {
        MedicineDraft {
            name: name.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_medicine_requires_name_price_stock() {
        for draft in [
            medicine_draft("", "20", "15"),
            medicine_draft("Paracetamol", "", "15"),
            medicine_draft("Paracetamol", "20", " "),
        ] {
            let err = draft.validate().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please fill in required fields (name, price, stock)"
            );
        }
    }

    #[test]
    fn test_medicine_numbers_are_parsed() {
        let medicine = medicine_draft("Paracetamol", "20", "15").validate().unwrap();
        assert_eq!(medicine.price, 20.0);
        assert_eq!(medicine.stock, 15);
        assert_eq!(medicine.description, None);

        assert!(medicine_draft("Paracetamol", "twenty", "15").validate().is_err());
        assert!(medicine_draft("Paracetamol", "20", "-3").validate().is_err());
    }

    #[test]
    fn test_doctor_optional_numbers() {
        let draft = DoctorDraft {
            name: "Dr. Rao".to_string(),
            specialization: "Cardiology".to_string(),
            experience: "12".to_string(),
            ..Default::default()
        };
        let doctor = draft.validate().unwrap();
        assert_eq!(doctor.experience, Some(12));
        assert_eq!(doctor.consultation_fee, None);
        assert!(doctor.is_available);

        let missing = DoctorDraft {
            name: "Dr. Rao".to_string(),
            ..Default::default()
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_draft_roundtrips_item_for_editing() {
        let test = MedicalTest {
            id: Some("t1".to_string()),
            name: "CBC".to_string(),
            price: 350.5,
            category: Some("Blood".to_string()),
            ..Default::default()
        };
        let draft = TestDraft::from_item(&test);
        assert_eq!(draft.price, "350.5");
        assert_eq!(draft.validate().unwrap().category.as_deref(), Some("Blood"));
    }

    #[test]
    fn test_service_requires_name() {
        assert_eq!(
            ServiceDraft::default().validate().unwrap_err().to_string(),
            "Please fill in service name"
        );
    }
}
