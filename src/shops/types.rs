//! Records exchanged with the medical shop endpoints

use serde::{Deserialize, Serialize};

use medinear_geolocation::{Coordinates, GeoPoint};

use crate::error::{Error, Result};

/// A pharmacy or medical store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MedicalShop {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl MedicalShop {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.as_ref().and_then(GeoPoint::coordinates)
    }
}

/// A medicine line item, embedded in its shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

/// A customer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Review as typed into the form
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<Review> {
        if !(1..=5).contains(&self.rating) {
            return Err(Error::validation("Rating must be between 1 and 5"));
        }
        let comment = self.comment.trim();
        Ok(Review {
            rating: self.rating,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }
}

/// Body of `POST /medical-shops`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShopRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

/// Body of `PUT /medical-shops/:id`; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShopRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_from_backend_json() {
        let shop: MedicalShop = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "name": "City Pharmacy",
            "address": "1 Main Road",
            "averageRating": 4.5,
            "medicines": [{ "_id": "m1", "name": "Paracetamol", "price": 20, "stock": 15 }],
            "location": { "type": "Point", "coordinates": [77.1, 28.5] }
        }))
        .unwrap();

        assert_eq!(shop.id, "s1");
        assert_eq!(shop.medicines[0].price, 20.0);
        assert_eq!(shop.coordinates(), Some(Coordinates::new(77.1, 28.5)));
        assert!(shop.reviews.is_empty());
    }

    #[test]
    fn test_legacy_medicine_without_stock() {
        let shop: MedicalShop = serde_json::from_value(serde_json::json!({
            "_id": "s2",
            "medicines": [{ "name": "Old stock entry", "price": 3 }, {}]
        }))
        .unwrap();

        assert_eq!(shop.medicines[0].stock, 0);
        assert_eq!(shop.medicines[0].price, 3.0);
        assert_eq!(shop.medicines[1].name, "");
    }

    #[test]
    fn test_review_rating_bounds() {
        assert!(ReviewDraft { rating: 0, comment: String::new() }.validate().is_err());
        assert!(ReviewDraft { rating: 6, comment: String::new() }.validate().is_err());

        let review = ReviewDraft { rating: 4, comment: "  helpful staff ".to_string() }
            .validate()
            .unwrap();
        assert_eq!(review.comment.as_deref(), Some("helpful staff"));
    }
}
