//! Service listing models

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::models::User;

pub const DEFAULT_SERVICE_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_SERVICE_IMAGE: &str = "/media/home-service.png";

/// A provider-owned service listing
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListing {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub category: ServiceCategory,
    pub description: Option<String>,
    pub price: i64, // Price in paise
    pub price_type: PriceType,
    pub images: String,
    pub service_area: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub service_radius: f64, // km
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "service_category", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    Electrical,
    Plumbing,
    Cleaning,
    PestControl,
    Gardening,
    Painting,
    Carpentry,
    ApplianceRepair,
    Hvac,
    Roofing,
    Other,
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "price_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Hourly,
    Fixed,
    Negotiable,
}

/// Request DTO for creating or replacing a listing
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: ServiceCategory,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: i64,
    pub price_type: PriceType,
    pub images: Option<String>,
    #[validate(length(max = 200))]
    pub service_area: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    pub service_radius: Option<f64>,
}

impl ServiceRequest {
    pub fn into_listing(self, provider_id: Uuid) -> ServiceListing {
        let now = Utc::now();
        ServiceListing {
            id: Uuid::new_v4(),
            provider_id,
            name: self.name,
            category: self.category,
            description: self.description,
            price: self.price,
            price_type: self.price_type,
            images: self
                .images
                .unwrap_or_else(|| DEFAULT_SERVICE_IMAGE.to_string()),
            service_area: self.service_area,
            latitude: self.latitude,
            longitude: self.longitude,
            service_radius: self.service_radius.unwrap_or(DEFAULT_SERVICE_RADIUS_KM),
            created_at: now,
            updated_at: now,
        }
    }

    /// Coordinates must be supplied together and lie on the globe
    pub fn coordinates_valid(&self) -> bool {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon),
            (None, None) => true,
            _ => false,
        }
    }

    /// Overwrite the editable fields of an existing listing
    pub fn apply_to(self, listing: &mut ServiceListing) {
        listing.name = self.name;
        listing.category = self.category;
        listing.description = self.description;
        listing.price = self.price;
        listing.price_type = self.price_type;
        if let Some(images) = self.images {
            listing.images = images;
        }
        listing.service_area = self.service_area;
        listing.latitude = self.latitude;
        listing.longitude = self.longitude;
        listing.service_radius = self.service_radius.unwrap_or(DEFAULT_SERVICE_RADIUS_KM);
        listing.updated_at = Utc::now();
    }
}

/// Query parameters for `GET /api/services/search/nearby`
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<f64>,
    pub category: Option<ServiceCategory>,
}

/// Listing as returned to clients, with the provider's display name
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    #[serde(flatten)]
    pub listing: ServiceListing,
    pub provider_name: Option<String>,
}

impl ServiceResponse {
    pub fn new(listing: ServiceListing, provider: Option<&User>) -> Self {
        Self {
            listing,
            provider_name: provider.map(|p| p.name.clone()),
        }
    }
}
