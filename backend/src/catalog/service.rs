use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::catalog::geo::haversine_km;
use crate::catalog::model::{
    NearbyQuery, ServiceCategory, ServiceListing, ServiceRequest, ServiceResponse,
    DEFAULT_SEARCH_RADIUS_KM,
};
use crate::error::ApiError;
use crate::models::User;
use crate::repository::{ServiceRepository, UserRepository};

#[derive(Clone)]
pub struct CatalogService {
    services: Arc<dyn ServiceRepository>,
    users: Arc<dyn UserRepository>,
}

impl CatalogService {
    pub fn new(services: Arc<dyn ServiceRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { services, users }
    }

    pub async fn create_service(
        &self,
        provider: &User,
        request: ServiceRequest,
    ) -> Result<ServiceResponse, ApiError> {
        if !provider.is_provider() {
            return Err(ApiError::Forbidden(
                "Only providers can create services".to_string(),
            ));
        }
        validate_request(&request)?;

        let listing = self
            .services
            .create(request.into_listing(provider.id))
            .await?;

        tracing::info!(
            service_id = %listing.id,
            provider_id = %provider.id,
            category = ?listing.category,
            "Service created"
        );

        Ok(ServiceResponse::new(listing, Some(provider)))
    }

    pub async fn update_service(
        &self,
        caller: &User,
        id: Uuid,
        request: ServiceRequest,
    ) -> Result<ServiceResponse, ApiError> {
        validate_request(&request)?;

        let mut listing = self.owned_listing(caller.id, id).await?;
        request.apply_to(&mut listing);
        let listing = self.services.update(&listing).await?;

        tracing::info!(service_id = %id, "Service updated");

        Ok(ServiceResponse::new(listing, Some(caller)))
    }

    pub async fn delete_service(&self, caller_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        self.owned_listing(caller_id, id).await?;

        if !self.services.delete(id).await? {
            return Err(ApiError::NotFound("Service not found".to_string()));
        }

        tracing::info!(service_id = %id, "Service deleted");
        Ok(())
    }

    pub async fn get_service(&self, id: Uuid) -> Result<ServiceResponse, ApiError> {
        let listing = self
            .services
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("Service not found".to_string()))?;

        let provider = self.users.find_by_id(listing.provider_id).await?;
        Ok(ServiceResponse::new(listing, provider.as_ref()))
    }

    pub async fn list_services(&self) -> Result<Vec<ServiceResponse>, ApiError> {
        let listings = self.services.find_all().await?;
        self.with_provider_names(listings).await
    }

    pub async fn list_by_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<ServiceResponse>, ApiError> {
        let listings = self.services.find_by_provider(provider_id).await?;
        self.with_provider_names(listings).await
    }

    pub async fn list_by_category(
        &self,
        category: ServiceCategory,
    ) -> Result<Vec<ServiceResponse>, ApiError> {
        let listings = self.services.find_by_category(category).await?;
        self.with_provider_names(listings).await
    }

    /// Listings within the requested radius of the query point.
    /// The listing's own `service_radius` does not bound the search.
    pub async fn search_nearby(&self, query: NearbyQuery) -> Result<Vec<ServiceResponse>, ApiError> {
        if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lon) {
            return Err(ApiError::ValidationError(
                "lat must be within [-90, 90] and lon within [-180, 180]".to_string(),
            ));
        }
        let radius = query.radius.unwrap_or(DEFAULT_SEARCH_RADIUS_KM);
        if !radius.is_finite() || radius < 0.0 {
            return Err(ApiError::ValidationError(
                "radius must be a non-negative number".to_string(),
            ));
        }

        let candidates = match query.category {
            Some(category) => self.services.find_by_category(category).await?,
            None => self.services.find_all().await?,
        };
        let nearby = filter_within_radius(candidates, query.lat, query.lon, radius);

        tracing::debug!(
            lat = query.lat,
            lon = query.lon,
            radius_km = radius,
            matches = nearby.len(),
            "Nearby search"
        );

        self.with_provider_names(nearby).await
    }

    async fn owned_listing(&self, caller_id: Uuid, id: Uuid) -> Result<ServiceListing, ApiError> {
        let listing = self
            .services
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("Service not found".to_string()))?;

        if listing.provider_id != caller_id {
            return Err(ApiError::Forbidden(
                "Only the owning provider can modify this service".to_string(),
            ));
        }

        Ok(listing)
    }

    async fn with_provider_names(
        &self,
        listings: Vec<ServiceListing>,
    ) -> Result<Vec<ServiceResponse>, ApiError> {
        let mut providers: HashMap<Uuid, Option<User>> = HashMap::new();
        let mut responses = Vec::with_capacity(listings.len());

        for listing in listings {
            if !providers.contains_key(&listing.provider_id) {
                let provider = self.users.find_by_id(listing.provider_id).await?;
                providers.insert(listing.provider_id, provider);
            }
            let provider = providers.get(&listing.provider_id).and_then(|p| p.as_ref());
            responses.push(ServiceResponse::new(listing, provider));
        }

        Ok(responses)
    }
}

fn validate_request(request: &ServiceRequest) -> Result<(), ApiError> {
    request.validate()?;
    if !request.coordinates_valid() {
        return Err(ApiError::ValidationError(
            "latitude and longitude must be given together and lie within range".to_string(),
        ));
    }
    Ok(())
}

/// Keep listings with coordinates whose distance to (lat, lon) is at most `radius_km`
pub fn filter_within_radius(
    listings: Vec<ServiceListing>,
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> Vec<ServiceListing> {
    listings
        .into_iter()
        .filter(|listing| match (listing.latitude, listing.longitude) {
            (Some(s_lat), Some(s_lon)) => haversine_km(lat, lon, s_lat, s_lon) <= radius_km,
            _ => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::PriceType;
    use chrono::Utc;

    const KM_PER_DEG_LAT: f64 = 111.194_93;

    fn listing_at(lat: Option<f64>, lon: Option<f64>, service_radius: f64) -> ServiceListing {
        ServiceListing {
            id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            name: "Fan repair".to_string(),
            category: ServiceCategory::Electrical,
            description: None,
            price: 50_000,
            price_type: PriceType::Fixed,
            images: "/media/home-service.png".to_string(),
            service_area: None,
            latitude: lat,
            longitude: lon,
            service_radius,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_query_radius_bounds_search() {
        let service = listing_at(Some(12.90), Some(77.58), 50.0);
        let three_km_north = 12.90 + 3.0 / KM_PER_DEG_LAT;
        let six_km_north = 12.90 + 6.0 / KM_PER_DEG_LAT;

        let hit = filter_within_radius(vec![service.clone()], three_km_north, 77.58, 5.0);
        assert_eq!(hit.len(), 1);

        // Excluded even though the listing advertises a 50 km service radius
        let miss = filter_within_radius(vec![service], six_km_north, 77.58, 5.0);
        assert!(miss.is_empty());
    }

    #[test]
    fn test_small_service_radius_does_not_exclude() {
        let service = listing_at(Some(12.90), Some(77.58), 1.0);
        let three_km_north = 12.90 + 3.0 / KM_PER_DEG_LAT;

        let hit = filter_within_radius(vec![service], three_km_north, 77.58, 5.0);
        assert_eq!(hit.len(), 1);
    }

    #[test]
    fn test_listings_without_coordinates_are_skipped() {
        let service = listing_at(None, None, 5.0);
        assert!(filter_within_radius(vec![service], 12.90, 77.58, 10_000.0).is_empty());
    }
}
