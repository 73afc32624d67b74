use crate::models::{FavoriteRecord, Property, PropertyId, UserProfile};
use anyhow::Result;
use async_trait::async_trait;

/// Remote listing service consumed during bootstrap
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// `GET core/user/me/`, bearer-authenticated
    async fn fetch_current_user(&self, token: &str) -> Result<UserProfile>;

    /// `GET main/properties/`, no auth
    async fn fetch_properties(&self) -> Result<Vec<Property>>;

    /// `GET main/properties/{id}/favorites/`, bearer-authenticated
    async fn fetch_favorites(
        &self,
        property_id: PropertyId,
        token: &str,
    ) -> Result<Vec<FavoriteRecord>>;
}
