use crate::api::traits::ListingApi;
use crate::api::types::ClientOptions;
use crate::models::{FavoriteRecord, Property, PropertyId, UserProfile};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// HTTP implementation of [`ListingApi`]
pub struct ListingClient {
    client: Client,
    base_url: Url,
}

impl ListingClient {
    /// Create a client against the default local API
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        // Url::join drops the last segment unless the base ends in '/'
        let mut base = options.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).with_context(|| format!("Invalid API base URL: {base}"))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for {path}"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        debug!("GET {}", path);

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {path}"))?;

        if !response.status().is_success() {
            warn!("{} returned status: {}", path, response.status());
            anyhow::bail!("Request to {} failed: {}", path, response.status());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode response from {path}"))
    }
}

#[async_trait]
impl ListingApi for ListingClient {
    async fn fetch_current_user(&self, token: &str) -> Result<UserProfile> {
        let path = "core/user/me/";
        let request = self.client.get(self.endpoint(path)?).bearer_auth(token);
        self.get_json(path, request).await
    }

    async fn fetch_properties(&self) -> Result<Vec<Property>> {
        let path = "main/properties/";
        let request = self.client.get(self.endpoint(path)?);
        let properties: Vec<Property> = self.get_json(path, request).await?;
        debug!("Received {} properties", properties.len());
        Ok(properties)
    }

    async fn fetch_favorites(
        &self,
        property_id: PropertyId,
        token: &str,
    ) -> Result<Vec<FavoriteRecord>> {
        let path = format!("main/properties/{property_id}/favorites/");
        let request = self.client.get(self.endpoint(&path)?).bearer_auth(token);
        self.get_json(&path, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ListingClient::with_options(ClientOptions {
            base_url: "https://homes.example.com/api".to_string(),
            ..ClientOptions::default()
        })
        .unwrap();

        assert_eq!(
            client.endpoint("main/properties/").unwrap().as_str(),
            "https://homes.example.com/api/main/properties/"
        );
    }

    #[test]
    fn default_client_targets_local_api() {
        let client = ListingClient::new().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            client.endpoint("main/properties/42/favorites/").unwrap().path(),
            "/api/main/properties/42/favorites/"
        );
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let result = ListingClient::with_options(ClientOptions {
            base_url: "not a url".to_string(),
            ..ClientOptions::default()
        });
        assert!(result.is_err());
    }
}
