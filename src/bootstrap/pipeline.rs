use crate::api::ListingApi;
use crate::bootstrap::derive::{derive_explore, derive_type_tabs, filter_verified};
use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::favorites::{resolve_favorites, DEFAULT_FAVORITE_TIMEOUT};
use crate::models::{BootstrapResult, Property};
use crate::state::Handoff;
use crate::storage::{KeyValueStore, ACCESS_TOKEN_KEY};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bootstrap progress. `Complete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BootstrapStage {
    Idle,
    TokenResolved,
    UsernameResolved,
    PropertiesFetched,
    Derived,
    FavoritesResolved,
    Complete,
}

/// What a single run did
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub result: Arc<BootstrapResult>,
    /// Every stage entered, in order, ending with `Complete`
    pub stages: Vec<BootstrapStage>,
    pub fell_back: bool,
    pub finished_at: DateTime<Utc>,
}

/// Launch-time data preparation: token, user, listings, derived lists, favorites.
pub struct BootstrapPipeline<A: ?Sized, S: ?Sized> {
    api: Arc<A>,
    store: Arc<S>,
    rng: StdRng,
    favorite_timeout: Duration,
    stages: Vec<BootstrapStage>,
}

impl<A, S> BootstrapPipeline<A, S>
where
    A: ListingApi + ?Sized,
    S: KeyValueStore + ?Sized,
{
    pub fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self {
            api,
            store,
            rng: StdRng::from_entropy(),
            favorite_timeout: DEFAULT_FAVORITE_TIMEOUT,
            stages: vec![BootstrapStage::Idle],
        }
    }

    /// Bound each per-property favorites call
    pub fn with_favorite_timeout(mut self, timeout: Duration) -> Self {
        self.favorite_timeout = timeout;
        self
    }

    /// Deterministic explore order, for tests
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Run once and hand the result off. Always signals `handoff` exactly once;
    /// on failure the published result is [`BootstrapResult::empty`].
    pub async fn run<H>(mut self, handoff: &H) -> BootstrapReport
    where
        H: Handoff + ?Sized,
    {
        info!("Starting bootstrap");

        let (result, fell_back) = match self.prepare().await {
            Ok(result) => (result, false),
            Err(e) => {
                warn!("Bootstrap failed, continuing with empty data: {}", e);
                (BootstrapResult::empty(), true)
            }
        };
        self.advance(BootstrapStage::Complete);

        let result = Arc::new(result);
        handoff.complete(result.clone());

        BootstrapReport {
            result,
            stages: self.stages,
            fell_back,
            finished_at: Utc::now(),
        }
    }

    async fn prepare(&mut self) -> Result<BootstrapResult, BootstrapError> {
        let token = self.resolve_token().await;
        self.advance(BootstrapStage::TokenResolved);

        let username = match token.as_deref() {
            Some(token) => {
                let username = self.fetch_username(token).await?;
                self.advance(BootstrapStage::UsernameResolved);
                username
            }
            None => String::new(),
        };

        let fetched = self.fetch_properties().await?;
        self.advance(BootstrapStage::PropertiesFetched);

        let properties = filter_verified(&fetched);
        let explore = derive_explore(&properties, &mut self.rng);
        let type_tabs = derive_type_tabs(&properties);
        info!(
            "{} of {} properties verified, {} type tabs",
            properties.len(),
            fetched.len(),
            type_tabs.len()
        );
        self.advance(BootstrapStage::Derived);

        let favorites_map = match token.as_deref() {
            Some(token) => {
                let map = resolve_favorites(
                    self.api.as_ref(),
                    &properties,
                    Some(token),
                    self.favorite_timeout,
                )
                .await;
                self.advance(BootstrapStage::FavoritesResolved);
                map
            }
            None => Default::default(),
        };

        Ok(BootstrapResult {
            properties,
            explore,
            type_tabs,
            username,
            favorites_map,
        })
    }

    /// Stored access token. An unreadable store counts as signed out.
    pub async fn resolve_token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => {
                debug!("No access token stored, running as guest");
                None
            }
            Err(e) => {
                warn!("Could not read access token, running as guest: {:#}", e);
                None
            }
        }
    }

    pub async fn fetch_username(&self, token: &str) -> Result<String, BootstrapError> {
        let profile = self
            .api
            .fetch_current_user(token)
            .await
            .map_err(BootstrapError::IdentityFetch)?;
        debug!("Signed in as {}", profile.username);
        Ok(profile.username)
    }

    pub async fn fetch_properties(&self) -> Result<Vec<Property>, BootstrapError> {
        self.api
            .fetch_properties()
            .await
            .map_err(BootstrapError::PropertyFetch)
    }

    fn advance(&mut self, stage: BootstrapStage) {
        debug!("Bootstrap stage: {:?}", stage);
        self.stages.push(stage);
    }
}
