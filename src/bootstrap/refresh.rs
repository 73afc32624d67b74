use crate::api::ListingApi;
use crate::bootstrap::favorites::resolve_favorites;
use crate::models::{BootstrapResult, FavoritesMap};
use crate::state::AppState;
use crate::storage::{KeyValueStore, ACCESS_TOKEN_KEY};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Re-resolve favorites for the listings already on screen.
///
/// Returns `false` when nothing has been published yet. Listings, explore order
/// and tabs are carried over from the current result. Holds the state writer for
/// the whole fan-out so a concurrent sign-out cannot be overwritten.
pub async fn refresh_favorites<A, S>(
    api: &A,
    store: &S,
    state: &AppState,
    per_call_timeout: Duration,
) -> Result<bool>
where
    A: ListingApi + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let _writer = state.writer().await;
    let Some(current) = state.snapshot() else {
        debug!("No bootstrap result yet, skipping favorites refresh");
        return Ok(false);
    };

    let token = store
        .get(ACCESS_TOKEN_KEY)
        .await
        .context("Failed to read access token")?
        .filter(|t| !t.is_empty());

    let favorites_map = resolve_favorites(
        api,
        &current.properties,
        token.as_deref(),
        per_call_timeout,
    )
    .await;
    info!("Refreshed favorites for {} properties", favorites_map.len());

    state.publish(Arc::new(BootstrapResult {
        favorites_map,
        ..(*current).clone()
    }));
    Ok(true)
}

/// Forget the session: drop the stored token and clear user-specific data.
pub async fn sign_out<S>(store: &S, state: &AppState) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let _writer = state.writer().await;
    store
        .remove(ACCESS_TOKEN_KEY)
        .await
        .context("Failed to clear access token")?;

    if let Some(current) = state.snapshot() {
        state.publish(Arc::new(BootstrapResult {
            username: String::new(),
            favorites_map: FavoritesMap::new(),
            ..(*current).clone()
        }));
    }
    info!("Signed out");
    Ok(())
}
