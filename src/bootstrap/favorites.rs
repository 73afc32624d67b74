use crate::api::ListingApi;
use crate::models::{FavoriteEntry, FavoritesMap, Property, PropertyId};
use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on each per-property favorites call
pub const DEFAULT_FAVORITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve like status for every verified property.
///
/// No token means guest mode and an empty map. Otherwise every lookup runs
/// concurrently and the map is built once all of them have settled. A failed or
/// timed-out lookup only affects its own entry.
pub async fn resolve_favorites<A>(
    api: &A,
    verified: &[Property],
    token: Option<&str>,
    per_call_timeout: Duration,
) -> FavoritesMap
where
    A: ListingApi + ?Sized,
{
    let Some(token) = token else {
        return FavoritesMap::new();
    };

    let lookups = verified
        .iter()
        .map(|property| resolve_one(api, property.id, token, per_call_timeout));

    let map: FavoritesMap = join_all(lookups).await.into_iter().collect();
    debug!(
        "Resolved favorites for {} properties ({} liked)",
        map.len(),
        map.values().filter(|e| e.liked).count()
    );
    map
}

async fn resolve_one<A>(
    api: &A,
    property_id: PropertyId,
    token: &str,
    per_call_timeout: Duration,
) -> (PropertyId, FavoriteEntry)
where
    A: ListingApi + ?Sized,
{
    let lookup = api.fetch_favorites(property_id, token);
    let entry = match tokio::time::timeout(per_call_timeout, lookup).await {
        Ok(Ok(records)) => FavoriteEntry::from_records(&records),
        Ok(Err(e)) => {
            warn!("Favorites lookup failed for property {}: {:#}", property_id, e);
            FavoriteEntry::default()
        }
        Err(_) => {
            warn!(
                "Favorites lookup for property {} timed out after {:?}",
                property_id, per_call_timeout
            );
            FavoriteEntry::default()
        }
    };
    (property_id, entry)
}
