use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

pub type PropertyId = i64;

/// Per-property like status, keyed by property id
pub type FavoritesMap = HashMap<PropertyId, FavoriteEntry>;

/// Image attached to a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyImage {
    pub images: String,
}

/// Core property data model, as served by `main/properties/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub number_of_bedrooms: Option<u32>,
    #[serde(default)]
    pub number_of_bathrooms: Option<u32>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
}

/// Authenticated user, from `core/user/me/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub username: String,
}

/// A favorite record for one property. Only the id is consumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteRecord {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FavoriteEntry {
    pub liked: bool,
    #[serde(rename = "favId")]
    pub fav_id: Option<String>,
}

impl FavoriteEntry {
    pub fn from_records(records: &[FavoriteRecord]) -> Self {
        Self {
            liked: !records.is_empty(),
            fav_id: records.first().map(|r| r.id.clone()),
        }
    }
}

/// Everything the main screen needs after launch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BootstrapResult {
    /// Verified listings, in server order
    pub properties: Vec<Property>,
    /// Shuffled copy of `properties`
    pub explore: Vec<Property>,
    #[serde(rename = "typeTabs")]
    pub type_tabs: Vec<String>,
    pub username: String,
    #[serde(rename = "favoritesMap")]
    pub favorites_map: FavoritesMap,
}

impl BootstrapResult {
    /// The fallback published when bootstrap fails
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(n.as_f64()),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        // Labels such as "Price on request" carry no price
        Some(NumberOrString::Text(s)) => match s.trim().parse::<f64>() {
            Ok(price) => Ok(Some(price)),
            Err(_) => {
                warn!("Ignoring unparsable price {:?}", s);
                Ok(None)
            }
        },
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n.to_string()),
        NumberOrString::Text(s) => Ok(s),
    }
}
