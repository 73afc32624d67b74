pub mod api;
pub mod bootstrap;
pub mod config;
pub mod models;
pub mod state;
pub mod storage;

pub use api::{ListingApi, ListingClient};
pub use bootstrap::{BootstrapPipeline, BootstrapReport, BootstrapStage};
pub use crate::config::Config;
pub use models::{BootstrapResult, FavoriteEntry, FavoritesMap, Property};
pub use state::{AppState, Handoff};
