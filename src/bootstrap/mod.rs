pub mod derive;
pub mod error;
pub mod favorites;
pub mod pipeline;
pub mod refresh;

pub use derive::{derive_explore, derive_type_tabs, filter_verified};
pub use error::BootstrapError;
pub use favorites::{resolve_favorites, DEFAULT_FAVORITE_TIMEOUT};
pub use pipeline::{BootstrapPipeline, BootstrapReport, BootstrapStage};
pub use refresh::{refresh_favorites, sign_out};
