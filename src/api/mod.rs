pub mod client;
pub mod traits;
pub mod types;

pub use client::ListingClient;
pub use traits::ListingApi;
pub use types::ClientOptions;
