pub mod file;
pub mod memory;
pub mod traits;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

/// Key the access token is persisted under
pub const ACCESS_TOKEN_KEY: &str = "access_token";
