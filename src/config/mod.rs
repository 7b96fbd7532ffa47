//! Configuration: types, TOML loading/validation, and the shared store.

mod loader;
mod store;
mod types;

pub use loader::{ConfigError, CONFIG_DIRECTORY_ENV, CONFIG_FILE_NAME};
pub use store::ConfigStore;
pub use types::{Config, Tokens, Urls};
