//! Config file loading
//!
//! Locates a config file (explicit path, or a named file in the current and
//! home directories) and flattens it into a [`ConfigStore`].

pub mod loader;
pub mod store;

pub use loader::{discover_config, load_config_file, ConfigFormat, SUPPORTED_EXTENSIONS};
pub use store::{ConfigStore, ConfigValue};
