//! snakecharmer: one view of configuration across flags, environment and files
//!
//! A [`ConfigBinder`] fills the flags a user did not pass on the command line
//! from environment variables named `<PREFIX>_<FLAG_NAME>` and from a config
//! file (TOML, YAML or JSON), in that order of precedence.
//!
//! ```no_run
//! use snakecharmer::{ConfigBinder, Flag, FlagSet};
//!
//! let binder = ConfigBinder::new("MYCLI", ".mycli");
//! let mut flags = FlagSet::new().with(Flag::int("port", 443)).with(Flag::text("server", ""));
//! binder.bind(&mut flags, None)?;
//! let port: u16 = flags.get("port").unwrap_or(443);
//! # Ok::<(), snakecharmer::ConfigError>(())
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod flags;
pub mod utils;

pub use binder::ConfigBinder;
pub use config::{ConfigStore, ConfigValue};
pub use error::ConfigError;
pub use flags::{Flag, FlagKind, FlagSet, ValueOrigin};
pub use utils::{env_var_name, EnvSource, ProcessEnv};
