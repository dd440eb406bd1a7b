//! Environment variable naming and lookup

use std::collections::HashMap;
use std::env;

/// Derive the environment variable bound to a flag.
///
/// The flag name is upper-cased with every `-` replaced by `_`, then joined to
/// the upper-cased prefix with `_`. An empty prefix yields just the converted
/// flag name, so `("STING", "favorite-color")` maps to `STING_FAVORITE_COLOR`
/// and `("", "port")` maps to `PORT`. The prefix is used as given, so `APP_`
/// yields `APP__PORT`.
pub fn env_var_name(prefix: &str, flag_name: &str) -> String {
    let suffix = flag_name.replace('-', "_").to_ascii_uppercase();
    if prefix.is_empty() {
        suffix
    } else {
        format!("{}_{}", prefix.to_ascii_uppercase(), suffix)
    }
}

/// A source of environment variables.
///
/// Implementations return `None` for variables that are unset or empty.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        match env::var(name) {
            Ok(val) if val.is_empty() => None,
            Ok(val) => Some(val),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                tracing::warn!("Ignoring environment variable {} with non-unicode value", name);
                None
            }
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).filter(|val| !val.is_empty()).cloned()
    }
}
