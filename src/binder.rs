//! Binding config files and environment variables onto flags
//!
//! Precedence, highest first: explicit command-line value, environment
//! variable `<PREFIX>_<FLAG_NAME>`, config file entry, compiled-in default.

use crate::config::{discover_config, load_config_file, ConfigStore};
use crate::error::{ConfigError, Result};
use crate::flags::{FlagSet, ValueOrigin};
use crate::utils::{env_var_name, EnvSource, ProcessEnv};
use std::path::{Path, PathBuf};

/// Merges a config file and the environment into a [`FlagSet`].
///
/// Holds no mutable state; one instance can serve any number of binds, each
/// against its own flag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBinder {
    env_prefix: String,
    default_config_name: String,
}

impl ConfigBinder {
    /// Create a binder.
    ///
    /// `default_config_name` is the file stem searched for when no explicit
    /// path is given, e.g. `.mycli` matches `.mycli.toml` or `.mycli.yaml`.
    pub fn new(env_prefix: impl Into<String>, default_config_name: impl Into<String>) -> Self {
        Self { env_prefix: env_prefix.into(), default_config_name: default_config_name.into() }
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    pub fn default_config_name(&self) -> &str {
        &self.default_config_name
    }

    /// Environment variable consulted for `flag_name`.
    pub fn env_var_for(&self, flag_name: &str) -> String {
        env_var_name(&self.env_prefix, flag_name)
    }

    /// Fill every flag not set on the command line from the process
    /// environment or the config file.
    ///
    /// An empty or absent `explicit_config_path` searches the current
    /// directory, then the home directory. A missing file is not an error.
    pub fn bind(&self, flags: &mut FlagSet, explicit_config_path: Option<&Path>) -> Result<()> {
        self.bind_with_env(flags, explicit_config_path, &ProcessEnv)
    }

    /// Same as [`bind`](Self::bind), reading variables from `env`.
    pub fn bind_with_env<E: EnvSource + ?Sized>(
        &self,
        flags: &mut FlagSet,
        explicit_config_path: Option<&Path>,
        env: &E,
    ) -> Result<()> {
        let store = self.load_store(explicit_config_path)?;

        for flag in flags.iter_mut() {
            let env_name = self.env_var_for(flag.name());
            let env_value = env.var(&env_name);

            if flag.explicitly_set() {
                if env_value.is_some() || store.contains(flag.name()) {
                    tracing::debug!("Keeping --{} from command line", flag.name());
                }
                continue;
            }

            let (raw, origin, source_desc) = if let Some(value) = env_value {
                (value, ValueOrigin::Environment, format!("environment variable {}", env_name))
            } else if let Some(value) = store.get(flag.name()) {
                let source_desc = match store.source() {
                    Some(path) => format!("config file {}", path.display()),
                    None => "config file".to_string(),
                };
                (value.to_string(), ValueOrigin::ConfigFile, source_desc)
            } else {
                continue;
            };

            // A value that does not fit the flag leaves the current value in place.
            match flag.kind().normalize(&raw) {
                Ok(value) => {
                    tracing::debug!("Setting --{}={} from {}", flag.name(), value, origin);
                    flag.apply(value, origin);
                }
                Err(expected) => tracing::warn!(
                    "Ignoring invalid value '{}' for --{} from {}: expected {}",
                    raw,
                    flag.name(),
                    source_desc,
                    expected
                ),
            }
        }

        Ok(())
    }

    /// Resolve and parse the config file without touching any flags.
    pub fn load_store(&self, explicit_config_path: Option<&Path>) -> Result<ConfigStore> {
        self.load_store_with_home(explicit_config_path, dirs::home_dir)
    }

    /// `home` is only called when there is no explicit path to load.
    fn load_store_with_home<H>(
        &self,
        explicit_config_path: Option<&Path>,
        home: H,
    ) -> Result<ConfigStore>
    where
        H: FnOnce() -> Option<PathBuf>,
    {
        if let Some(path) = explicit_config_path.filter(|p| !p.as_os_str().is_empty()) {
            return load_config_file(path);
        }

        let search_dirs = search_dirs_from(home())?;
        match discover_config(&self.default_config_name, &search_dirs) {
            Some(path) => {
                tracing::debug!("Using config file {}", path.display());
                load_config_file(&path)
            }
            None => {
                tracing::debug!("No {} config found in {:?}", self.default_config_name, search_dirs);
                Ok(ConfigStore::empty())
            }
        }
    }
}

/// Directories searched for the default config file, in order.
fn search_dirs_from(home: Option<PathBuf>) -> Result<Vec<PathBuf>> {
    let home = home.ok_or(ConfigError::EnvironmentFailure)?;
    Ok(vec![PathBuf::from("."), home])
}
