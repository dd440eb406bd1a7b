//! Flat key-value view of a parsed config file

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A scalar (or list of scalars) read from a config file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    List(Vec<ConfigValue>),
}

impl fmt::Display for ConfigValue {
    /// Render the value the way a flag expects to receive it on the command line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&rendered.join(","))
            }
        }
    }
}

/// Config values keyed by lower-cased top-level key.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    values: BTreeMap<String, ConfigValue>,
    source: Option<PathBuf>,
}

impl ConfigStore {
    /// An empty store, used when no config file exists.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_source(source: PathBuf) -> Self {
        Self { values: BTreeMap::new(), source: Some(source) }
    }

    /// Insert a value; the key is matched case-insensitively afterwards.
    pub fn insert(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_lowercase(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(&key.to_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Path of the file this store was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
