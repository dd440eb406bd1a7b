//! Flag descriptors the binder fills in
//!
//! A [`FlagSet`] is an ordered list of name/value/explicit triples owned by the
//! host application. Values are kept in their command-line string form; typed
//! access goes through [`FlagSet::get`].

mod clap_adapter;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Value type a flag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    Text,
    Bool,
    Int,
    Uint,
    Float,
    List,
}

impl FlagKind {
    /// Check a raw value against this kind and return its canonical form.
    ///
    /// On failure the error names what was expected.
    pub fn normalize(self, raw: &str) -> Result<String, &'static str> {
        let trimmed = raw.trim();
        match self {
            FlagKind::Text | FlagKind::List => Ok(raw.to_string()),
            FlagKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok("true".to_string()),
                "false" | "0" | "no" | "off" => Ok("false".to_string()),
                _ => Err("a boolean"),
            },
            FlagKind::Int => trimmed.parse::<i64>().map(|v| v.to_string()).map_err(|_| "an integer"),
            FlagKind::Uint => {
                trimmed.parse::<u64>().map(|v| v.to_string()).map_err(|_| "an unsigned integer")
            }
            FlagKind::Float => trimmed.parse::<f64>().map(|v| v.to_string()).map_err(|_| "a number"),
        }
    }
}

/// Where a flag's current value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueOrigin {
    Default,
    ConfigFile,
    Environment,
    CommandLine,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueOrigin::Default => "default",
            ValueOrigin::ConfigFile => "config file",
            ValueOrigin::Environment => "environment",
            ValueOrigin::CommandLine => "command line",
        };
        f.write_str(label)
    }
}

/// A single command-line flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flag {
    name: String,
    kind: FlagKind,
    value: String,
    default: String,
    explicitly_set: bool,
    origin: ValueOrigin,
}

impl Flag {
    /// Declare a flag holding its compiled-in default.
    pub fn new(name: impl Into<String>, kind: FlagKind, default: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            kind,
            value: default.clone(),
            default,
            explicitly_set: false,
            origin: ValueOrigin::Default,
        }
    }

    pub fn text(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, FlagKind::Text, default)
    }

    pub fn int(name: impl Into<String>, default: i64) -> Self {
        Self::new(name, FlagKind::Int, default.to_string())
    }

    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, FlagKind::Bool, default.to_string())
    }

    /// Mark the flag as supplied on the command line with `value`.
    pub fn explicit(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.explicitly_set = true;
        self.origin = ValueOrigin::CommandLine;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// True only when the user supplied the flag; binding never sets this.
    pub fn explicitly_set(&self) -> bool {
        self.explicitly_set
    }

    pub fn origin(&self) -> ValueOrigin {
        self.origin
    }

    pub(crate) fn apply(&mut self, value: String, origin: ValueOrigin) {
        self.value = value;
        self.origin = origin;
    }
}

/// Ordered collection of flags, looked up by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag, replacing any earlier flag with the same name.
    pub fn add(&mut self, flag: Flag) {
        match self.flags.iter_mut().find(|f| f.name == flag.name) {
            Some(existing) => *existing = flag,
            None => self.flags.push(flag),
        }
    }

    pub fn with(mut self, flag: Flag) -> Self {
        self.add(flag);
        self
    }

    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.flag(name).map(Flag::value)
    }

    /// Drop a flag so binding never touches it.
    pub fn remove(&mut self, name: &str) -> Option<Flag> {
        let index = self.flags.iter().position(|f| f.name == name)?;
        Some(self.flags.remove(index))
    }

    /// Parse a flag's value as `T`.
    ///
    /// Returns `None` when the flag is unknown or its value does not parse.
    pub fn get<T: FromStr>(&self, name: &str) -> Option<T> {
        self.value(name)?.trim().parse().ok()
    }

    /// Split a comma-separated value into trimmed, non-empty parts.
    pub fn get_list(&self, name: &str) -> Option<Vec<String>> {
        self.value(name).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| part.to_string())
                .collect()
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flag> {
        self.flags.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut set = FlagSet::new();
        for flag in iter {
            set.add(flag);
        }
        set
    }
}
