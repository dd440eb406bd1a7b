//! Config file discovery and loading

use super::store::{ConfigStore, ConfigValue};
use crate::error::{ConfigError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions tried, in order, for each search directory.
pub const SUPPORTED_EXTENSIONS: [&str; 7] =
    ["json", "toml", "yaml", "yml", "dotenv", "env", "ini"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
    Dotenv,
    Ini,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "dotenv" | "env" => Some(Self::Dotenv),
            "ini" => Some(Self::Ini),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
            Self::Dotenv => "dotenv",
            Self::Ini => "INI",
        }
    }
}

/// Find `<name>.<ext>` in the given directories; the first directory wins,
/// then the first extension in [`SUPPORTED_EXTENSIONS`] order.
pub fn discover_config(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in search_dirs {
        for ext in SUPPORTED_EXTENSIONS {
            let candidate = dir.join(format!("{}.{}", name, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    None
}

/// Load a config file into a flat store.
///
/// A file that does not exist yields an empty store.
pub fn load_config_file(config_file: &Path) -> Result<ConfigStore> {
    if !config_file.exists() {
        tracing::debug!("Config file {} not found, using empty config", config_file.display());
        return Ok(ConfigStore::empty());
    }

    let Some(format) = ConfigFormat::from_path(config_file) else {
        let extension = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_string();
        return Err(ConfigError::UnsupportedFormat { path: config_file.to_path_buf(), extension });
    };

    let content = match fs::read_to_string(config_file) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigStore::empty()),
        Err(source) => return Err(ConfigError::Read { path: config_file.to_path_buf(), source }),
    };

    let store = parse_config(&content, format, config_file)?;
    tracing::debug!(
        "Loaded {} key(s) from {} config {}",
        store.len(),
        format.name(),
        config_file.display()
    );
    Ok(store)
}

/// Parse config text in the given format.
pub fn parse_config(content: &str, format: ConfigFormat, config_file: &Path) -> Result<ConfigStore> {
    let parse_failure = |message: String| ConfigError::ParseFailure {
        path: config_file.to_path_buf(),
        format: format.name(),
        message,
    };

    let mut store = ConfigStore::from_source(config_file.to_path_buf());
    match format {
        ConfigFormat::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| parse_failure(e.to_string()))?;
            for (key, value) in &table {
                insert_or_skip(&mut store, key, from_toml(value));
            }
        }
        ConfigFormat::Yaml => {
            let raw: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_failure(e.to_string()))?;
            match raw {
                // An empty YAML document parses as null
                serde_yaml::Value::Null => {}
                serde_yaml::Value::Mapping(mapping) => {
                    for (key, value) in &mapping {
                        let Some(key) = key.as_str() else {
                            tracing::debug!("Skipping non-string YAML key {:?}", key);
                            continue;
                        };
                        insert_or_skip(&mut store, key, from_yaml(value));
                    }
                }
                _ => return Err(parse_failure("expected a top-level mapping".to_string())),
            }
        }
        ConfigFormat::Json => {
            let raw: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_failure(e.to_string()))?;
            let serde_json::Value::Object(object) = raw else {
                return Err(parse_failure("expected a top-level object".to_string()));
            };
            for (key, value) in &object {
                insert_or_skip(&mut store, key, from_json(value));
            }
        }
        ConfigFormat::Dotenv => {
            for item in dotenvy::from_read_iter(content.as_bytes()) {
                let (key, value) = item.map_err(|e| parse_failure(e.to_string()))?;
                store.insert(&key, ConfigValue::String(value));
            }
        }
        ConfigFormat::Ini => {
            let ini = ini::Ini::load_from_str(content).map_err(|e| parse_failure(e.to_string()))?;
            for (section, properties) in ini.iter() {
                if let Some(section) = section {
                    tracing::debug!("Skipping nested INI section [{}]", section);
                    continue;
                }
                for (key, value) in properties.iter() {
                    store.insert(key, ConfigValue::String(value.to_string()));
                }
            }
        }
    }

    Ok(store)
}

fn insert_or_skip(store: &mut ConfigStore, key: &str, value: Option<ConfigValue>) {
    match value {
        Some(value) => store.insert(key, value),
        None => tracing::debug!("Skipping nested or null config key '{}'", key),
    }
}

fn from_toml(value: &toml::Value) -> Option<ConfigValue> {
    match value {
        toml::Value::String(s) => Some(ConfigValue::String(s.clone())),
        toml::Value::Integer(i) => Some(ConfigValue::Integer(*i)),
        toml::Value::Float(x) => Some(ConfigValue::Float(*x)),
        toml::Value::Boolean(b) => Some(ConfigValue::Bool(*b)),
        toml::Value::Datetime(dt) => Some(ConfigValue::String(dt.to_string())),
        toml::Value::Array(items) => {
            items.iter().map(from_toml).collect::<Option<Vec<_>>>().map(ConfigValue::List)
        }
        toml::Value::Table(_) => None,
    }
}

fn from_yaml(value: &serde_yaml::Value) -> Option<ConfigValue> {
    match value {
        serde_yaml::Value::Null | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Bool(b) => Some(ConfigValue::Bool(*b)),
        serde_yaml::Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => ConfigValue::Integer(i),
            (None, Some(x)) if n.is_f64() => ConfigValue::Float(x),
            _ => ConfigValue::String(n.to_string()),
        }),
        serde_yaml::Value::String(s) => Some(ConfigValue::String(s.clone())),
        serde_yaml::Value::Sequence(items) => {
            items.iter().map(from_yaml).collect::<Option<Vec<_>>>().map(ConfigValue::List)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(&tagged.value),
    }
}

fn from_json(value: &serde_json::Value) -> Option<ConfigValue> {
    match value {
        serde_json::Value::Null | serde_json::Value::Object(_) => None,
        serde_json::Value::Bool(b) => Some(ConfigValue::Bool(*b)),
        serde_json::Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => ConfigValue::Integer(i),
            (None, Some(x)) if n.is_f64() => ConfigValue::Float(x),
            _ => ConfigValue::String(n.to_string()),
        }),
        serde_json::Value::String(s) => Some(ConfigValue::String(s.clone())),
        serde_json::Value::Array(items) => {
            items.iter().map(from_json).collect::<Option<Vec<_>>>().map(ConfigValue::List)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_empty_store() {
        let tmp = TempDir::new().expect("tmp");
        let store = load_config_file(&tmp.path().join("absent.toml")).expect("store");
        assert!(store.is_empty());
        assert!(store.source().is_none());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(".sctest.toml");
        fs::write(&path, "port = 1337\nserver = \"example.com\"\n").expect("write");

        let store = load_config_file(&path).expect("store");
        assert_eq!(store.get("port"), Some(&ConfigValue::Integer(1337)));
        assert_eq!(store.get("server"), Some(&ConfigValue::String("example.com".to_string())));
        assert_eq!(store.source(), Some(path.as_path()));
    }

    #[test]
    fn test_load_yaml_and_json_config() {
        let tmp = TempDir::new().expect("tmp");
        let yaml = tmp.path().join("app.yml");
        fs::write(&yaml, "verbose: true\ntags:\n  - a\n  - b\n").expect("write");
        let json = tmp.path().join("app.json");
        fs::write(&json, "{\"ratio\": 0.25, \"name\": \"svc\"}").expect("write");

        let store = load_config_file(&yaml).expect("yaml");
        assert_eq!(store.get("verbose"), Some(&ConfigValue::Bool(true)));
        assert_eq!(store.get("tags").map(ToString::to_string).as_deref(), Some("a,b"));

        let store = load_config_file(&json).expect("json");
        assert_eq!(store.get("ratio"), Some(&ConfigValue::Float(0.25)));
        assert_eq!(store.get("name"), Some(&ConfigValue::String("svc".to_string())));
    }

    #[test]
    fn test_nested_tables_are_skipped() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.toml");
        fs::write(&path, "port = 1\n[server]\nhost = \"x\"\n").expect("write");

        let store = load_config_file(&path).expect("store");
        assert!(store.contains("port"));
        assert!(!store.contains("server"));
        assert!(!store.contains("host"));
    }

    #[test]
    fn test_empty_yaml_is_empty_store() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.yaml");
        fs::write(&path, "").expect("write");

        let store = load_config_file(&path).expect("store");
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_parse_failure() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "port = = 3\n").expect("write");

        let err = load_config_file(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::ParseFailure { format: "TOML", .. }));
    }

    #[test]
    fn test_json_array_root_is_parse_failure() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.json");
        fs::write(&path, "[1, 2]").expect("write");

        let err = load_config_file(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::ParseFailure { format: "JSON", .. }));
    }

    #[test]
    fn test_load_ini_general_section() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.ini");
        fs::write(&path, "port=8080\nServer = example.com\n[db]\nhost = x\n").expect("write");

        let store = load_config_file(&path).expect("store");
        assert_eq!(store.get("port"), Some(&ConfigValue::String("8080".to_string())));
        assert_eq!(store.get("server"), Some(&ConfigValue::String("example.com".to_string())));
        assert!(!store.contains("host"));
        assert!(!store.contains("db"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_dotenv_config() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(".app.env");
        fs::write(&path, "# defaults\nPORT=8080\nSERVER=\"dark green\"\n").expect("write");

        let store = load_config_file(&path).expect("store");
        assert_eq!(store.get("port"), Some(&ConfigValue::String("8080".to_string())));
        assert_eq!(store.get("server"), Some(&ConfigValue::String("dark green".to_string())));
    }

    #[test]
    fn test_dotenv_extension_is_accepted() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.dotenv");
        fs::write(&path, "verbose=true\n").expect("write");

        let store = load_config_file(&path).expect("store");
        assert_eq!(store.get("verbose"), Some(&ConfigValue::String("true".to_string())));
    }

    #[test]
    fn test_malformed_dotenv_is_parse_failure() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.env");
        fs::write(&path, "port 8080\n").expect("write");

        let err = load_config_file(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::ParseFailure { format: "dotenv", .. }));
    }

    #[test]
    fn test_malformed_ini_is_parse_failure() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.ini");
        fs::write(&path, "[server\nport=1\n").expect("write");

        let err = load_config_file(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::ParseFailure { format: "INI", .. }));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.xml");
        fs::write(&path, "<port>1</port>\n").expect("write");

        let err = load_config_file(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::UnsupportedFormat { ref extension, .. } if extension == "xml"));
    }

    #[test]
    fn test_discover_prefers_earlier_directory() {
        let first = TempDir::new().expect("tmp");
        let second = TempDir::new().expect("tmp");
        fs::write(second.path().join(".app.toml"), "a = 1\n").expect("write");
        fs::write(first.path().join(".app.yaml"), "a: 2\n").expect("write");

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(discover_config(".app", &dirs), Some(first.path().join(".app.yaml")));
    }

    #[test]
    fn test_discover_extension_order_within_directory() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("app.toml"), "a = 1\n").expect("write");
        fs::write(tmp.path().join("app.json"), "{}").expect("write");

        let dirs = vec![tmp.path().to_path_buf()];
        assert_eq!(discover_config("app", &dirs), Some(tmp.path().join("app.json")));
    }

    #[test]
    fn test_discover_falls_back_to_dotenv_then_ini() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".app.ini"), "a=1\n").expect("write");
        let dirs = vec![tmp.path().to_path_buf()];
        assert_eq!(discover_config(".app", &dirs), Some(tmp.path().join(".app.ini")));

        fs::write(tmp.path().join(".app.env"), "A=2\n").expect("write");
        assert_eq!(discover_config(".app", &dirs), Some(tmp.path().join(".app.env")));

        fs::write(tmp.path().join(".app.yml"), "a: 3\n").expect("write");
        assert_eq!(discover_config(".app", &dirs), Some(tmp.path().join(".app.yml")));
    }

    #[test]
    fn test_discover_returns_none_when_absent() {
        let tmp = TempDir::new().expect("tmp");
        assert_eq!(discover_config("app", &[tmp.path().to_path_buf()]), None);
    }
}
