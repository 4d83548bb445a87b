use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{Context, Result};
use toml::Value;
use log::{debug, info};
use crate::queue::QueueConfig;

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Configuration manager
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    /// Create a new ConfigManager from a Configuration (primarily for testing)
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load configuration using discovery hierarchy
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using empty configuration");
        Ok(Self::from_config(Configuration::new()))
    }

    /// Load configuration from explicit file path
    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        debug!("Loading configuration from file: {}", path.display());

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Successfully loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    /// Path of the file this configuration came from, if any
    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Get value from configuration with section fallback
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        // Priority: selected_section -> specified section -> base
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get("base").and_then(|s| s.get(key))
    }

    /// Select configuration section for --config-name
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    /// Get a value parsed into any `FromStr` type
    pub fn get_parsed<T>(&self, section: &str, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_value(section, key) {
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|e| anyhow::anyhow!("Invalid value for {}.{}: {} ({})", section, key, value, e)),
            None => Ok(None),
        }
    }

    /// Get log level value with type conversion
    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    /// Get path value with type conversion
    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Get queue and channel configuration from config file
    pub fn get_queue_config(&self) -> Result<QueueConfig> {
        let mut config = QueueConfig::default();

        if let Some(threshold) = self.get_parsed::<i32>("queue", "high-threshold")? {
            config.high_threshold = threshold;
        }

        if let Some(max_payload) = self.get_parsed::<usize>("queue", "max-payload")? {
            config.max_payload = max_payload;
        }

        if let Some(max_text) = self.get_parsed::<usize>("queue", "max-text")? {
            config.max_text = max_text;
        }

        if let Some(max_command) = self.get_parsed::<usize>("queue", "max-command")? {
            config.max_command = max_command;
        }

        if let Some(status_buffer) = self.get_parsed::<usize>("queue", "status-buffer")? {
            config.status_buffer = status_buffer;
        }

        if let Some(channel_name) = self.get_value("queue", "channel-name") {
            config.channel_name = channel_name.clone();
        }

        config.validate()
            .with_context(|| "Queue configuration validation failed")?;

        Ok(config)
    }
}

/// Discover configuration files in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Environment variable $PMQ_CONFIG
    if let Ok(env_path) = env::var("PMQ_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pmq").join("config.toml"));
    }

    // 3. Home directory
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".pmq.toml"));
    }

    // 4. Project local
    paths.push(PathBuf::from("./.pmq.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML content to string-based configuration
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = content.parse()
        .context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, String::new(), &mut config);

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Recursively flatten TOML tables into section.subsection format
fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    for (key, value) in table {
        let section_name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Table(subtable) => {
                if subtable.values().all(|v| !matches!(v, Value::Table(_))) {
                    // Leaf table: a configuration section
                    let section_map = subtable
                        .iter()
                        .map(|(subkey, subvalue)| (subkey.clone(), toml_value_to_string(subvalue)))
                        .collect();
                    config.insert(section_name, section_map);
                } else {
                    flatten_toml_table(subtable, section_name, config);
                }
            }
            _ => {
                // Top-level key outside any table
                let mut section_map = HashMap::new();
                section_map.insert("value".to_string(), toml_value_to_string(value));
                config.insert(section_name, section_map);
            }
        }
    }
}

/// Convert TOML Value to string representation
fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Array(_) | Value::Table(_) | Value::Datetime(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_toml_value_to_string_conversion() {
        assert_eq!(toml_value_to_string(&Value::String("test".to_string())), "test");
        assert_eq!(toml_value_to_string(&Value::Integer(-42)), "-42");
        assert_eq!(toml_value_to_string(&Value::Float(2.5)), "2.5");
        assert_eq!(toml_value_to_string(&Value::Boolean(true)), "true");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
[base]
log-format = "json"
console-level = "debug"

[queue]
high-threshold = 7
channel-name = "ipc"
"#;

        let config = parse_toml_config(toml_content).unwrap();

        assert_eq!(config.get("base").unwrap().get("log-format").unwrap(), "json");
        assert_eq!(config.get("base").unwrap().get("console-level").unwrap(), "debug");
        assert_eq!(config.get("queue").unwrap().get("high-threshold").unwrap(), "7");
        assert_eq!(config.get("queue").unwrap().get("channel-name").unwrap(), "ipc");
    }

    #[test]
    fn test_config_manager_section_fallback_and_selection() {
        let mut config = Configuration::new();

        let mut base_section = HashMap::new();
        base_section.insert("log-format".to_string(), "text".to_string());
        base_section.insert("high-threshold".to_string(), "3".to_string());
        config.insert("base".to_string(), base_section);

        let mut queue_section = HashMap::new();
        queue_section.insert("high-threshold".to_string(), "8".to_string());
        config.insert("queue".to_string(), queue_section);

        let mut urgent_section = HashMap::new();
        urgent_section.insert("high-threshold".to_string(), "1".to_string());
        config.insert("urgent".to_string(), urgent_section);

        let mut manager = ConfigManager::from_config(config);

        assert_eq!(manager.get_value("queue", "log-format").unwrap(), "text");
        assert_eq!(manager.get_value("queue", "high-threshold").unwrap(), "8");
        assert!(manager.get_value("queue", "missing").is_none());

        manager.select_section("urgent".to_string());
        assert_eq!(manager.get_value("queue", "high-threshold").unwrap(), "1");
    }

    #[test]
    fn test_config_manager_type_conversion() {
        let mut config = Configuration::new();

        let mut base_section = HashMap::new();
        base_section.insert("console-level".to_string(), "info".to_string());
        base_section.insert("invalid-level".to_string(), "loud".to_string());
        base_section.insert("log-file".to_string(), "/tmp/pmq.log".to_string());
        base_section.insert("number".to_string(), "-12".to_string());
        config.insert("base".to_string(), base_section);

        let manager = ConfigManager::from_config(config);

        assert_eq!(manager.get_log_level("base", "console-level").unwrap(), Some(log::LevelFilter::Info));
        assert!(manager.get_log_level("base", "invalid-level").is_err());

        assert_eq!(manager.get_path("base", "log-file").unwrap(), PathBuf::from("/tmp/pmq.log"));

        assert_eq!(manager.get_parsed::<i32>("base", "number").unwrap(), Some(-12));
        assert!(manager.get_parsed::<usize>("base", "number").is_err());
        assert!(manager.get_parsed::<i32>("base", "missing").unwrap().is_none());
    }

    #[test]
    fn test_config_file_loading() {
        let toml_content = r#"
[base]
log-format = "json"

[queue]
max-text = 32
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, toml_content).unwrap();

        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(manager.get_value("base", "log-format").unwrap(), "json");
        assert_eq!(manager.get_value("queue", "max-text").unwrap(), "32");
        assert_eq!(manager.config_file_path().unwrap(), temp_file.path());
    }

    #[test]
    fn test_queue_config_default() {
        let manager = ConfigManager::from_config(Configuration::new());
        assert_eq!(manager.get_queue_config().unwrap(), QueueConfig::default());
    }

    #[test]
    fn test_queue_config_from_toml() {
        let toml_content = r#"
[queue]
high-threshold = 10
max-payload = 200
max-text = 100
max-command = 256
status-buffer = 1024
channel-name = "ipc"
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, toml_content).unwrap();

        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        let queue_config = manager.get_queue_config().unwrap();

        assert_eq!(queue_config.high_threshold, 10);
        assert_eq!(queue_config.max_payload, 200);
        assert_eq!(queue_config.max_text, 100);
        assert_eq!(queue_config.max_command, 256);
        assert_eq!(queue_config.status_buffer, 1024);
        assert_eq!(queue_config.channel_name, "ipc");
    }

    #[test]
    fn test_queue_config_invalid_values() {
        let temp_file = NamedTempFile::new().unwrap();

        fs::write(&temp_file, "[queue]\nhigh-threshold = \"high\"\n").unwrap();
        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        assert!(manager.get_queue_config().is_err());

        fs::write(&temp_file, "[queue]\nmax-text = 300\n").unwrap();
        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        assert!(manager.get_queue_config().is_err());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "[queue\nbroken").unwrap();
        assert!(ConfigManager::load_from_file(temp_file.path().to_path_buf()).is_err());
    }
}
