//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/shctl/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use sortinghat_api_rs::client::{SortingHatClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use sortinghat_search_rs::controller::{INFINITE_PAGE_SIZE, TABLE_PAGE_SIZE};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Keys accepted by `config set`.
const SETTABLE_KEYS: &[&str] = &[
    "endpoint",
    "timeout_secs",
    "pagination.table_page_size",
    "pagination.infinite_page_size",
];

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    #[serde(default = "default_version")]
    pub version: u32,

    /// GraphQL endpoint of the SortingHat server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page sizes.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Pagination configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Entries per page for single-page searches.
    #[serde(default = "default_table_page_size")]
    pub table_page_size: u32,

    /// Entries per page when fetching everything.
    #[serde(default = "default_infinite_page_size")]
    pub infinite_page_size: u32,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_table_page_size() -> u32 {
    TABLE_PAGE_SIZE
}

fn default_infinite_page_size() -> u32 {
    INFINITE_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pagination: PaginationConfig::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            table_page_size: TABLE_PAGE_SIZE,
            infinite_page_size: INFINITE_PAGE_SIZE,
        }
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/shctl/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("SHCTL_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("shctl"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("shctl"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("SHCTL_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    Ok(get_config_dir()?.join("config.toml"))
}

/// Loads the configuration from disk, or the defaults if no file exists.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Brings an older config up to the current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        tracing::warn!(
            version = config.version,
            supported = CONFIG_VERSION,
            "config file is newer than this shctl"
        );
    }
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<PathBuf> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(path)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());
        println!("  endpoint: {}", config.endpoint);
        println!("  timeout_secs: {}", config.timeout_secs);
        println!("\n[pagination]");
        println!("  table_page_size: {}", config.pagination.table_page_size);
        println!("  infinite_page_size: {}", config.pagination.infinite_page_size);
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies `key = value` to `config`, validating the value.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "endpoint" => {
            SortingHatClient::new(value)
                .map_err(|e| CommandError::Config(format!("Invalid endpoint '{}': {}", value, e)))?;
            config.endpoint = value.to_string();
        }
        "timeout_secs" => {
            config.timeout_secs = parse_positive(key, value)?;
        }
        "pagination.table_page_size" => {
            config.pagination.table_page_size = parse_positive(key, value)?;
        }
        "pagination.infinite_page_size" => {
            config.pagination.infinite_page_size = parse_positive(key, value)?;
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                SETTABLE_KEYS.join(", ")
            )));
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    apply_setting(&mut config, &opts.key, &opts.value)?;
    let path = save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a strictly positive integer setting.
fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(CommandError::Config(format!(
            "Invalid value '{}' for {}: expected a positive integer",
            value, key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Points SHCTL_CONFIG at a temp file for the duration of `f`.
    fn with_config_path<F: FnOnce(&std::path::Path)>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let original = env::var("SHCTL_CONFIG").ok();
        env::set_var("SHCTL_CONFIG", &config_path);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&config_path)));

        match original {
            Some(val) => env::set_var("SHCTL_CONFIG", val),
            None => env::remove_var("SHCTL_CONFIG"),
        }
        if let Err(panic) = result {
            std::panic::resume_unwind(panic);
        }
    }

    fn quiet_ctx() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            endpoint_override: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.endpoint, "http://localhost:8000/api/");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.pagination.table_page_size, 10);
        assert_eq!(config.pagination.infinite_page_size, 50);
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialization_partial() {
        let toml_str = r#"
endpoint = "https://sortinghat.example.com/api/"

[pagination]
infinite_page_size = 100
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint, "https://sortinghat.example.com/api/");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.pagination.table_page_size, 10);
        assert_eq!(config.pagination.infinite_page_size, 100);
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("endpoint = \"http://localhost:8000/api/\""));
        assert!(toml_str.contains("[pagination]"));
        assert!(toml_str.contains("table_page_size = 10"));
    }

    #[test]
    fn test_migrate_config_future_version() {
        let config: Config = toml::from_str("version = 999").unwrap();
        assert_eq!(config.version, 999);
        assert_eq!(migrate_config(config).unwrap().version, CONFIG_VERSION);
    }

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();
        apply_setting(&mut config, "timeout_secs", "5").unwrap();
        apply_setting(&mut config, "pagination.table_page_size", "25").unwrap();
        apply_setting(&mut config, "endpoint", "https://sh.example.org/api/").unwrap();

        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.pagination.table_page_size, 25);
        assert_eq!(config.endpoint, "https://sh.example.org/api/");
    }

    #[test]
    fn test_apply_setting_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "timeout_secs", "0").is_err());
        assert!(apply_setting(&mut config, "pagination.infinite_page_size", "-3").is_err());
        assert!(apply_setting(&mut config, "endpoint", "not a url").is_err());
        assert!(apply_setting(&mut config, "token", "abc").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_config_path_override() {
        with_config_path(|path| {
            assert_eq!(get_config_path().unwrap(), path);
        });
    }

    #[test]
    #[serial]
    fn test_xdg_config_home() {
        let temp_dir = TempDir::new().unwrap();
        let original_config = env::var("SHCTL_CONFIG").ok();
        let original_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::remove_var("SHCTL_CONFIG");
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());

        let path = get_config_path();

        match original_xdg {
            Some(val) => env::set_var("XDG_CONFIG_HOME", val),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        if let Some(val) = original_config {
            env::set_var("SHCTL_CONFIG", val);
        }

        assert_eq!(
            path.unwrap(),
            temp_dir.path().join("shctl").join("config.toml")
        );
    }

    #[test]
    #[serial]
    fn test_load_missing_file_gives_defaults() {
        with_config_path(|path| {
            assert!(!path.exists());
            assert_eq!(load_config().unwrap(), Config::default());
        });
    }

    #[test]
    #[serial]
    fn test_set_then_load() {
        with_config_path(|path| {
            let opts = ConfigSetOptions {
                key: "pagination.infinite_page_size".to_string(),
                value: "200".to_string(),
            };
            execute_set(&quiet_ctx(), &opts).unwrap();

            assert!(path.exists());
            let config = load_config().unwrap();
            assert_eq!(config.pagination.infinite_page_size, 200);
            assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        });
    }

    #[test]
    #[serial]
    fn test_load_invalid_toml() {
        with_config_path(|path| {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "timeout_secs = \"soon\"").unwrap();

            let err = load_config().unwrap_err();
            assert!(matches!(err, CommandError::Config(_)));
        });
    }
}
