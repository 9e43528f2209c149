//! Store configuration.
//!
//! Loaded from `actprep.toml` in the working directory or
//! `~/.config/actprep/config.toml`, with environment-variable overrides.
//!
//! Note: Custom Debug impl masks the API key to prevent accidental
//! exposure in logs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Connection settings for the REST store.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://project.supabase.co`.
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `actprep.toml` in the current directory
/// 2. `~/.config/actprep/config.toml`
///
/// Environment variable overrides: `ACTPREP_STORE_URL`, `ACTPREP_STORE_KEY`.
pub fn load_config() -> Result<StoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("actprep.toml");
        if local.exists() {
            Some(local)
        } else if let Some(global) = config_dir().map(|d| d.join("config.toml")) {
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StoreConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StoreConfig {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        },
    };

    // Apply env var overrides, then resolve ${VAR} references.
    if let Ok(url) = std::env::var("ACTPREP_STORE_URL") {
        config.base_url = url;
    }
    if let Ok(key) = std::env::var("ACTPREP_STORE_KEY") {
        config.api_key = key;
    }
    config.base_url = resolve_env_vars(&config.base_url);
    config.api_key = resolve_env_vars(&config.api_key);

    if config.base_url.is_empty() {
        anyhow::bail!("store base_url is not configured");
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("actprep"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Tests that touch the ACTPREP_* override vars must not interleave.
    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: Mutex<()> = Mutex::new(());
        LOCK.lock().unwrap()
    }

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ACTPREP_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_ACTPREP_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_ACTPREP_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_ACTPREP_TEST_VAR");
    }

    #[test]
    fn parse_config_file() {
        let _guard = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://example.supabase.co\"\napi_key = \"anon-key\""
        )
        .unwrap();

        let config = load_config_from(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "https://example.supabase.co");
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn env_overrides_win_over_file() {
        let _guard = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://file.supabase.co\"\napi_key = \"file-key\""
        )
        .unwrap();

        std::env::set_var("ACTPREP_STORE_URL", "https://env.supabase.co");
        std::env::set_var("ACTPREP_STORE_KEY", "env-key");
        let config = load_config_from(Some(file.path()));
        std::env::remove_var("ACTPREP_STORE_URL");
        std::env::remove_var("ACTPREP_STORE_KEY");

        let config = config.unwrap();
        assert_eq!(config.base_url, "https://env.supabase.co");
        assert_eq!(config.api_key, "env-key");
    }

    #[test]
    fn missing_explicit_path_fails() {
        assert!(load_config_from(Some(Path::new("/no/such/actprep.toml"))).is_err());
    }

    #[test]
    fn debug_masks_api_key() {
        let config = StoreConfig {
            base_url: "https://example.supabase.co".into(),
            api_key: "secret".into(),
            timeout_secs: 30,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***"));
    }
}
