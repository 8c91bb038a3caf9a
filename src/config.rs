use crate::api::DEFAULT_BASE_URL;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const API_URL_ENV: &str = "LINGO_API_URL";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\lingo-client")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/lingo-client")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub question_bank: Option<PathBuf>,
    pub data_dir: PathBuf,
}

/// Shape of `config.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_base_url: Option<String>,
    page_size: Option<u32>,
    question_bank: Option<PathBuf>,
    data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            question_bank: None,
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file (explicit path or the one in the data
    /// directory), then `LINGO_API_URL`.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.data_dir.join(CONFIG_FILE));

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            config.apply_toml(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
        } else if explicit.is_some() {
            anyhow::bail!("Config file {} does not exist", path.display());
        }

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_api_url(Some(url));
        }

        Ok(config)
    }

    pub fn apply_toml(&mut self, content: &str) -> anyhow::Result<()> {
        let file: ConfigFile = toml::from_str(content)?;
        if let Some(url) = file.api_base_url {
            self.api_base_url = url;
        }
        if let Some(size) = file.page_size {
            anyhow::ensure!(size > 0, "page_size must be greater than zero");
            self.page_size = size;
        }
        if file.question_bank.is_some() {
            self.question_bank = file.question_bank;
        }
        if let Some(dir) = file.data_dir {
            self.data_dir = dir;
        }
        Ok(())
    }

    pub fn apply_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("lingo.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("lingo-client.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.question_bank.is_none());
        assert!(config.data_dir.ends_with("lingo-client"));
    }

    #[test]
    fn test_apply_toml() {
        let mut config = AppConfig::default();
        config
            .apply_toml(
                r#"
api_base_url = "https://learn.example.com/api"
page_size = 25
question_bank = "/tmp/bank.json"
"#,
            )
            .unwrap();
        assert_eq!(config.api_base_url, "https://learn.example.com/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.question_bank, Some(PathBuf::from("/tmp/bank.json")));
    }

    #[test]
    fn test_rejects_unknown_keys_and_zero_page() {
        let mut config = AppConfig::default();
        assert!(config.apply_toml("colour = \"blue\"").is_err());
        assert!(config.apply_toml("page_size = 0").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.toml");
        let data_dir = temp_dir.path().join("data");
        std::fs::write(
            &path,
            format!("page_size = 5\ndata_dir = {:?}\n", data_dir.display().to_string()),
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.data_dir, data_dir);
        assert_eq!(config.db_path(), data_dir.join("lingo.db"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some(Path::new("/no/such/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_url_override_ignores_blank() {
        let mut config = AppConfig::default();
        config.apply_api_url(Some("   ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        config.apply_api_url(Some(" http://10.0.0.2:8080 ".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.2:8080");
    }
}
