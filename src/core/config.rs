use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_MINDICADOR_URL: &str = "https://mindicador.cl/api";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MindicadorProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MindicadorProviderConfig {
    fn default() -> Self {
        MindicadorProviderConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_MINDICADOR_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub mindicador: Option<MindicadorProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            mindicador: Some(MindicadorProviderConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChartOutputConfig {
    pub output_path: Option<String>,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartOutputConfig {
    fn default() -> Self {
        ChartOutputConfig {
            output_path: None,
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_chart_width() -> u32 {
    800
}

fn default_chart_height() -> u32 {
    480
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub chart: ChartOutputConfig,
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when there is none.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("cl", "cambio", "cambio")
            .context("Could not determine project directories")
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn chart_output_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.chart.output_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(Self::project_dirs()?.data_dir().join("chart.svg"))
    }

    pub fn mindicador(&self) -> MindicadorProviderConfig {
        self.providers.mindicador.clone().unwrap_or_default()
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        // An empty file is a valid, all-defaults config.
        if config_str.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  mindicador:
    base_url: "http://example.com/api"
    timeout_secs: 3
chart:
  output_path: "/tmp/rates.svg"
  width: 640
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        let mindicador = config.mindicador();
        assert_eq!(mindicador.base_url, "http://example.com/api");
        assert_eq!(mindicador.timeout_secs, 3);
        assert_eq!(config.chart.width, 640);
        assert_eq!(config.chart.height, 480);
        assert_eq!(
            config.chart_output_path().unwrap(),
            PathBuf::from("/tmp/rates.svg")
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("chart:\n  height: 300\n").unwrap();
        let mindicador = config.mindicador();
        assert_eq!(mindicador.base_url, DEFAULT_MINDICADOR_URL);
        assert_eq!(mindicador.timeout_secs, 10);
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.height, 300);
        assert!(config.chart.output_path.is_none());
    }

    #[test]
    fn test_provider_without_timeout() {
        let yaml_str = r#"
providers:
  mindicador:
    base_url: "http://localhost:9000"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.mindicador().timeout_secs, 10);
    }

    #[test]
    fn test_provider_with_only_timeout() {
        let yaml_str = "providers:\n  mindicador:\n    timeout_secs: 3\n";
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        let mindicador = config.mindicador();
        assert_eq!(mindicador.base_url, DEFAULT_MINDICADOR_URL);
        assert_eq!(mindicador.timeout_secs, 3);
    }

    #[test]
    fn test_load_empty_file() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        let config = AppConfig::load_from_path(file.path())?;
        assert!(config.providers.mindicador.is_some());
        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = AppConfig::load_from_path("/nonexistent/cambio/config.yaml");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
