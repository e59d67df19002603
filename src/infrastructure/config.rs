use crate::domain::fee_history::ChartDuration;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub watcher: WatcherSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WatcherSettings {
    #[serde(default = "default_initial_duration")]
    pub initial_duration: ChartDuration,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            initial_duration: default_initial_duration(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_initial_duration() -> ChartDuration {
    ChartDuration::OneDay
}

/// Load `config/fee_history.*`, overridden by `FEE_HISTORY__SECTION__KEY` variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/fee_history"))
        .add_source(config::Environment::with_prefix("FEE_HISTORY").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> anyhow::Result<AppConfig> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = parse("[api]\nbase_url = \"https://fees.example.com\"\n").unwrap();

        assert_eq!(config.api.base_url, "https://fees.example.com");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.watcher.initial_duration, ChartDuration::OneDay);
    }

    #[test]
    fn test_initial_duration_uses_chart_keys() {
        let config = parse(
            r#"
            [api]
            base_url = "http://localhost:3000"

            [server]
            bind = "127.0.0.1:9000"

            [watcher]
            initial_duration = "1w"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.watcher.initial_duration, ChartDuration::OneWeek);
    }

    #[test]
    fn test_missing_api_section_is_an_error() {
        assert!(parse("[server]\nbind = \"0.0.0.0:1\"\n").is_err());
    }

    #[test]
    fn test_unknown_duration_is_an_error() {
        assert!(parse("[api]\nbase_url = \"x\"\n[watcher]\ninitial_duration = \"1y\"\n").is_err());
    }
}
