use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub model_path: Option<String>,
    pub ml_service_url: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub http_bind_address: Option<String>,
    #[serde(default = "default_prediction_timeout")]
    pub prediction_timeout_seconds: u64,
}

fn default_prediction_timeout() -> u64 {
    10
}

pub fn create_test_config() -> Config {
    Config {
        model_path: None,
        ml_service_url: None,
        telegram_bot_token: None,
        http_bind_address: Some("127.0.0.1:0".to_string()),
        prediction_timeout_seconds: 1,
    }
}

pub fn parse_config(contents: &[u8]) -> Result<Config> {
    let config: Config = toml::from_slice(contents).context("config is not valid TOML")?;

    if config.telegram_bot_token.is_none() && config.http_bind_address.is_none() {
        return Err(anyhow!(
            "neither telegram_bot_token nor http_bind_address is set, nothing to serve"
        ));
    }

    Ok(config)
}

pub fn read_config() -> Result<Config> {
    dotenv().ok();
    let config_path =
        env::var(CONFIG_PATH_ENV).with_context(|| format!("{CONFIG_PATH_ENV} .env not set"))?;
    let bytes = std::fs::read(&config_path)
        .with_context(|| format!("failed to read config from {config_path}"))?;
    parse_config(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_defaults_timeout() {
        let config = parse_config(b"http_bind_address = \"0.0.0.0:8080\"\n").unwrap();
        assert_eq!(config.prediction_timeout_seconds, 10);
        assert_eq!(config.model_path, None);
    }

    #[test]
    fn test_parse_config_full() {
        let config = parse_config(
            b"model_path = \"model.json\"\ntelegram_bot_token = \"xxx\"\nprediction_timeout_seconds = 3\n",
        )
        .unwrap();
        assert_eq!(config.model_path.as_deref(), Some("model.json"));
        assert_eq!(config.telegram_bot_token.as_deref(), Some("xxx"));
        assert_eq!(config.prediction_timeout_seconds, 3);
    }

    #[test]
    fn test_parse_config_without_surface() {
        assert!(parse_config(b"model_path = \"model.json\"\n").is_err());
    }
}
