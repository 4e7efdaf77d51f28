use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Image shipped with the crate and embedded in every report.
pub const BUNDLED_IMAGE_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/static/sample_image.png");

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub assets: AssetConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    pub image_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub otlp_endpoint: Option<String>,
}

impl ReportConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ReportConfig {
            common: common_config,
            assets: AssetConfig {
                image_path: get_env("REPORT_IMAGE_PATH", Some(BUNDLED_IMAGE_PATH), is_prod)?
                    .into(),
            },
            telemetry: TelemetryConfig {
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
