//! Runtime configuration value object.
//!
//! [`AppConfig`] is built once at start-up and passed explicitly to the
//! gateway, the acquisition step and the web state; nothing reads the process
//! environment after that. Parsing goes through a lookup closure so tests can
//! supply values without touching the real environment.

use crate::errors::{InputError, InputKind, LumenError};
use crate::{ApiKey, ByteSize, ModelName, ModelSettings, Temperature, TierSettings};

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_FLASH_MODEL: &str = "GEMINI_FLASH_MODEL";
pub const ENV_PRO_MODEL: &str = "GEMINI_PRO_MODEL";
pub const ENV_API_BASE_URL: &str = "GEMINI_API_BASE_URL";
pub const ENV_MAX_IMAGE_SIZE: &str = "MAX_IMAGE_SIZE";
pub const ENV_MAX_PDF_SIZE: &str = "MAX_PDF_SIZE";

pub const DEFAULT_FLASH_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_PRO_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MAX_IMAGE_MIB: u64 = 10;
pub const DEFAULT_MAX_PDF_MIB: u64 = 50;

// ---------------------------------------------------------------------------
// Upload ceilings
// ---------------------------------------------------------------------------

/// Size ceilings checked before any extraction or pipeline step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_image: ByteSize,
    pub max_document: ByteSize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_image: ByteSize::from_mib(DEFAULT_MAX_IMAGE_MIB),
            max_document: ByteSize::from_mib(DEFAULT_MAX_PDF_MIB),
        }
    }
}

impl UploadLimits {
    /// Rejects an image larger than the image ceiling.
    pub fn check_image(&self, size: ByteSize) -> Result<(), InputError> {
        check(InputKind::Image, size, self.max_image)
    }

    /// Rejects a paged document larger than the document ceiling.
    pub fn check_document(&self, size: ByteSize) -> Result<(), InputError> {
        check(InputKind::PagedDocument, size, self.max_document)
    }
}

fn check(kind: InputKind, actual: ByteSize, limit: ByteSize) -> Result<(), InputError> {
    if actual > limit {
        tracing::warn!(%kind, %actual, %limit, "Upload rejected: over size ceiling");
        return Err(InputError::TooLarge {
            kind,
            actual,
            limit,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Process-wide, read-only configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default credential; a key entered in the UI takes precedence.
    pub api_key: Option<ApiKey>,
    pub flash_model: ModelName,
    pub pro_model: ModelName,
    pub api_base_url: String,
    pub limits: UploadLimits,
}

impl AppConfig {
    /// Builds the configuration from a key lookup (normally the process
    /// environment after `.env` has been loaded).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LumenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = |key: &str, default: &str| -> Result<ModelName, LumenError> {
            match lookup(key) {
                None => ModelName::new(default),
                Some(value) => ModelName::new(value),
            }
            .ok_or_else(|| LumenError::configuration(format!("{key} must not be empty")))
        };

        let bytes = |key: &str, default_mib: u64| -> Result<ByteSize, LumenError> {
            match lookup(key) {
                None => Ok(ByteSize::from_mib(default_mib)),
                Some(value) => value.trim().parse::<u64>().map(ByteSize::new).map_err(|e| {
                    LumenError::configuration(format!(
                        "{key} must be a size in bytes, got '{value}': {e}"
                    ))
                }),
            }
        };

        let api_base_url = lookup(ENV_API_BASE_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(LumenError::configuration(format!(
                "{ENV_API_BASE_URL} must be an http(s) URL, got '{api_base_url}'"
            )));
        }

        Ok(Self {
            api_key: lookup(ENV_API_KEY).and_then(ApiKey::new),
            flash_model: model(ENV_FLASH_MODEL, DEFAULT_FLASH_MODEL)?,
            pro_model: model(ENV_PRO_MODEL, DEFAULT_PRO_MODEL)?,
            api_base_url,
            limits: UploadLimits {
                max_image: bytes(ENV_MAX_IMAGE_SIZE, DEFAULT_MAX_IMAGE_MIB)?,
                max_document: bytes(ENV_MAX_PDF_SIZE, DEFAULT_MAX_PDF_MIB)?,
            },
        })
    }

    /// Tier settings for the diagram pipeline (vision 0.3, reasoning 0.2).
    pub fn diagram_models(&self) -> ModelSettings {
        self.models(0.3, 0.2)
    }

    /// Tier settings for the document pipeline (0.1 on both tiers).
    pub fn document_models(&self) -> ModelSettings {
        self.models(0.1, 0.1)
    }

    fn models(&self, fast: f32, reasoning: f32) -> ModelSettings {
        ModelSettings {
            fast: TierSettings {
                model: self.flash_model.clone(),
                temperature: Temperature::clamped(fast),
            },
            reasoning: TierSettings {
                model: self.pro_model.clone(),
                temperature: Temperature::clamped(reasoning),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, LumenError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert!(config.api_key.is_none());
        assert_eq!(config.flash_model.as_str(), DEFAULT_FLASH_MODEL);
        assert_eq!(config.pro_model.as_str(), DEFAULT_PRO_MODEL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.limits, UploadLimits::default());
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            (ENV_API_KEY, "key-from-env-0123456789"),
            (ENV_FLASH_MODEL, "gemini-1.5-flash"),
            (ENV_MAX_IMAGE_SIZE, "2048"),
            (ENV_API_BASE_URL, "http://localhost:8089/"),
        ])
        .unwrap();

        assert_eq!(config.api_key.unwrap().expose(), "key-from-env-0123456789");
        assert_eq!(config.flash_model.as_str(), "gemini-1.5-flash");
        assert_eq!(config.limits.max_image, ByteSize::new(2048));
        assert_eq!(config.api_base_url, "http://localhost:8089");
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        assert!(matches!(
            config_from(&[(ENV_MAX_PDF_SIZE, "fifty")]),
            Err(LumenError::Configuration { .. })
        ));
        assert!(matches!(
            config_from(&[(ENV_PRO_MODEL, "  ")]),
            Err(LumenError::Configuration { .. })
        ));
        assert!(matches!(
            config_from(&[(ENV_API_BASE_URL, "ftp://example")]),
            Err(LumenError::Configuration { .. })
        ));
    }

    #[test]
    fn pipeline_temperatures_stay_literal() {
        let config = config_from(&[]).unwrap();
        let diagram = config.diagram_models();
        let document = config.document_models();

        assert_eq!(diagram.fast.temperature.as_f32(), 0.3);
        assert_eq!(diagram.reasoning.temperature.as_f32(), 0.2);
        assert_eq!(document.fast.temperature.as_f32(), 0.1);
        assert_eq!(document.reasoning.model.as_str(), DEFAULT_PRO_MODEL);
    }

    #[test]
    fn eleven_megabyte_image_exceeds_ten_megabyte_ceiling() {
        let limits = UploadLimits::default();
        assert!(limits.check_image(ByteSize::from_mib(10)).is_ok());
        assert!(matches!(
            limits.check_image(ByteSize::from_mib(11)),
            Err(InputError::TooLarge {
                kind: InputKind::Image,
                ..
            })
        ));
        assert!(limits.check_document(ByteSize::from_mib(11)).is_ok());
    }
}
