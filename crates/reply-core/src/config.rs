use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReplyError, Result};
use crate::types::{clamp_max_output_tokens, LanguageCode, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL};

const CONFIG_FILE_PATH: &str = "config.toml";
pub const DEFAULT_FIELD_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Direct,
    #[default]
    Proxied,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Direct => "direct",
            BackendKind::Proxied => "proxied",
        }
    }
}

/// Addon settings as stored by the host system. Read-only for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    pub backend: BackendKind,
    pub license_key: String,
    pub gemini_api_key: String,
    pub api_url_override: String,
    pub gemini_model: String,
    pub response_language: LanguageCode,
    pub max_output_tokens: u32,
    pub max_instructions_chars: usize,
    pub max_context_chars: usize,
    pub system_url: Option<String>,
    pub server_name: Option<String>,
    pub direct_base_url: Option<String>,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            license_key: String::new(),
            gemini_api_key: String::new(),
            api_url_override: String::new(),
            gemini_model: DEFAULT_MODEL.to_string(),
            response_language: LanguageCode::auto(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_instructions_chars: DEFAULT_FIELD_LIMIT,
            max_context_chars: DEFAULT_FIELD_LIMIT,
            system_url: None,
            server_name: None,
            direct_base_url: None,
        }
    }
}

pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".ticket-reply")
}

fn config_json_path() -> PathBuf {
    app_data_dir().join("config.json")
}

impl AddonConfig {
    /// JSON in the app data dir, else `config.toml` in the working
    /// directory, then environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_file(&config_json_path())
            .or_else(|| Self::load_file(Path::new(CONFIG_FILE_PATH)))
            .unwrap_or_default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load an explicit file; the format is picked from the extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReplyError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::parse(path, &content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(path).ok()?;
        match Self::parse(path, &content) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Ignoring config at {:?}: {}", path, e);
                None
            }
        }
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let is_toml = path.extension().and_then(|ext| ext.to_str()) == Some("toml");
        let mut config: AddonConfig = if is_toml {
            toml::from_str(content).map_err(|e| ReplyError::Configuration(e.to_string()))?
        } else {
            serde_json::from_str(content).map_err(|e| ReplyError::Configuration(e.to_string()))?
        };
        config.max_output_tokens = clamp_max_output_tokens(config.max_output_tokens);
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("REPLY_BACKEND") {
            match backend.trim().to_ascii_lowercase().as_str() {
                "direct" => self.backend = BackendKind::Direct,
                "proxied" => self.backend = BackendKind::Proxied,
                other => log::warn!("Unknown REPLY_BACKEND '{}', keeping {}", other, self.backend.as_str()),
            }
        }
        if let Some(license_key) = lookup("LICENSE_KEY") {
            self.license_key = license_key;
        }
        if let Some(api_key) = lookup("GEMINI_API_KEY") {
            self.gemini_api_key = api_key;
        }
        if let Some(url) = lookup("API_URL_OVERRIDE") {
            self.api_url_override = url;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.gemini_model = model;
        }
        if let Some(language) = lookup("RESPONSE_LANGUAGE") {
            self.response_language = LanguageCode::new(language);
        }
        if let Some(tokens) = lookup("MAX_OUTPUT_TOKENS") {
            match tokens.trim().parse::<u32>() {
                Ok(value) => self.max_output_tokens = clamp_max_output_tokens(value),
                Err(_) => log::warn!("Ignoring non-numeric MAX_OUTPUT_TOKENS '{}'", tokens),
            }
        }
        if let Some(system_url) = lookup("SYSTEM_URL") {
            self.system_url = Some(system_url);
        }
        if let Some(server_name) = lookup("SERVER_NAME") {
            self.server_name = Some(server_name);
        }
    }

    pub fn require_gemini_api_key(&self) -> Result<&str> {
        non_empty(&self.gemini_api_key).ok_or_else(|| {
            ReplyError::Configuration(
                "Gemini API Key is not configured. Please configure it in the addon settings."
                    .to_string(),
            )
        })
    }

    pub fn require_license_key(&self) -> Result<&str> {
        non_empty(&self.license_key).ok_or_else(|| {
            ReplyError::Configuration(
                "License Key is not configured. Please configure it in the addon settings."
                    .to_string(),
            )
        })
    }

    pub fn model(&self) -> &str {
        non_empty(&self.gemini_model).unwrap_or(DEFAULT_MODEL)
    }

    pub fn relay_base_override(&self) -> Option<&str> {
        non_empty(&self.api_url_override)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_addon_settings() {
        let config = AddonConfig::default();
        assert_eq!(config.backend, BackendKind::Proxied);
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.max_output_tokens, 4096);
        assert_eq!(config.max_instructions_chars, 1000);
        assert_eq!(config.max_context_chars, 1000);
        assert!(config.response_language.is_auto());
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AddonConfig::default();
        config.apply_env_overrides(lookup_from(&[
            ("REPLY_BACKEND", "Direct"),
            ("GEMINI_API_KEY", "key-123"),
            ("RESPONSE_LANGUAGE", "FR"),
            ("MAX_OUTPUT_TOKENS", "20000"),
            ("SYSTEM_URL", "https://billing.example.com/"),
        ]));

        assert_eq!(config.backend, BackendKind::Direct);
        assert_eq!(config.gemini_api_key, "key-123");
        assert_eq!(config.response_language.as_str(), "fr");
        assert_eq!(config.max_output_tokens, 8192);
        assert_eq!(config.system_url.as_deref(), Some("https://billing.example.com/"));
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut config = AddonConfig::default();
        config.apply_env_overrides(lookup_from(&[
            ("REPLY_BACKEND", "carrier-pigeon"),
            ("MAX_OUTPUT_TOKENS", "lots"),
        ]));
        assert_eq!(config.backend, BackendKind::Proxied);
        assert_eq!(config.max_output_tokens, 4096);
    }

    #[test]
    fn missing_credentials_are_configuration_errors() {
        let config = AddonConfig::default();
        assert!(matches!(
            config.require_gemini_api_key(),
            Err(ReplyError::Configuration(_))
        ));
        assert!(matches!(
            config.require_license_key(),
            Err(ReplyError::Configuration(_))
        ));
    }

    #[test]
    fn blank_model_falls_back_to_default() {
        let config = AddonConfig {
            gemini_model: "  ".to_string(),
            ..AddonConfig::default()
        };
        assert_eq!(config.model(), DEFAULT_MODEL);
    }

    #[test]
    fn loads_toml_file_with_partial_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(
            file,
            "backend = \"direct\"\ngemini_api_key = \"abc\"\nmax_output_tokens = 0"
        )
        .expect("write");

        let config = AddonConfig::parse(&path, &std::fs::read_to_string(&path).expect("read"))
            .expect("parse");
        assert_eq!(config.backend, BackendKind::Direct);
        assert_eq!(config.gemini_api_key, "abc");
        assert_eq!(config.max_output_tokens, 1);
        assert_eq!(config.max_context_chars, DEFAULT_FIELD_LIMIT);
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"license_key": "LIC-1", "api_url_override": "http://127.0.0.1:3001/", "response_language": "de"}"#,
        )
        .expect("write");

        let config = AddonConfig::parse(&path, &std::fs::read_to_string(&path).expect("read"))
            .expect("parse");
        assert_eq!(config.license_key, "LIC-1");
        assert_eq!(config.relay_base_override(), Some("http://127.0.0.1:3001/"));
        assert_eq!(config.response_language.as_str(), "de");
    }

    #[test]
    fn malformed_file_is_a_configuration_error() {
        let path = Path::new("broken.json");
        assert!(matches!(
            AddonConfig::parse(path, "{not json"),
            Err(ReplyError::Configuration(_))
        ));
    }
}
