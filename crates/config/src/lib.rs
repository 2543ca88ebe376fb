use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "eduassist.toml",
    "config/eduassist.toml",
    "crates/config/eduassist.toml",
    "../eduassist.toml",
    "../config/eduassist.toml",
    "../crates/config/eduassist.toml",
];

/// Environment variable consulted for the upstream base URL when no
/// configuration source sets one.
pub const BASE_URL_ENV: &str = "AI_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub orchestrator: OrchestratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
    /// Shared secret the relay endpoints expect as a bearer token. `None`
    /// leaves them open.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Largest request body the relay buffers. Photos and recordings arrive
    /// base64 encoded inside the JSON body.
    #[serde(default = "HttpConfig::default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl HttpConfig {
    pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

    fn default_max_body_bytes() -> usize {
        Self::DEFAULT_MAX_BODY_BYTES
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
            access_token: None,
            max_body_bytes: Self::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub model: String,
    #[serde(default)]
    pub upstream: UpstreamProviderConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model: "google/gemini-2.5-flash".to_string(),
            upstream: UpstreamProviderConfig::default(),
        }
    }
}

/// Connection settings for the OpenAI-compatible chat-completion API.
///
/// ```
/// use eduassist_config::UpstreamProviderConfig;
///
/// let upstream = UpstreamProviderConfig::default();
/// assert_eq!(upstream.base_url, "https://openrouter.ai/api/v1");
/// assert_eq!(upstream.request_timeout_seconds, 30);
/// assert!(upstream.api_key.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "UpstreamProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "UpstreamProviderConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub referer: Option<String>,
    #[serde(default = "UpstreamProviderConfig::default_title")]
    pub title: Option<String>,
}

impl UpstreamProviderConfig {
    fn default_base_url() -> String {
        "https://openrouter.ai/api/v1".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    fn default_title() -> Option<String> {
        Some("EduAssist".to_string())
    }
}

impl Default for UpstreamProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
            referer: None,
            title: Self::default_title(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use eduassist_config::load;
///
/// std::env::remove_var("EDUASSIST_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let base_url = std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| defaults.orchestrator.upstream.base_url.clone());

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())
        .context("invalid default for http.address")?
        .set_default("http.port", i64::from(defaults.http.port))
        .context("invalid default for http.port")?
        .set_default(
            "http.max_body_bytes",
            i64::try_from(defaults.http.max_body_bytes).unwrap_or(i64::MAX),
        )
        .context("invalid default for http.max_body_bytes")?
        .set_default("orchestrator.model", defaults.orchestrator.model.clone())
        .context("invalid default for orchestrator.model")?
        .set_default("orchestrator.upstream.base_url", base_url)
        .context("invalid default for orchestrator.upstream.base_url")?
        .set_default(
            "orchestrator.upstream.request_timeout_seconds",
            i64::try_from(defaults.orchestrator.upstream.request_timeout_seconds)
                .unwrap_or(i64::MAX),
        )
        .context("invalid default for orchestrator.upstream.request_timeout_seconds")?;

    if let Some(title) = defaults.orchestrator.upstream.title.clone() {
        builder = builder
            .set_default("orchestrator.upstream.title", title)
            .context("invalid default for orchestrator.upstream.title")?;
    }

    let environment_overrides = config::Environment::with_prefix("EDUASSIST").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("EDUASSIST_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via EDUASSIST_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(
        address = %config.http.address,
        port = config.http.port,
        model = %config.orchestrator.model,
        base_url = %config.orchestrator.upstream.base_url,
        api_key_configured = config.orchestrator.upstream.api_key.is_some(),
        "loaded relay configuration"
    );
    Ok(config)
}
