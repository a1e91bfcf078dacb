use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub prompt: PromptConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Chat-completion endpoint settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API (e.g. `https://api.siliconflow.cn`)
    pub api_base: String,
    /// Bearer credential. Never defaulted; must come from config or `API_KEY`.
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Request timeout in seconds (accepts `30` or `"30s"`)
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Number of (name, script) prompts kept in the LRU cache
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

// Keep the credential out of debug output and logs
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_, plus API_KEY)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = match path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(config_path) => Self::from_toml(&config_path)?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        // 2. Override with environment variables
        config.apply_env_overrides(|key| std::env::var(key).ok());

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - API_KEY: Bearer credential for the completion API (required unless set in config)
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LLM_API_BASE: Completion API base URL
    /// - APP_LLM_MODEL: Model identifier
    /// - APP_LLM_TIMEOUT_SECS: Request timeout (accepts "30", "30s", "1m")
    /// - APP_PROMPT_CACHE_CAPACITY: Prompt cache size
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,name_bridge=debug")
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("API_KEY") {
            self.llm.api_key = key;
            tracing::info!("Override llm.api_key from env");
        }

        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Some(port) = lookup("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Some(base) = lookup("APP_LLM_API_BASE") {
            self.llm.api_base = base;
            tracing::info!("Override llm.api_base from env: {}", self.llm.api_base);
        }

        if let Some(model) = lookup("APP_LLM_MODEL") {
            self.llm.model = model;
            tracing::info!("Override llm.model from env: {}", self.llm.model);
        }

        if let Some(timeout) = lookup("APP_LLM_TIMEOUT_SECS") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.llm.timeout_secs = val;
                    tracing::info!("Override llm.timeout_secs from env: {}", self.llm.timeout_secs);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_LLM_TIMEOUT_SECS '{}': {} (keep {})",
                    timeout,
                    e,
                    self.llm.timeout_secs
                ),
            }
        }

        if let Some(capacity) = lookup("APP_PROMPT_CACHE_CAPACITY")
            && let Ok(capacity) = capacity.parse()
        {
            self.prompt.cache_capacity = capacity;
            tracing::info!(
                "Override prompt.cache_capacity from env: {}",
                self.prompt.cache_capacity
            );
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.llm.api_key.trim().is_empty() {
            anyhow::bail!("LLM API key is not configured: set API_KEY or llm.api_key in config.toml");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.llm.api_base.trim().is_empty() {
            anyhow::bail!("llm.api_base cannot be empty");
        }

        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model cannot be empty");
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be within 0.0..=2.0");
        }

        if self.llm.max_tokens == 0 {
            anyhow::bail!("llm.max_tokens must be > 0");
        }

        if self.llm.timeout_secs == 0 {
            anyhow::bail!("llm.timeout_secs must be > 0");
        }

        if self.prompt.cache_capacity == 0 {
            anyhow::bail!("prompt.cache_capacity must be > 0");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    pub fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.siliconflow.cn".to_string(),
            api_key: String::new(),
            model: "deepseek-ai/DeepSeek-V3".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { cache_capacity: crate::services::prompt::DEFAULT_CACHE_CAPACITY }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,name_bridge=debug".to_string(), file: None }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    let s = input.trim().to_lowercase();

    // Accept plain numbers (treated as seconds)
    if let Ok(val) = s.parse::<u64>() {
        return Ok(val);
    }

    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => {
            n.checked_mul(60).ok_or_else(|| "duration too large".to_string())
        },
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Accepts either a number of seconds or a string like "30s"
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '1m'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
