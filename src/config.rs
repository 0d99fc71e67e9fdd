use serde::Deserialize;

/// Which hosted model provider backs the recommendation flow
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Openai,
}

impl ProviderKind {
    /// Base API URL used when `MODEL_API_URL` is not set
    pub fn default_api_url(self) -> &'static str {
        match self {
            ProviderKind::Google => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::Openai => "https://api.openai.com/v1",
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Model provider to use
    #[serde(default = "default_provider")]
    pub model_provider: ProviderKind,

    /// API key for the model provider
    pub model_api_key: String,

    /// Base URL for the model provider API; defaults per provider
    #[serde(default)]
    pub model_api_url: Option<String>,

    /// Model to request completions from
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_provider() -> ProviderKind {
    ProviderKind::Google
}

fn default_model_name() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Base API URL to call, falling back to the selected provider's default
    pub fn resolved_api_url(&self) -> String {
        self.model_api_url
            .clone()
            .unwrap_or_else(|| self.model_provider.default_api_url().to_string())
    }
}
