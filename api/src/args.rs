use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use labeliq_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LLMConfig, LabelIqConfig, RateLimitConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "labeliq-api", version, about = "LabelIQ analysis proxy")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub rate_limit: RateLimitArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "port", env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Origins allowed by CORS, comma separated.
    #[arg(
        long = "allowed-origins",
        env = "FRONTEND_URL",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = DEFAULT_GEMINI_BASE_URL
    )]
    pub gemini_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct RateLimitArgs {
    #[arg(
        long = "rate-limit-window-secs",
        env = "RATE_LIMIT_WINDOW_SECS",
        default_value_t = 900
    )]
    pub window_secs: u64,

    #[arg(long = "rate-limit-max", env = "RATE_LIMIT_MAX", default_value_t = 100)]
    pub max_requests: u32,

    /// Key clients by `X-Forwarded-For` / `X-Real-IP`. Only enable behind a
    /// reverse proxy that overwrites those headers.
    #[arg(long = "trust-proxy", env = "TRUST_PROXY", default_value_t = false)]
    pub trust_proxy: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(
        long = "log-filter",
        env = "RUST_LOG",
        default_value = "labeliq_api=info,labeliq_core=info,tower_http=info"
    )]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for LabelIqConfig {
    fn from(args: Args) -> Self {
        LabelIqConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            rate_limit: RateLimitConfig {
                window: Duration::from_secs(args.rate_limit.window_secs),
                max_requests: args.rate_limit.max_requests,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["labeliq-api", "--gemini-api-key", "k"]);
        assert_eq!(args.server.port, 5000);
        assert_eq!(args.server.allowed_origins, vec!["http://localhost:3000"]);
        assert!(!args.rate_limit.trust_proxy);

        let config = LabelIqConfig::from(args);
        assert_eq!(config.llm.gemini_model, "gemini-3-flash-preview");
        assert_eq!(config.rate_limit.window, Duration::from_secs(900));
        assert_eq!(config.rate_limit.max_requests, 100);
    }

    #[test]
    fn test_multiple_origins() {
        let args = Args::parse_from([
            "labeliq-api",
            "--gemini-api-key",
            "k",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);
        assert_eq!(args.server.allowed_origins.len(), 2);
    }

    #[test]
    fn test_trust_proxy_flag() {
        let args = Args::parse_from(["labeliq-api", "--gemini-api-key", "k", "--trust-proxy"]);
        assert!(args.rate_limit.trust_proxy);
    }
}
