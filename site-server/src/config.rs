//! Server configuration
//!
//! Every binding is optional. A missing database or bucket is reported per
//! request (scoped 500s), never at startup.

/// Default translation model (Italian → English)
pub const DEFAULT_AI_MODEL: &str = "@cf/meta/m2m100-1.2b";
/// Default translation API base URL
pub const DEFAULT_AI_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: Option<String>,
    /// Static admin bearer secret (blank = admin routes always refuse)
    pub admin_token: String,
    /// Bucket holding uploaded images
    pub s3_bucket: Option<String>,
    /// Custom S3-compatible endpoint (R2, MinIO, ...)
    pub s3_endpoint_url: Option<String>,
    /// Translation service binding
    pub ai: Option<AiConfig>,
    /// Origin used in public image URLs; derived from the request when unset
    pub public_base_url: Option<String>,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
}

/// Translation service credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub account_id: String,
    pub api_token: String,
    pub model: String,
    pub base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let ai = match (non_empty("AI_ACCOUNT_ID"), non_empty("AI_API_TOKEN")) {
            (Some(account_id), Some(api_token)) => Some(AiConfig {
                account_id,
                api_token,
                model: non_empty("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.into()),
                base_url: non_empty("AI_BASE_URL").unwrap_or_else(|| DEFAULT_AI_BASE_URL.into()),
            }),
            _ => None,
        };

        Self {
            database_url: non_empty("DATABASE_URL"),
            admin_token: get("ADMIN_TOKEN").unwrap_or_default(),
            s3_bucket: non_empty("S3_BUCKET"),
            s3_endpoint_url: non_empty("S3_ENDPOINT_URL"),
            ai,
            public_base_url: non_empty("PUBLIC_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string()),
            http_port: non_empty("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]);
        assert_eq!(config.database_url, None);
        assert_eq!(config.admin_token, "");
        assert_eq!(config.s3_bucket, None);
        assert_eq!(config.ai, None);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = load(&[("DATABASE_URL", "  "), ("S3_BUCKET", ""), ("HTTP_PORT", "x")]);
        assert_eq!(config.database_url, None);
        assert_eq!(config.s3_bucket, None);
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn test_ai_needs_account_and_token() {
        assert_eq!(load(&[("AI_ACCOUNT_ID", "acc")]).ai, None);

        let config = load(&[("AI_ACCOUNT_ID", "acc"), ("AI_API_TOKEN", "tok")]);
        let ai = config.ai.unwrap();
        assert_eq!(ai.model, DEFAULT_AI_MODEL);
        assert_eq!(ai.base_url, DEFAULT_AI_BASE_URL);
    }

    #[test]
    fn test_public_base_url_trailing_slash() {
        let config = load(&[("PUBLIC_BASE_URL", "https://example.com/")]);
        assert_eq!(config.public_base_url.as_deref(), Some("https://example.com"));
    }
}
