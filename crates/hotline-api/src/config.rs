use std::net::SocketAddr;

use anyhow::{Context, Result, bail};
use hotline_db::AdminSeed;

/// Placeholder token secrets that must not be used when tokens are enforced.
const PLACEHOLDER_SECRETS: &[&str] = &["dev-secret-change-me", "change-me"];

const DEFAULT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin: AdminSeed,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Reject requests without a valid bearer token. Off by default, which
    /// keeps the API open to any caller.
    pub require_token: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            admin: AdminSeed::default(),
            jwt_secret: DEFAULT_SECRET.into(),
            token_ttl_hours: 12,
            require_token: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Unset keys fall back to
    /// the defaults; malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT").or_else(|| lookup("HOTLINE_PORT")) {
            Some(v) => v.parse().with_context(|| format!("invalid port '{}'", v))?,
            None => defaults.port,
        };
        let token_ttl_hours = match lookup("HOTLINE_TOKEN_TTL_HOURS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid HOTLINE_TOKEN_TTL_HOURS '{}'", v))?,
            None => defaults.token_ttl_hours,
        };
        if token_ttl_hours <= 0 {
            bail!("HOTLINE_TOKEN_TTL_HOURS must be positive, got {}", token_ttl_hours);
        }
        let require_token = match lookup("HOTLINE_REQUIRE_TOKEN") {
            Some(v) => parse_bool(&v).with_context(|| "invalid HOTLINE_REQUIRE_TOKEN")?,
            None => defaults.require_token,
        };

        let config = Self {
            host: lookup("HOTLINE_HOST").unwrap_or(defaults.host),
            port,
            admin: AdminSeed {
                name: lookup("HOTLINE_ADMIN_NAME").unwrap_or(defaults.admin.name),
                password: lookup("HOTLINE_ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
            },
            jwt_secret: lookup("HOTLINE_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl_hours,
            require_token,
        };

        if config.admin.password.is_empty() {
            bail!("HOTLINE_ADMIN_PASSWORD must not be empty");
        }
        if config.require_token && PLACEHOLDER_SECRETS.contains(&config.jwt_secret.as_str()) {
            bail!("HOTLINE_REQUIRE_TOKEN is on but HOTLINE_JWT_SECRET is unset or a placeholder");
        }

        Ok(config)
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_original_deployment() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.admin.name, "Orhan");
        assert_eq!(config.admin.password, "4499");
        assert!(!config.require_token);
        assert_eq!(config.addr().unwrap().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn port_prefers_plain_port_variable() {
        let config = from_pairs(&[("PORT", "8080"), ("HOTLINE_PORT", "9090")]).unwrap();
        assert_eq!(config.port, 8080);
        let config = from_pairs(&[("HOTLINE_PORT", "9090")]).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(from_pairs(&[("PORT", "eighty")]).is_err());
        assert!(from_pairs(&[("HOTLINE_REQUIRE_TOKEN", "maybe")]).is_err());
        assert!(from_pairs(&[("HOTLINE_TOKEN_TTL_HOURS", "0")]).is_err());
        assert!(from_pairs(&[("HOTLINE_ADMIN_PASSWORD", "")]).is_err());
    }

    #[test]
    fn enforced_tokens_need_a_real_secret() {
        assert!(from_pairs(&[("HOTLINE_REQUIRE_TOKEN", "true")]).is_err());
        let config = from_pairs(&[
            ("HOTLINE_REQUIRE_TOKEN", "true"),
            ("HOTLINE_JWT_SECRET", "a-long-random-value"),
        ])
        .unwrap();
        assert!(config.require_token);
    }

    #[test]
    fn admin_seed_is_configurable() {
        let config = from_pairs(&[
            ("HOTLINE_ADMIN_NAME", "Root"),
            ("HOTLINE_ADMIN_PASSWORD", "s3cret"),
        ])
        .unwrap();
        assert_eq!(config.admin.name, "Root");
        assert_eq!(config.admin.password, "s3cret");
    }
}
