use anyhow::Context;
use std::env;

const DEFAULT_SENDGRID_FROM: &str = "no-reply@zyvastra.com";

#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub allowed_origins: Vec<String>,

    // Providers; `None` means the endpoint answers "not configured"
    pub twilio: Option<TwilioCredentials>,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_from: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; blank values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_host = var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = var("PORT")
            .unwrap_or_else(|| "4000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let twilio = match (var("TWILIO_ACCOUNT_SID"), var("TWILIO_AUTH_TOKEN")) {
            (Some(account_sid), Some(auth_token)) => Some(TwilioCredentials {
                account_sid,
                auth_token,
                from: var("TWILIO_FROM").unwrap_or_default(),
            }),
            _ => None,
        };

        let sendgrid_api_key = var("SENDGRID_API_KEY");
        let sendgrid_from =
            var("SENDGRID_FROM").unwrap_or_else(|| DEFAULT_SENDGRID_FROM.to_string());

        Ok(Config {
            server_host,
            server_port,
            allowed_origins,
            twilio,
            sendgrid_api_key,
            sendgrid_from,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_leave_providers_unconfigured() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:4000");
        assert!(config.twilio.is_none());
        assert!(config.sendgrid_api_key.is_none());
        assert_eq!(config.sendgrid_from, "no-reply@zyvastra.com");
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn twilio_needs_both_sid_and_token() {
        let config = config_from(&[("TWILIO_ACCOUNT_SID", "AC123"), ("TWILIO_AUTH_TOKEN", " ")]).unwrap();
        assert!(config.twilio.is_none());

        let config = config_from(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "secret"),
            ("TWILIO_FROM", "+15005550006"),
        ])
        .unwrap();
        let twilio = config.twilio.unwrap();
        assert_eq!(twilio.account_sid, "AC123");
        assert_eq!(twilio.from, "+15005550006");
    }

    #[test]
    fn reads_port_and_origins() {
        let config = config_from(&[
            ("PORT", "8088"),
            ("ALLOWED_ORIGINS", "https://zyvastra.com, http://localhost:8081,"),
        ])
        .unwrap();
        assert_eq!(config.server_port, 8088);
        assert_eq!(
            config.allowed_origins,
            vec!["https://zyvastra.com", "http://localhost:8081"]
        );
    }

    #[test]
    fn rejects_bad_port() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }
}
