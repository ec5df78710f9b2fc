use common::utils::Profile;
use dotenv::dotenv;
use std::env;

const LOCAL_API_BASE: &str = "http://localhost:8081/api/v1";
// Deployed behind a reverse proxy that forwards /api to the backend.
const PROXIED_API_BASE: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub profile: Profile,
    pub api_base_url: String,
    /// Origin used to resolve a relative `api_base_url`, e.g. `https://zyvastra.com`.
    pub api_origin: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        let explicit = non_empty_var("APP_PROFILE").or_else(|| non_empty_var("APP_ENV"));
        let hostname = non_empty_var("APP_HOSTNAME");
        let profile = detect_profile(explicit.as_deref(), hostname.as_deref());

        let api_base_url =
            non_empty_var("API_BASE_URL").unwrap_or_else(|| default_base_url(profile).to_string());
        let api_origin = non_empty_var("API_ORIGIN");

        ClientConfig {
            profile,
            api_base_url,
            api_origin,
        }
    }

    pub fn for_profile(profile: Profile) -> Self {
        ClientConfig {
            profile,
            api_base_url: default_base_url(profile).to_string(),
            api_origin: None,
        }
    }

    pub fn build_api_url(&self, path: &str) -> String {
        build_api_url(&self.api_base_url, path)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn default_base_url(profile: Profile) -> &'static str {
    match profile {
        Profile::Local => LOCAL_API_BASE,
        Profile::Dev | Profile::Prod => PROXIED_API_BASE,
    }
}

/// Picks the profile from an explicit override first, then the hostname.
///
/// The override is matched by substring so values such as `development` or
/// `production` select `dev` and `prod`.
pub fn detect_profile(explicit: Option<&str>, hostname: Option<&str>) -> Profile {
    if let Some(explicit) = explicit {
        let norm = explicit.to_lowercase();
        if norm.contains("local") {
            return Profile::Local;
        }
        if norm.contains("dev") {
            return Profile::Dev;
        }
        if norm.contains("prod") {
            return Profile::Prod;
        }
    }

    match hostname {
        Some("localhost") | Some("127.0.0.1") => Profile::Local,
        _ => Profile::Prod,
    }
}

/// Joins base and path with exactly one slash between them.
pub fn build_api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let tail = path.trim_start_matches('/');
    format!("{}/{}", base, tail)
}
