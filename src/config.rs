/// Environment variable holding the API root, e.g. `http://localhost:8080/api`.
pub const API_BASE_ENV: &str = "DIARY_API_BASE";
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Client settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root every API path is appended to. Stored without a trailing slash.
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Reads the configuration from the process environment, falling back to
    /// defaults for anything unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(API_BASE_ENV) {
            Some(base) if !base.trim().is_empty() => Self::new(base.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_api_base(self, api_base: impl Into<String>) -> Self {
        Self::new(api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        assert_eq!(ClientConfig::default().api_base, "http://localhost:8080/api");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(ClientConfig::new("http://diary.local/api/").api_base, "http://diary.local/api");
    }

    #[test]
    fn env_value_wins_over_default() {
        let config = ClientConfig::from_lookup(|key| {
            (key == API_BASE_ENV).then(|| "https://example.org/api".to_string())
        });
        assert_eq!(config.api_base, "https://example.org/api");
    }

    #[test]
    fn blank_env_value_falls_back() {
        let config = ClientConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }
}
