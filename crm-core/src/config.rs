pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrmConfig {
    pub backend_url: String,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl CrmConfig {
    /// Unset or blank values fall back to the local backend.
    pub fn resolve(backend_url: Option<&str>) -> Self {
        let backend_url = backend_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
            .to_string();
        Self { backend_url }
    }

    /// Value baked in when the browser bundle was built.
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("CRM_BACKEND_URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        assert_eq!(CrmConfig::resolve(None).backend_url, "http://localhost:8000");
        assert_eq!(CrmConfig::resolve(Some("  ")).backend_url, "http://localhost:8000");
    }

    #[test]
    fn strips_trailing_slash() {
        let config = CrmConfig::resolve(Some("https://crm.example.com/backend/"));
        assert_eq!(config.backend_url, "https://crm.example.com/backend");
    }
}
