use std::env;

/// Load .env file if it exists (called automatically when using `from_env`)
pub fn load_dotenv() {
    // Silently ignore errors (file might not exist)
    let _ = dotenvy::dotenv();
}

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the knowledge backend API (default: http://127.0.0.1:8000/api)
    pub api_base_url: String,
}

impl Settings {
    /// Load configuration from environment variables
    ///
    /// This function automatically loads a .env file from the project root if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from env without loading .env
    fn from_env_inner() -> Result<Self, ConfigError> {
        let api_base_url = env::var("CORPORA_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());

        if api_base_url.trim().is_empty() || !api_base_url.starts_with("http") {
            return Err(ConfigError::InvalidBaseUrl(api_base_url));
        }

        Ok(Self { api_base_url })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CORPORA_API_URL is not a usable http(s) URL: {0:?}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_env() {
        // Default, override and rejection checked sequentially so the tests
        // don't race on the shared environment.
        unsafe {
            env::remove_var("CORPORA_API_URL");
        }
        let settings = Settings::from_env_inner().unwrap();
        assert_eq!(settings.api_base_url, "http://127.0.0.1:8000/api");

        unsafe {
            env::set_var("CORPORA_API_URL", "https://kb.example.com/api");
        }
        let settings = Settings::from_env_inner().unwrap();
        assert_eq!(settings.api_base_url, "https://kb.example.com/api");

        unsafe {
            env::set_var("CORPORA_API_URL", "   ");
        }
        assert!(Settings::from_env_inner().is_err());

        unsafe {
            env::remove_var("CORPORA_API_URL");
        }
    }
}
