use super::base::ProviderConfig;
use anyhow::{anyhow, Result};

pub const OPENAI_DEFAULT_HOST: &str = "https://api.openai.com";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    pub host: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OpenAiProviderConfig {
    pub fn new(api_key: String, host: String, model: String) -> Self {
        Self {
            api_key,
            host,
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Build a config from explicit values, reading the environment only for
    /// the ones left out
    pub fn with_overrides(
        api_key: Option<String>,
        host: Option<String>,
        model: Option<String>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => Self::get_env("OPENAI_API_KEY", true, None)?
                .ok_or_else(|| anyhow!("OpenAI API key should be present"))?,
        };

        let host = match host {
            Some(host) => host,
            None => Self::get_env("OPENAI_API_HOST", false, None)?
                .unwrap_or_else(|| OPENAI_DEFAULT_HOST.to_string()),
        };

        let model = match model {
            Some(model) => model,
            None => Self::get_env("OPENAI_MODEL", false, None)?
                .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
        };

        Ok(Self::new(api_key, host, model))
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<i32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl ProviderConfig for OpenAiProviderConfig {
    fn from_env() -> Result<Self> {
        Self::with_overrides(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::base::Provider;
    use crate::providers::openai::OpenAiProvider;

    struct EnvOnlyConfig;

    impl ProviderConfig for EnvOnlyConfig {
        fn from_env() -> Result<Self> {
            Ok(EnvOnlyConfig)
        }
    }

    #[test]
    fn test_get_env_optional_uses_default() -> Result<()> {
        let value = EnvOnlyConfig::get_env(
            "PARLEY_TEST_UNSET_OPTIONAL",
            false,
            Some("fallback".to_string()),
        )?;
        assert_eq!(value.as_deref(), Some("fallback"));
        Ok(())
    }

    #[test]
    fn test_get_env_required_missing_fails() {
        let result = EnvOnlyConfig::get_env("PARLEY_TEST_UNSET_REQUIRED", true, None);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("PARLEY_TEST_UNSET_REQUIRED"));
    }

    #[test]
    fn test_get_env_reads_value() -> Result<()> {
        std::env::set_var("PARLEY_TEST_SET_VALUE", "present");
        let value = EnvOnlyConfig::get_env("PARLEY_TEST_SET_VALUE", true, None)?;
        std::env::remove_var("PARLEY_TEST_SET_VALUE");
        assert_eq!(value.as_deref(), Some("present"));
        Ok(())
    }

    #[test]
    fn test_overrides_take_precedence() -> Result<()> {
        let config = OpenAiProviderConfig::with_overrides(
            Some("cli_key".to_string()),
            Some("http://localhost:8080".to_string()),
            Some("gpt-4o".to_string()),
        )?;

        assert_eq!(config.api_key, "cli_key");
        assert_eq!(config.host, "http://localhost:8080");
        assert_eq!(config.model, "gpt-4o");
        Ok(())
    }

    // The only test touching the OPENAI_* variables, so it cannot race another
    #[test]
    fn test_from_env() -> Result<()> {
        std::env::set_var("OPENAI_API_KEY", "env_key");
        std::env::set_var("OPENAI_MODEL", "gpt-4o-mini");
        std::env::remove_var("OPENAI_API_HOST");

        let config = OpenAiProviderConfig::from_env();
        let provider = OpenAiProvider::from_env();
        let partial = OpenAiProviderConfig::with_overrides(None, None, Some("gpt-4o".to_string()));

        std::env::remove_var("OPENAI_API_KEY");
        let missing_key = OpenAiProviderConfig::from_env();
        std::env::remove_var("OPENAI_MODEL");

        let config = config?;
        assert_eq!(config.api_key, "env_key");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.host, OPENAI_DEFAULT_HOST);
        assert!(provider.is_ok());

        let partial = partial?;
        assert_eq!(partial.api_key, "env_key");
        assert_eq!(partial.model, "gpt-4o");

        assert!(missing_key
            .unwrap_err()
            .to_string()
            .contains("OPENAI_API_KEY"));
        Ok(())
    }

    #[test]
    fn test_builder_options() {
        let config = OpenAiProviderConfig::new(
            "key".to_string(),
            OPENAI_DEFAULT_HOST.to_string(),
            OPENAI_DEFAULT_MODEL.to_string(),
        )
        .with_temperature(Some(0.2))
        .with_max_tokens(Some(256));

        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.model, "gpt-3.5-turbo");
    }
}
