//! ChatKit / OpenAI upstream configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the ChatKit workflow and the Chat Completions fallback
#[derive(Debug, Clone, Deserialize)]
pub struct ChatKitConfig {
    /// OpenAI API key. Absence is not a boot failure: requests are then
    /// rejected as unconfigured without any upstream call.
    pub openai_api_key: Option<String>,

    /// Workflow identifier selecting the remote conversational pipeline
    #[serde(default = "default_workflow_id")]
    pub workflow_id: String,

    /// Base URL for the ChatKit API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used by the Chat Completions fallback
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Session creation timeout in seconds
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,

    /// Message dispatch timeout in seconds (longer: generation happens here)
    #[serde(default = "default_message_timeout")]
    pub message_timeout_secs: u64,

    /// Fallback completion timeout in seconds
    #[serde(default = "default_fallback_timeout")]
    pub fallback_timeout_secs: u64,
}

impl ChatKitConfig {
    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Session creation timeout as Duration
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    /// Message dispatch timeout as Duration
    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    /// Fallback completion timeout as Duration
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout_secs)
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.workflow_id.is_empty() {
            return Err(ValidationError::EmptyWorkflowId);
        }
        if self.fallback_model.is_empty() {
            return Err(ValidationError::EmptyFallbackModel);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidChatKitBaseUrl);
        }
        if self.session_timeout_secs == 0
            || self.message_timeout_secs == 0
            || self.fallback_timeout_secs == 0
        {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ChatKitConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            workflow_id: default_workflow_id(),
            base_url: default_base_url(),
            fallback_model: default_fallback_model(),
            session_timeout_secs: default_session_timeout(),
            message_timeout_secs: default_message_timeout(),
            fallback_timeout_secs: default_fallback_timeout(),
        }
    }
}

fn default_workflow_id() -> String {
    "wf_6907b12d71208190aebedcd7523c1d8d0a79856e2c61f448".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_fallback_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_session_timeout() -> u64 {
    30
}

fn default_message_timeout() -> u64 {
    60
}

fn default_fallback_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chatkit_config_defaults() {
        let config = ChatKitConfig::default();
        assert!(config.workflow_id.starts_with("wf_"));
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.fallback_model, "gpt-4o-mini");
        assert_eq!(config.session_timeout_secs, 30);
        assert_eq!(config.message_timeout_secs, 60);
        assert_eq!(config.fallback_timeout_secs, 60);
    }

    #[test]
    fn test_has_api_key() {
        let mut config = ChatKitConfig::default();
        assert!(!config.has_api_key());

        config.openai_api_key = Some(String::new());
        assert!(!config.has_api_key());

        config.openai_api_key = Some("sk-xxx".to_string());
        assert!(config.has_api_key());
    }

    #[test]
    fn test_timeout_durations() {
        let config = ChatKitConfig {
            session_timeout_secs: 10,
            message_timeout_secs: 20,
            fallback_timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.session_timeout(), Duration::from_secs(10));
        assert_eq!(config.message_timeout(), Duration::from_secs(20));
        assert_eq!(config.fallback_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_empty_workflow() {
        let config = ChatKitConfig {
            workflow_id: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = ChatKitConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = ChatKitConfig {
            message_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_key_is_allowed() {
        // A missing key is surfaced per request, not at boot.
        let config = ChatKitConfig::default();
        assert!(config.validate().is_ok());
    }
}
