//! Credential management for external services
//!
//! Handles secure loading and validation of API keys and social platform
//! credentials from environment variables.

use crate::ports::content::ContentError;
use std::env;
use std::fmt;

/// Environment variable name for the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable name for the Facebook page access token
pub const FACEBOOK_ACCESS_TOKEN_ENV: &str = "FACEBOOK_ACCESS_TOKEN";

/// Environment variable name for the Facebook page ID
pub const FACEBOOK_PAGE_ID_ENV: &str = "FACEBOOK_PAGE_ID";

/// Environment variable name for the Instagram business account ID
pub const INSTAGRAM_BUSINESS_ACCOUNT_ID_ENV: &str = "INSTAGRAM_BUSINESS_ACCOUNT_ID";

/// A wrapper for API keys that prevents accidental logging
///
/// The `Debug` and `Display` implementations mask the actual key value
/// to prevent sensitive data from appearing in logs.
#[derive(Clone)]
pub struct SecretApiKey {
    key: String,
}

impl SecretApiKey {
    /// Creates a new SecretApiKey from a string
    ///
    /// # Arguments
    /// * `key` - The API key string
    ///
    /// # Returns
    /// * `Some(SecretApiKey)` if the key is non-empty
    /// * `None` if the key is empty or whitespace-only
    pub fn new(key: String) -> Option<Self> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                key: trimmed.to_string(),
            })
        }
    }

    /// Returns the actual API key value
    ///
    /// Use this only when actually making API calls.
    /// Never log the returned value.
    pub fn expose(&self) -> &str {
        &self.key
    }
}

// Prevent API key from appearing in debug output
impl fmt::Debug for SecretApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretApiKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

// Prevent API key from appearing in display output
impl fmt::Display for SecretApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

/// Social platform credentials loaded from the environment
///
/// Instagram posting piggybacks on the Facebook Graph API, so the access
/// token is shared. A platform is enabled when all of its identifiers are
/// present; missing credentials disable posting rather than failing the run.
#[derive(Debug, Clone)]
pub struct SocialCredentials {
    /// Facebook Graph API access token, shared with Instagram
    pub access_token: Option<SecretApiKey>,
    /// Facebook page ID
    pub page_id: Option<String>,
    /// Instagram business account ID
    pub instagram_account_id: Option<String>,
}

impl SocialCredentials {
    /// Loads social credentials from environment variables
    ///
    /// Never fails: absent variables leave the corresponding field `None`.
    pub fn from_env() -> Self {
        Self {
            access_token: env::var(FACEBOOK_ACCESS_TOKEN_ENV)
                .ok()
                .and_then(SecretApiKey::new),
            page_id: non_empty(env::var(FACEBOOK_PAGE_ID_ENV).ok()),
            instagram_account_id: non_empty(env::var(INSTAGRAM_BUSINESS_ACCOUNT_ID_ENV).ok()),
        }
    }

    /// True when Facebook posting is configured
    pub fn facebook_enabled(&self) -> bool {
        self.access_token.is_some() && self.page_id.is_some()
    }

    /// True when Instagram posting is configured
    ///
    /// Instagram requires the Facebook access token and page (for image
    /// hosting) plus the business account ID.
    pub fn instagram_enabled(&self) -> bool {
        self.facebook_enabled() && self.instagram_account_id.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Manages the OpenAI API key
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Loads the OpenAI API key from the environment
    ///
    /// # Returns
    /// * `Ok(SecretApiKey)` - The API key wrapped in SecretApiKey
    /// * `Err(ContentError::Unauthorized)` - If the key is not set or empty
    ///
    /// # Example
    /// ```no_run
    /// use crier_core::api_key::ApiKeyManager;
    ///
    /// let key = ApiKeyManager::load_openai_key().expect("API key not set");
    /// ```
    pub fn load_openai_key() -> Result<SecretApiKey, ContentError> {
        match env::var(OPENAI_API_KEY_ENV) {
            Ok(key) => SecretApiKey::new(key).ok_or(ContentError::Unauthorized),
            Err(_) => Err(ContentError::Unauthorized),
        }
    }

    /// Generates a helpful error message when the OpenAI key is missing
    pub fn missing_key_guidance() -> String {
        format!(
            r#"OpenAI API key is not configured.

To set up your API key:

1. Create a .env file in your project root:
   {OPENAI_API_KEY_ENV}=your-api-key-here

2. Or set the environment variable directly:
   export {OPENAI_API_KEY_ENV}=your-api-key-here

For more information: https://platform.openai.com/api-keys"#
        )
    }

    /// Checks if the OpenAI API key is available
    ///
    /// This is a non-destructive check that doesn't expose the key.
    pub fn is_key_available() -> bool {
        Self::load_openai_key().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    // Serializes tests that touch process environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Helper to set/unset environment variables safely
    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &'static str) -> Self {
            let original = env::var(key).ok();
            Self { key, original }
        }

        fn set(&self, value: &str) {
            env::set_var(self.key, value);
        }

        fn unset(&self) {
            env::remove_var(self.key);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }

    // === SecretApiKey Tests ===

    #[test]
    fn test_secret_api_key_new_valid() {
        let key = SecretApiKey::new("sk-test-key-123".to_string());
        assert!(key.is_some());
    }

    #[test]
    fn test_secret_api_key_new_empty() {
        let key = SecretApiKey::new("".to_string());
        assert!(key.is_none());
    }

    #[test]
    fn test_secret_api_key_new_whitespace_only() {
        let key = SecretApiKey::new("   \t\n  ".to_string());
        assert!(key.is_none());
    }

    #[test]
    fn test_secret_api_key_trims_whitespace() {
        let key = SecretApiKey::new("  sk-test-key  ".to_string()).unwrap();
        assert_eq!(key.expose(), "sk-test-key");
    }

    #[test]
    fn test_secret_api_key_debug_redacted() {
        let key = SecretApiKey::new("super-secret-key".to_string()).unwrap();
        let debug_str = format!("{:?}", key);

        // Should not contain the actual key
        assert!(!debug_str.contains("super-secret-key"));
        // Should contain REDACTED
        assert!(debug_str.contains("REDACTED"));
    }

    #[test]
    fn test_secret_api_key_display_redacted() {
        let key = SecretApiKey::new("super-secret-key".to_string()).unwrap();
        let display_str = format!("{}", key);

        assert!(!display_str.contains("super-secret-key"));
        assert!(display_str.contains("REDACTED"));
    }

    #[test]
    fn test_secret_api_key_clone() {
        let key = SecretApiKey::new("cloneable-key".to_string()).unwrap();
        let cloned = key.clone();

        assert_eq!(key.expose(), cloned.expose());
    }

    // === ApiKeyManager Tests ===

    #[test]
    fn test_load_openai_key_success() {
        let _lock = env_lock();
        let guard = EnvGuard::new(OPENAI_API_KEY_ENV);
        guard.set("test-api-key-12345");

        let result = ApiKeyManager::load_openai_key();
        assert!(result.is_ok());
        assert_eq!(result.unwrap().expose(), "test-api-key-12345");
    }

    #[test]
    fn test_load_openai_key_not_set() {
        let _lock = env_lock();
        let guard = EnvGuard::new(OPENAI_API_KEY_ENV);
        guard.unset();

        let result = ApiKeyManager::load_openai_key();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ContentError::Unauthorized));
    }

    #[test]
    fn test_load_openai_key_empty() {
        let _lock = env_lock();
        let guard = EnvGuard::new(OPENAI_API_KEY_ENV);
        guard.set("");

        let result = ApiKeyManager::load_openai_key();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ContentError::Unauthorized));
    }

    #[test]
    fn test_missing_key_guidance() {
        let guidance = ApiKeyManager::missing_key_guidance();

        assert!(guidance.contains("OPENAI_API_KEY"));
        assert!(guidance.contains(".env"));
        assert!(guidance.contains("export"));
    }

    // === SocialCredentials Tests ===

    #[test]
    fn test_social_credentials_all_present() {
        let _lock = env_lock();
        let token_guard = EnvGuard::new(FACEBOOK_ACCESS_TOKEN_ENV);
        let page_guard = EnvGuard::new(FACEBOOK_PAGE_ID_ENV);
        let ig_guard = EnvGuard::new(INSTAGRAM_BUSINESS_ACCOUNT_ID_ENV);
        token_guard.set("fb-token");
        page_guard.set("123456");
        ig_guard.set("789012");

        let creds = SocialCredentials::from_env();
        assert!(creds.facebook_enabled());
        assert!(creds.instagram_enabled());
        assert_eq!(creds.page_id.as_deref(), Some("123456"));
    }

    #[test]
    fn test_social_credentials_facebook_only() {
        let _lock = env_lock();
        let token_guard = EnvGuard::new(FACEBOOK_ACCESS_TOKEN_ENV);
        let page_guard = EnvGuard::new(FACEBOOK_PAGE_ID_ENV);
        let ig_guard = EnvGuard::new(INSTAGRAM_BUSINESS_ACCOUNT_ID_ENV);
        token_guard.set("fb-token");
        page_guard.set("123456");
        ig_guard.unset();

        let creds = SocialCredentials::from_env();
        assert!(creds.facebook_enabled());
        assert!(!creds.instagram_enabled());
    }

    #[test]
    fn test_social_credentials_none_present() {
        let _lock = env_lock();
        let token_guard = EnvGuard::new(FACEBOOK_ACCESS_TOKEN_ENV);
        let page_guard = EnvGuard::new(FACEBOOK_PAGE_ID_ENV);
        let ig_guard = EnvGuard::new(INSTAGRAM_BUSINESS_ACCOUNT_ID_ENV);
        token_guard.unset();
        page_guard.unset();
        ig_guard.unset();

        let creds = SocialCredentials::from_env();
        assert!(!creds.facebook_enabled());
        assert!(!creds.instagram_enabled());
    }

    #[test]
    fn test_social_credentials_instagram_needs_facebook_token() {
        let _lock = env_lock();
        let token_guard = EnvGuard::new(FACEBOOK_ACCESS_TOKEN_ENV);
        let page_guard = EnvGuard::new(FACEBOOK_PAGE_ID_ENV);
        let ig_guard = EnvGuard::new(INSTAGRAM_BUSINESS_ACCOUNT_ID_ENV);
        token_guard.unset();
        page_guard.unset();
        ig_guard.set("789012");

        let creds = SocialCredentials::from_env();
        assert!(!creds.instagram_enabled());
    }
}
