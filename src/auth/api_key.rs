//! Static API key verification.

use std::collections::HashMap;

use async_trait::async_trait;

use super::credentials::Credentials;
use super::resolver::{AuthScheme, SchemeError};

/// Maps configured API keys to the user they act as.
pub struct ApiKeyScheme {
    keys: HashMap<String, String>,
}

impl ApiKeyScheme {
    /// Parse `key:user-id` entries. Malformed entries are logged and
    /// skipped.
    pub fn from_entries(entries: &[String]) -> Self {
        let mut keys = HashMap::new();
        for entry in entries {
            match entry.split_once(':') {
                Some((key, user_id)) if !key.is_empty() && !user_id.is_empty() => {
                    keys.insert(key.to_string(), user_id.to_string());
                }
                _ => {
                    tracing::warn!("ignoring malformed API key entry, expected key:user-id");
                }
            }
        }
        Self { keys }
    }
}

#[async_trait]
impl AuthScheme for ApiKeyScheme {
    fn name(&self) -> &'static str {
        "api-key"
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<String, SchemeError> {
        let key = credentials
            .api_key
            .as_deref()
            .ok_or(SchemeError::NotApplicable)?;

        self.keys
            .get(key)
            .cloned()
            .ok_or_else(|| SchemeError::Rejected("unknown API key".into()))
    }
}
