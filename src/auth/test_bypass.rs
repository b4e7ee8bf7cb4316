//! Header-based bypass for end-to-end test suites.

use async_trait::async_trait;

use super::credentials::Credentials;
use super::resolver::{AuthScheme, SchemeError};

/// Resolves `X-Test-Auth: true` plus a non-empty `X-Test-User-Id` to that
/// id without verification.
///
/// Only wired into the chain outside production.
pub struct TestBypassScheme;

#[async_trait]
impl AuthScheme for TestBypassScheme {
    fn name(&self) -> &'static str {
        "test-bypass"
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<String, SchemeError> {
        let flag = credentials
            .test_auth
            .as_deref()
            .ok_or(SchemeError::NotApplicable)?;
        if !flag.eq_ignore_ascii_case("true") {
            return Err(SchemeError::Rejected("X-Test-Auth must be \"true\"".into()));
        }

        match credentials.test_user_id.as_deref() {
            Some(user_id) if !user_id.is_empty() => Ok(user_id.to_string()),
            _ => Err(SchemeError::Rejected("X-Test-User-Id missing".into())),
        }
    }
}
