//! Authentication
//!
//! Caller identity resolution from request credential headers. Routes
//! depend on the `CurrentUserResolver` trait; the default implementation
//! chains the configured verification schemes:
//! - Clerk session tokens (RS256, verified against the instance JWKS)
//! - Mobile pairing tokens (HS256, shared secret)
//! - Static API keys (`X-API-Key`)
//! - Test bypass headers (non-production environments only)

mod api_key;
mod clerk;
mod credentials;
mod pairing;
mod resolver;
mod test_bypass;

pub use api_key::ApiKeyScheme;
pub use clerk::ClerkJwtScheme;
pub use credentials::Credentials;
pub use pairing::PairingJwtScheme;
pub use resolver::{AuthScheme, CurrentUserResolver, MultiSchemeResolver, SchemeError};
pub use test_bypass::TestBypassScheme;
