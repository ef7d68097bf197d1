//! Session authentication for the Curio API
//!
//! Issues and verifies the signed session token carried in the
//! `artifactToken` cookie, and provides the axum extractor that guards
//! owner-scoped routes. Works with any state implementing `FromRef<S>`
//! for `TokenService`.

mod claims;
mod config;
mod cookie;
mod error;
mod extractors;
mod jwt;
mod service;

pub use claims::SessionClaims;
pub use config::AuthConfig;
pub use cookie::SESSION_COOKIE_NAME;
pub use error::AuthError;
pub use extractors::SessionUser;
pub use service::TokenService;
