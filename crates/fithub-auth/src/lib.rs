//! # fithub-auth
//!
//! Authentication and authorization for FitHub.
//!
//! ## Modules
//!
//! - `jwt`: session token issuing, verification, and the revocation list
//! - `cookie`: `Set-Cookie` construction and cookie/bearer extraction
//! - `password`: Argon2id hashing and password policy
//! - `rbac`: role gates guarding the member, staff, and admin areas
//! - `oauth`: external identity providers and the authorization-code flow
//! - `session`: login, registration, device trust, and identity sync

pub mod cookie;
pub mod jwt;
pub mod oauth;
pub mod password;
pub mod rbac;
pub mod session;

pub use cookie::CookiePolicy;
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, RevocationList, TokenKind};
pub use oauth::{ExternalIdentity, IdentityProvider, IdentityProviders};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RoleGate;
pub use session::SessionManager;
