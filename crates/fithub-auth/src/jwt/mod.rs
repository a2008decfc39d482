//! Session token encoding, decoding, and revocation.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod revocation;

pub use claims::{Claims, TokenKind};
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
pub use revocation::RevocationList;
