//! Session token adapters.

mod jwt;

pub use jwt::JwtTokenService;
