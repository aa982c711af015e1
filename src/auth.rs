//! Client credentials, token-request headers, and authorization request parameters.

pub mod credentials;
pub mod params;

pub use credentials::*;
pub use params::*;
