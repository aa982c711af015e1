//! Provider-facing descriptors (data), profile shapes, and the backend contract (behavior).
//!
//! `descriptor` exposes the Defy Ventures constants (name, endpoint paths, setting prefix,
//! token method, extra-data fields) and the endpoint set derived from a base URL.
//! `profile` normalizes the provider's user JSON into canonical [`UserDetails`].
//! `contract` defines [`SocialBackend`], the hooks a social-auth engine calls on every backend.

pub mod contract;
pub mod descriptor;
pub mod profile;

pub use contract::*;
pub use descriptor::*;
pub use profile::*;
