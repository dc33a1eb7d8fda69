//! Proxy module
//!
//! Handles request forwarding to the upstream inference API.

pub mod headers;
pub mod logging;
pub mod opentyphoon;
pub mod provider;

pub use logging::RequestContext;
pub use opentyphoon::OpenTyphoonProvider;
pub use provider::ChatProvider;
