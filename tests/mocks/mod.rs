//! Mock infrastructure for testing external services
//!
//! The only external dependency is the OpenTyphoon API.


pub use opentyphoon::*;
