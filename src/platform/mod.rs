//! Safe wrappers for fallible platform capabilities
//!
//! Each submodule wraps exactly one capability, catching its failures at the
//! call boundary and converting them into classified outcome values:
//! - [`json`]: parsing and serialization
//! - [`urls`]: URL construction
//! - [`http`]: network fetching

pub mod http;
pub mod json;
pub mod urls;
