//! Core domain entities.
//!
//! The registry persists exactly one kind of record:
//!
//! - [`ShortLink`] - a stored token-to-URL mapping with its click counter
//! - [`NewShortLink`] - the input used to register one

pub mod link;

pub use link::{NewShortLink, ShortLink};
