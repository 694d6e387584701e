//! Application layer services implementing business logic.
//!
//! Services orchestrate validation, code generation and repository calls and
//! expose a small API to the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link registration
//! - [`services::redirect_service::RedirectService`] - Resolution and click dispatch

pub mod services;
