//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Random short code generation
//! - [`validation`] - Custom slug and target URL checks

pub mod code_generator;
pub mod validation;
