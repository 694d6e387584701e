//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! # Click Processing Flow
//!
//! 1. A redirect resolves a short code
//! 2. [`click_event::ClickEvent`] is pushed onto a bounded channel without waiting
//! 3. [`click_worker::run_click_worker`] applies the increment
//! 4. Failures are logged and dropped

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
