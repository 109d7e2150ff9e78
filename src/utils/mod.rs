//! Utility functions and helpers for the altgen engine.
//!
//! This module provides cross-cutting concerns like structured logging
//! and credential sanitization.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization with security filters.

pub mod logging;
