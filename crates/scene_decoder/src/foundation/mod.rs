//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the decoder:
//! - Math types and operations
//! - Logging utilities

pub mod math;
pub mod logging;
