//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the exporter:
//! - Math types and axis conversion
//! - Ordered keyed tables
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
