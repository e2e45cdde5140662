//! Formatting helpers for catalog output.

pub mod format;

pub use format::{age_display, format_minutes};
