//! Core value types for vibecontrols.
//!
//! This crate contains the dynamic value model shared by every control type,
//! with no IO, no async, and minimal dependencies.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod value;

pub use value::{UnsupportedJsonError, Value, ValueKind};
