//! # Wiring Support
//!
//! Shared helpers for the wiring crates.
//!
//! This crate provides:
//! - Rendering of resolution paths and type names for diagnostics
//! - "Did you mean" suggestions for unknown identifiers

pub mod rendering;
