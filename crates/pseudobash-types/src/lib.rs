//! Foundation types for pseudobash.
//!
//! This crate holds what every other pseudobash crate shares: the error
//! taxonomy reported by command handlers and the TOML-backed shell
//! configuration.

pub mod config;
pub mod error;
