//! Shared configuration, constants and errors for the cardwire crates.

pub mod config;
pub mod constants;
pub mod error;
