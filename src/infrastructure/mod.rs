//! Infrastructure layer: configuration and other external concerns.

pub mod config;
