//! Trip record source adapters.

pub mod json_file;

pub use json_file::JsonFileSource;
