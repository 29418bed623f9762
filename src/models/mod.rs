pub mod common;
pub mod engine;
pub mod settings;
pub mod stats;
