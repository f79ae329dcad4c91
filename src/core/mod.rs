pub mod artifacts;
pub mod config;
pub mod copy;
pub mod download;
pub mod extract;
pub mod pipeline;
pub mod prompt;
