// Common library for the hourly content-posting bot

pub mod compose;
pub mod config;
pub mod content;
pub mod errors;
pub mod mastodon;
pub mod publisher;
pub mod scheduler;
pub mod telemetry;
