pub mod auth;
pub mod config;
pub mod context;
pub mod jobs;
pub mod report;
