pub mod commands;
pub mod config;
pub mod error;
pub mod error_handling;
pub mod git;
pub mod github;
pub mod interactive;
pub mod models;
pub mod ui;

pub use error::{Result, SetupError};
pub use models::*;
