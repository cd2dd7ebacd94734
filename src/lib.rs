pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod manager;
pub mod mcp;
pub mod models;
pub mod settings;

pub use error::{Result, TodoError};
pub use manager::TodoManager;
pub use models::*;
pub use settings::Settings;
