//! # MVVM Application
//!
//! The postline terminal client. Business state lives in `view_models` and
//! never touches the terminal; `io` and `views` are the only layers that do.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use events::{ApiCompletion, ApiRequest, Flow, Focus, RequestTag};
pub use services::{ApiService, Backend, NetworkError, RestClient};
pub use view_models::ViewModel;

// Re-export specific items from commands to avoid conflicts
pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot};
