//! project-board: terminal board for active and finished projects
//!
//! Projects are added through a validated form and kept in a shared
//! [`services::ProjectState`] store. Two list panels subscribe to the store
//! and re-render whenever it changes; cards move between them by drag and
//! drop over a small retained document model.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::BoardConfig;
pub use error::{AppError, Result};
