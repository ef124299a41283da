//! Domain entities for project-board.
//!
//! - Project: a tracked unit of work and its status
//! - Validation: constraint checks for user input

mod project;
mod validation;

pub use project::{Project, ProjectId, ProjectStatus};
pub use validation::{validate, Validatable, Value};
