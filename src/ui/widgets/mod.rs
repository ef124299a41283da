//! Reusable UI widgets for the project board.

pub mod help;
pub mod project_form;
pub mod project_panel;
pub mod text_input;
