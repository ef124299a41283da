//! UI for the project board.
//!
//! This module contains:
//! - document: Element tree, templates and event dispatch
//! - components: Form, list panels and project cards mounted into the document
//! - templates: The board's host document
//! - layout: Terminal rendering of the document
//! - input: Keyboard input handling
//! - widgets: Reusable UI widgets

pub mod components;
pub mod document;
pub mod input;
pub mod layout;
pub mod templates;
pub mod widgets;
