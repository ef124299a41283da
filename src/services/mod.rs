//! Services for project-board.
//!
//! - project_state: Observable project store with listener subscriptions

pub mod project_state;

pub use project_state::{ProjectState, Subscription};
