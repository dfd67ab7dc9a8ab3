//! Planning algorithms: prioritization, next-action selection, and
//! horizon views.

pub mod horizon;
pub mod next_action;
pub mod prioritize;

pub use horizon::{generate_named_view, generate_view, Horizon};
pub use next_action::{apply_next_actions, select_next_actions, NextAction};
pub use prioritize::{ClassificationStrategy, PrioritizationEngine, PrioritizationSummary};
