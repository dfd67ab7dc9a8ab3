//! Domain layer: high-level operations composed from storage and engines.

pub mod planning;

pub use planning::PlanningDomain;
