//! Core of a day-planner time-blocking scheduler: minute-precision time
//! blocks on a day grid, activity cards derived from projects, routines,
//! and tasks, and a placement engine that rejects overlaps with existing
//! blocks and calendar events.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::placement::{PlacementEngine, PlacementError};
pub use application::planner::Planner;
pub use application::state_sync::{FlushOutcome, StateSyncService};
pub use domain::interval::MinuteInterval;
pub use domain::models::{ActivityCard, ActivityKind, DropPayload, TimeBlock};
pub use infrastructure::config::PlannerConfig;
pub use infrastructure::error::PlannerError;
