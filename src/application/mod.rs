pub mod availability;
pub mod bootstrap;
pub mod catalog;
pub mod placement;
pub mod planner;
pub mod state_sync;
