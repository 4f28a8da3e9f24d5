pub mod activity_store;
pub mod block_repository;
pub mod calendar_source;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod state_store;
