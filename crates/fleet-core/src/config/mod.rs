//! Configuration for the fleet CLI (`fleet.toml`).

pub mod schema;
pub mod store;

pub use schema::FleetConfig;
pub use store::ConfigStore;
