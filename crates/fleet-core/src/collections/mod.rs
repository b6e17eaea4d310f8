//! Per-site collections over remote entities.

pub mod environments;

pub use environments::Environments;
