//! Live adapters for real external interactions.

pub mod analysis;
pub mod comparison;
pub mod files;
