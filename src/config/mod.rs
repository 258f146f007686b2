//! Configuration module for payday-ledger
//!
//! - Path resolution for settings and data files
//! - Application settings persistence

pub mod paths;
pub mod settings;

pub use paths::PaydayPaths;
pub use settings::Settings;
