//! Database models and queries

pub mod init;
pub mod licks;
pub mod models;
pub mod notes;

pub use init::*;
pub use models::*;
