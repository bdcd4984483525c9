//! HTTP API handlers for licklog-api

pub mod health;
pub mod licks;
pub mod notes;
pub mod practice;

pub use health::health_routes;
pub use licks::lick_routes;
pub use notes::note_routes;
pub use practice::practice_routes;
