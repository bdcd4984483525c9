//! # LickLog Common Library
//!
//! Shared code for the LickLog service and client including:
//! - Lick data model and SQLite persistence
//! - Filter/sort/group engine for lick collections
//! - Lick draft validation
//! - API request/response types
//! - Configuration loading
//! - Date utilities

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod draft;
pub mod error;
pub mod time;

pub use catalog::{LickGroups, SortStrategy, SortedLicks};
pub use error::{Error, FieldError, Result, ValidationError};
