//! # Camerata Common Library
//!
//! Shared code for the camerata content-sync workspace including:
//! - Data models (events, repertoire, cachet, gallery)
//! - Backend configuration resolution
//! - Common error type
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
