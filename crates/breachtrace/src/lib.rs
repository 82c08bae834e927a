//! Breachtrace - compromise blast-radius analysis over access logs.
//!
//! Starting from one suspicious user, breachtrace walks user→computer activity
//! and computer→user access records breadth-first and reports every user and
//! computer transitively affected, together with an ordered investigation
//! trace.
//!
//! The pieces are usable on their own:
//! - [`index::LogIndex`] builds the read-only lookup mappings
//! - [`propagation::analyze`] runs one traversal
//! - [`sink::ResultSink`] exposes the trace and summary for persistence

#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod index;
pub mod ingest;
pub mod propagation;
pub mod sink;

pub use error::{Error, Result};
