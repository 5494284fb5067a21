//! Talking to the EPIC persistent-identifier resolver.
//!
//! The resolver is a plain HTTP API: `GET <base>/<prefix>/<suffix>` returns
//! the handle record as JSON, `POST` with a `URL` form field re-points the
//! handle. [`migrate`] drives batch re-pointing of many handles from a CSV
//! worklist, which is what operators run after a platform base-URL move.

pub mod client;
pub mod migrate;

pub use client::{EpicClient, HandleRecord, HandleValue};
pub use migrate::{migrate_urls, MigrationOptions, MigrationOutcome};
