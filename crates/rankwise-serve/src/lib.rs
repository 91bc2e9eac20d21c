//! Rankwise Serve - HTTP API for exam score ranking estimates.
//!
//! This crate exposes the estimator from `rankwise-core` over a small JSON
//! API. Known (score, ranking) records and the year/combination catalogs are
//! read from ClickHouse; the service never writes.
//!
//! # Architecture
//!
//! - **AppState**: Shared application state (ClickHouse client, catalog cache, configuration)
//! - **Query**: ClickHouse queries, including the [`ClickHouseLookup`] provider
//! - **Cache**: moka cache memoizing the catalogs for a fixed window
//! - **Routes**: Endpoint handlers

pub mod cache;
mod error;
pub mod query;
mod routes;
mod state;

pub use self::cache::{ResponseCache, get_or_compute, new_cache};
pub use self::error::ApiError;
pub use self::query::ClickHouseLookup;
pub use self::routes::router;
pub use self::state::{AppState, Config};
