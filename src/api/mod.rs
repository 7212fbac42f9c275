//! Relationship server integration module.
//!
//! Provides the HTTP client and the models exchanged with the server.

pub mod client;
pub mod error;
pub mod models;

pub use client::{Backend, GenieClient};
pub use error::ApiError;
pub use models::{Link, Page, RelationshipDetail, Row, SeriesTable, StatSeries};
