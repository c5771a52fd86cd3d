//! `stockcast-core` — shared building blocks for the forecasting workspace.
//!
//! Identifiers and the domain error; no numeric or I/O concerns.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ProductId, TenantId};
