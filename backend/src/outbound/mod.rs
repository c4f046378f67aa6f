//! Outbound adapters implementing the history store port.
//!
//! - **persistence**: PostgreSQL-backed history using Diesel.
//! - **memory**: bounded process-memory history.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business logic.

pub mod memory;
pub mod persistence;
