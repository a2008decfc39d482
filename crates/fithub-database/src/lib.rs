//! # fithub-database
//!
//! The data-access boundary of FitHub: typed repository traits plus an
//! in-memory store and PostgreSQL implementations selected by
//! configuration.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{Repositories, StoreHealth};
