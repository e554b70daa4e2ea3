//! Async host for the todo state core.
//!
//! # Overview
//! `todo-core` describes the load as an effect; this crate executes it.
//! `TodoStore` owns a controller, runs each fetch on a tokio task through a
//! `Transport`, and applies the result back on the owner's task.
//!
//! # Design
//! - `Transport` is the seam for tests: production uses `ReqwestTransport`,
//!   unit tests use in-memory stubs.
//! - Fetch tasks live in a `JoinSet` owned by the store, so they die with it.

pub mod config;
pub mod error;
pub mod store;
pub mod transport;

pub use config::{RuntimeConfig, DEFAULT_REQUEST_TIMEOUT};
pub use error::RuntimeError;
pub use store::TodoStore;
pub use transport::{ReqwestTransport, Transport};
