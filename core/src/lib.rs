//! I/O-free state core for a todo list.
//!
//! # Overview
//! A pure reducer maps `(list, action)` to the next list, and a
//! `TodoController` owns that list together with a loading flag. Loading from
//! the remote API is an effect the controller describes as data; the host
//! executes the HTTP round-trip and reports the response back
//! (host-does-IO pattern), so everything here stays deterministic and
//! testable.
//!
//! # Design
//! - The reducer never mutates its input and never fails.
//! - The controller queues at most one fetch per activation of the loading
//!   flag and rejects results for any fetch other than the one in flight.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.
//! - Wire DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod reducer;
pub mod types;

pub use client::TodoClient;
pub use config::{ControllerConfig, FailurePolicy, DEFAULT_BASE_URL};
pub use controller::{Effect, LoadOutcome, LoadTicket, TodoController};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use reducer::{next_id, reduce, ReduceFn, TodoAction};
pub use types::{RemoteTodo, Todo, TodoState};
