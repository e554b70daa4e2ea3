//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; the host executes the actual I/O. The only
//! request the core ever needs is a GET, so no method is carried.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross FFI
//! boundaries and task boundaries without lifetime concerns.

/// A GET request described as plain data.
///
/// Built by `TodoClient::build_list_todos`. The host executes it and hands
/// the corresponding `HttpResponse` back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A response with no headers, which is all the parser looks at.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}
