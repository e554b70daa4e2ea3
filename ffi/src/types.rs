//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::collections::VecDeque;
use std::ffi::CString;
use std::os::raw::c_char;

use todo_core::{ApiError, Effect, HttpRequest, LoadOutcome, LoadTicket, TodoState};

/// Opaque handle to a `TodoController`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiTodoController {
    pub(crate) inner: todo_core::TodoController,
    pub(crate) pending: VecDeque<Effect>,
}

impl FfiTodoController {
    pub(crate) fn new(inner: todo_core::TodoController) -> Self {
        Self {
            inner,
            pending: VecDeque::new(),
        }
    }

    /// Next fetch the host has not picked up yet.
    pub(crate) fn next_effect(&mut self) -> Option<Effect> {
        self.pending.extend(self.inner.take_effects());
        self.pending.pop_front()
    }
}

/// Convert to an owned C string. Interior NULs are dropped rather than
/// failing the whole call.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A pending fetch: GET `path` with `headers`, then report the response
/// through `todo_controller_complete_load` with the same `ticket`.
#[repr(C)]
pub struct FfiLoadRequest {
    pub ticket: u64,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiLoadRequest {
    /// Convert a core request into a heap-allocated `FfiLoadRequest`.
    pub(crate) fn from_core(ticket: LoadTicket, req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiLoadRequest {
            ticket: ticket.as_raw(),
            path: to_c_string(&req.path),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing the fetch,
/// then passes a pointer to `todo_controller_complete_load`. The FFI layer
/// reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Status codes returned by every fallible FFI function.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Transport = 4,
    Stale = 5,
    Panic = 6,
    NullArg = 7,
    InvalidAction = 8,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::HttpError { .. } => FfiErrorCode::Http,
            ApiError::DeserializationError(_) => FfiErrorCode::Deserialization,
            ApiError::Transport(_) => FfiErrorCode::Transport,
        }
    }
}

/// Outcome of reporting a fetch back to the controller.
///
/// On success `error_code` is `Ok`, `error_message` is null and `count` is
/// the number of items now held. Otherwise `error_message` is a
/// human-readable C string and `count` is 0.
#[repr(C)]
pub struct FfiLoadResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub count: u32,
}

impl FfiLoadResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        count: u32,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiLoadResult {
            error_code,
            error_message,
            http_status,
            count,
        }))
    }

    pub(crate) fn from_outcome(outcome: LoadOutcome) -> *mut Self {
        match outcome {
            LoadOutcome::Applied { count } => {
                Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 200, count as u32)
            }
            LoadOutcome::Failed(err) => {
                let http_status = match &err {
                    ApiError::NotFound => 404,
                    ApiError::HttpError { status, .. } => *status,
                    _ => 0,
                };
                Self::boxed((&err).into(), to_c_string(&err.to_string()), http_status, 0)
            }
            LoadOutcome::Stale => Self::boxed(
                FfiErrorCode::Stale,
                to_c_string("ticket does not match the load in flight"),
                0,
                0,
            ),
        }
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, to_c_string(&msg), 0, 0)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, to_c_string(msg), 0, 0)
    }
}

/// A single todo item exposed to C.
#[repr(C)]
pub struct FfiTodo {
    pub id: i64,
    pub title: *mut c_char,
    pub completed: bool,
}

/// Snapshot of the controller exposed to C.
///
/// `last_error` is null unless the most recent load failed.
#[repr(C)]
pub struct FfiTodoState {
    pub items: *mut FfiTodo,
    pub len: u32,
    pub is_loading: bool,
    pub last_error: *mut c_char,
}

impl FfiTodoState {
    pub(crate) fn from_core(state: TodoState) -> *mut Self {
        let len = state.todos.len() as u32;
        let items = if state.todos.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_todos: Box<[FfiTodo]> = state
                .todos
                .iter()
                .map(|t| FfiTodo {
                    id: t.id,
                    title: to_c_string(&t.title),
                    completed: t.completed,
                })
                .collect();
            Box::into_raw(ffi_todos) as *mut FfiTodo
        };

        let last_error = match state.last_error {
            Some(msg) => to_c_string(&msg),
            None => std::ptr::null_mut(),
        };

        Box::into_raw(Box::new(FfiTodoState {
            items,
            len,
            is_loading: state.is_loading,
            last_error,
        }))
    }
}
