//! C-ABI wrapper around `todo-core`'s controller.
//!
//! # Overview
//! Exposes the todo controller through `extern "C"` functions so any
//! language with a C FFI can own a todo list and drive its remote load
//! without linking to an async runtime. The host performs the HTTP
//! round-trip itself: it picks up the pending fetch with
//! `todo_controller_take_request`, executes it, and reports the response
//! with `todo_controller_complete_load`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Mutating calls return an `FfiErrorCode`; calls that hand data back
//!   return heap pointers the C caller releases with the matching
//!   `todo_free_*` function.

pub mod types;

use std::ffi::{c_char, CStr, CString};
use std::panic::catch_unwind;

use todo_core::{
    ApiError, ControllerConfig, Effect, FailurePolicy, HttpResponse, LoadTicket, TodoAction,
    TodoController,
};

use types::*;

/// Borrow a C string as `&str`, treating invalid UTF-8 as empty.
unsafe fn str_arg<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Controller lifecycle
// ---------------------------------------------------------------------------

/// Create a controller that loads from `{base_url}/todos`.
///
/// With `keep_loading_on_error` set, a failed load leaves the loading flag
/// on for good instead of clearing it.
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `todo_controller_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_new(
    base_url: *const c_char,
    keep_loading_on_error: bool,
) -> *mut FfiTodoController {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { str_arg(base_url) };
        let policy = if keep_loading_on_error {
            FailurePolicy::KeepLoading
        } else {
            FailurePolicy::Reset
        };
        let controller = TodoController::new(ControllerConfig::new(url).with_failure_policy(policy));
        Box::into_raw(Box::new(FfiTodoController::new(controller)))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a controller created by `todo_controller_new`. Safe to call with
/// null. A fetch the host is still executing for it must not be reported.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_free(controller: *mut FfiTodoController) {
    if !controller.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(controller) });
        });
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Run `f` against the controller behind `controller`, mapping null and
/// panics to error codes.
fn with_controller(
    controller: *mut FfiTodoController,
    f: impl FnOnce(&mut FfiTodoController) -> FfiErrorCode + std::panic::UnwindSafe,
) -> FfiErrorCode {
    if controller.is_null() {
        return FfiErrorCode::NullArg;
    }
    catch_unwind(|| {
        let controller = unsafe { &mut *controller };
        f(controller)
    })
    .unwrap_or(FfiErrorCode::Panic)
}

/// Append a new item titled `title`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_add(
    controller: *mut FfiTodoController,
    title: *const c_char,
) -> FfiErrorCode {
    if title.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_controller(controller, |c| {
        let title = unsafe { str_arg(title) }.to_string();
        c.inner.add_todo(title);
        FfiErrorCode::Ok
    })
}

/// Flip `completed` on the item with `id`. Unknown ids are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_toggle(controller: *mut FfiTodoController, id: i64) -> FfiErrorCode {
    with_controller(controller, |c| {
        c.inner.toggle_todo(id);
        FfiErrorCode::Ok
    })
}

/// Remove the item with `id`. Unknown ids are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_delete(controller: *mut FfiTodoController, id: i64) -> FfiErrorCode {
    with_controller(controller, |c| {
        c.inner.delete_todo(id);
        FfiErrorCode::Ok
    })
}

/// Apply an action given as JSON, e.g. `{"type":"addTodo","payload":"milk"}`.
///
/// Returns `InvalidAction` if the JSON does not decode. Unrecognised action
/// types decode fine and leave the list unchanged.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_dispatch_json(
    controller: *mut FfiTodoController,
    action_json: *const c_char,
) -> FfiErrorCode {
    if action_json.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_controller(controller, |c| {
        let raw = unsafe { str_arg(action_json) };
        match serde_json::from_str::<TodoAction>(raw) {
            Ok(action) => {
                c.inner.dispatch(action);
                FfiErrorCode::Ok
            }
            Err(_) => FfiErrorCode::InvalidAction,
        }
    })
}

// ---------------------------------------------------------------------------
// Load lifecycle
// ---------------------------------------------------------------------------

/// Switch the loading flag on. If it was off, a fetch becomes available
/// through `todo_controller_take_request`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_load_from_api(controller: *mut FfiTodoController) -> FfiErrorCode {
    with_controller(controller, |c| {
        c.inner.load_from_api();
        FfiErrorCode::Ok
    })
}

/// Whether a load is in progress. False for a null controller.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_is_loading(controller: *const FfiTodoController) -> bool {
    if controller.is_null() {
        return false;
    }
    catch_unwind(|| unsafe { &*controller }.inner.is_loading()).unwrap_or(false)
}

/// Take the next fetch the host should execute.
///
/// Returns null if nothing is pending or `controller` is null.
/// The caller must free the returned pointer with `todo_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_take_request(
    controller: *mut FfiTodoController,
) -> *mut FfiLoadRequest {
    if controller.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| {
        let controller = unsafe { &mut *controller };
        match controller.next_effect() {
            Some(Effect::FetchTodos { ticket, request }) => FfiLoadRequest::from_core(ticket, request),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Report the HTTP response for the fetch identified by `ticket`.
///
/// A null `body` is read as an empty string.
/// The caller must free the returned pointer with `todo_free_load_result`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_complete_load(
    controller: *mut FfiTodoController,
    ticket: u64,
    response: *const FfiHttpResponse,
) -> *mut FfiLoadResult {
    if controller.is_null() {
        return FfiLoadResult::null_arg("controller");
    }
    if response.is_null() {
        return FfiLoadResult::null_arg("response");
    }
    catch_unwind(|| {
        let controller = unsafe { &mut *controller };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            unsafe { str_arg(resp.body) }.to_string()
        };
        let outcome = controller.inner.complete_load(
            LoadTicket::from_raw(ticket),
            Ok(HttpResponse::new(resp.status, body)),
        );
        FfiLoadResult::from_outcome(outcome)
    })
    .unwrap_or_else(|_| FfiLoadResult::panic("panic in todo_controller_complete_load"))
}

/// Report that the fetch identified by `ticket` produced no response.
///
/// `message` may be null.
/// The caller must free the returned pointer with `todo_free_load_result`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_fail_load(
    controller: *mut FfiTodoController,
    ticket: u64,
    message: *const c_char,
) -> *mut FfiLoadResult {
    if controller.is_null() {
        return FfiLoadResult::null_arg("controller");
    }
    catch_unwind(|| {
        let controller = unsafe { &mut *controller };
        let message = if message.is_null() {
            "host transport failure".to_string()
        } else {
            unsafe { str_arg(message) }.to_string()
        };
        let outcome = controller
            .inner
            .complete_load(LoadTicket::from_raw(ticket), Err(ApiError::Transport(message)));
        FfiLoadResult::from_outcome(outcome)
    })
    .unwrap_or_else(|_| FfiLoadResult::panic("panic in todo_controller_fail_load"))
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Snapshot the controller's list, loading flag and last error.
///
/// Returns null if `controller` is null.
/// The caller must free the returned pointer with `todo_free_state`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_state(controller: *const FfiTodoController) -> *mut FfiTodoState {
    if controller.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| FfiTodoState::from_core(unsafe { &*controller }.inner.state()))
        .unwrap_or(std::ptr::null_mut())
}

/// Snapshot the controller as JSON: `{"todos":[...],"isLoading":..,"lastError":..}`.
///
/// Returns null if `controller` is null.
/// The caller must free the returned string with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_controller_state_json(controller: *const FfiTodoController) -> *mut c_char {
    if controller.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| {
        let state = unsafe { &*controller }.inner.state();
        match serde_json::to_string(&state) {
            Ok(json) => to_c_string(&json),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiLoadRequest` returned by `todo_controller_take_request`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_request(req: *mut FfiLoadRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiLoadResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_load_result(result: *mut FfiLoadResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
    });
}

/// Free an `FfiTodoState` returned by `todo_controller_state`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_state(state: *mut FfiTodoState) {
    if state.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let state = unsafe { Box::from_raw(state) };
        if !state.items.is_null() && state.len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(state.items, state.len as usize))
            };
            for item in items.iter() {
                free_c_string(item.title);
            }
        }
        free_c_string(state.last_error);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
