//! Domain types for the todo list.
//!
//! # Design
//! `Todo` is the local record the controller holds. `RemoteTodo` mirrors the
//! wire shape of the remote collection, which carries an owner id the local
//! model does not keep. The mock-server crate defines its own copy of the
//! wire type; integration tests catch any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A single todo item held in local state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: i64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
        }
    }
}

/// A todo record as returned by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTodo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

impl From<RemoteTodo> for Todo {
    fn from(remote: RemoteTodo) -> Self {
        Self {
            id: remote.id,
            title: remote.title,
            completed: remote.completed,
        }
    }
}

/// Point-in-time view of the controller, as handed to a rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}
