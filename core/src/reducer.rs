//! Pure state transition function for the todo list.
//!
//! # Design
//! `reduce` takes the current list by reference and always returns a fresh
//! `Vec`, so callers can keep the previous value around. No transition can
//! fail: ids that match nothing leave the list as it was.
//!
//! `TodoAction` is closed, but it also decodes from the tagged JSON shape
//! `{"type": ..., "payload": ...}` that hosts send across the FFI boundary.
//! Tags this crate does not know decode to `TodoAction::Unknown` whatever
//! their payload, and the reducer answers them with an unchanged list.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::Todo;

/// Every transition the reducer understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum TodoAction {
    /// Append a new, not yet completed item with a fresh id.
    #[serde(rename = "addTodo")]
    Add(String),

    /// Flip `completed` on the item with this id.
    #[serde(rename = "toggleTodo")]
    Toggle(i64),

    /// Remove the item with this id.
    #[serde(rename = "deleteTodo")]
    Delete(i64),

    /// Replace the whole list, verbatim.
    #[serde(rename = "setTodos")]
    SetAll(Vec<Todo>),

    /// An action tag this crate does not recognise. Leaves the list unchanged.
    #[serde(rename = "unknown")]
    Unknown,
}

/// Wire shape before the tag is looked at.
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

impl<'de> Deserialize<'de> for TodoAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAction::deserialize(deserializer)?;
        let payload = raw.payload.unwrap_or(Value::Null);
        let action = match raw.kind.as_str() {
            "addTodo" => serde_json::from_value(payload).map(TodoAction::Add),
            "toggleTodo" => serde_json::from_value(payload).map(TodoAction::Toggle),
            "deleteTodo" => serde_json::from_value(payload).map(TodoAction::Delete),
            "setTodos" => serde_json::from_value(payload).map(TodoAction::SetAll),
            _ => return Ok(TodoAction::Unknown),
        };
        action.map_err(|err| de::Error::custom(format!("{}: {err}", raw.kind)))
    }
}

impl TodoAction {
    /// Wire tag of the action, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            TodoAction::Add(_) => "addTodo",
            TodoAction::Toggle(_) => "toggleTodo",
            TodoAction::Delete(_) => "deleteTodo",
            TodoAction::SetAll(_) => "setTodos",
            TodoAction::Unknown => "unknown",
        }
    }
}

/// Signature shared by `reduce` and any replacement reducer a controller is
/// built with.
pub type ReduceFn = fn(&[Todo], TodoAction) -> Vec<Todo>;

/// Id the next `Add` will assign: one past the largest id held, never below 1.
///
/// Saturates at `i64::MAX`: once a list holds that id, every later `Add`
/// reuses it instead of overflowing.
pub fn next_id(todos: &[Todo]) -> i64 {
    todos
        .iter()
        .fold(1, |next, todo| next.max(todo.id.saturating_add(1)))
}

/// Apply `action` to `todos` and return the resulting list.
pub fn reduce(todos: &[Todo], action: TodoAction) -> Vec<Todo> {
    match action {
        TodoAction::Add(title) => {
            let id = next_id(todos);
            let mut next = Vec::with_capacity(todos.len() + 1);
            next.extend_from_slice(todos);
            next.push(Todo {
                id,
                title,
                completed: false,
            });
            next
        }
        TodoAction::Toggle(id) => todos
            .iter()
            .map(|todo| {
                if todo.id == id {
                    Todo {
                        completed: !todo.completed,
                        ..todo.clone()
                    }
                } else {
                    todo.clone()
                }
            })
            .collect(),
        TodoAction::Delete(id) => todos.iter().filter(|todo| todo.id != id).cloned().collect(),
        TodoAction::SetAll(items) => items,
        TodoAction::Unknown => todos.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo::new(id, title, completed)
    }

    #[test]
    fn add_to_empty_list_starts_at_one() {
        let next = reduce(&[], TodoAction::Add("first".to_string()));
        assert_eq!(next, vec![todo(1, "first", false)]);
    }

    #[test]
    fn add_skips_past_gaps_left_by_deletes() {
        let todos = vec![todo(1, "a", false), todo(7, "b", true)];
        let next = reduce(&todos, TodoAction::Add("c".to_string()));
        assert_eq!(next.last(), Some(&todo(8, "c", false)));
    }

    #[test]
    fn add_after_negative_ids_still_starts_at_one() {
        let todos = vec![todo(-4, "a", false)];
        assert_eq!(next_id(&todos), 1);
    }

    #[test]
    fn add_rescans_ids_supplied_by_set_all() {
        let loaded = reduce(&[todo(1, "a", false)], TodoAction::SetAll(vec![todo(200, "x", true)]));
        let next = reduce(&loaded, TodoAction::Add("y".to_string()));
        assert_eq!(next[1].id, 201);
    }

    #[test]
    fn add_does_not_touch_input() {
        let todos = vec![todo(1, "a", false)];
        let _ = reduce(&todos, TodoAction::Add("b".to_string()));
        assert_eq!(todos, vec![todo(1, "a", false)]);
    }

    #[test]
    fn next_id_saturates_at_max() {
        let todos = vec![todo(i64::MAX, "a", false)];
        assert_eq!(next_id(&todos), i64::MAX);

        let next = reduce(&todos, TodoAction::Add("b".to_string()));
        assert_eq!(next, vec![todo(i64::MAX, "a", false), todo(i64::MAX, "b", false)]);
    }

    #[test]
    fn toggle_unknown_id_is_a_no_op() {
        let todos = vec![todo(1, "a", false)];
        assert_eq!(reduce(&todos, TodoAction::Toggle(99)), todos);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let todos = vec![todo(1, "a", false), todo(2, "b", true)];
        assert_eq!(reduce(&todos, TodoAction::Delete(3)), todos);
    }

    #[test]
    fn delete_removes_every_duplicate() {
        let todos = vec![todo(4, "a", false), todo(5, "b", false), todo(4, "c", true)];
        assert_eq!(reduce(&todos, TodoAction::Delete(4)), vec![todo(5, "b", false)]);
    }

    #[test]
    fn unknown_action_keeps_list() {
        let todos = vec![todo(1, "a", true)];
        assert_eq!(reduce(&todos, TodoAction::Unknown), todos);
    }

    #[test]
    fn add_toggle_delete_scenario() {
        let s = vec![todo(1, "a", false)];

        let s = reduce(&s, TodoAction::Add("b".to_string()));
        assert_eq!(s, vec![todo(1, "a", false), todo(2, "b", false)]);

        let s = reduce(&s, TodoAction::Toggle(2));
        assert_eq!(s, vec![todo(1, "a", false), todo(2, "b", true)]);

        let s = reduce(&s, TodoAction::Delete(1));
        assert_eq!(s, vec![todo(2, "b", true)]);
    }

    #[test]
    fn action_decodes_from_tagged_json() {
        let add: TodoAction =
            serde_json::from_str(r#"{"type":"addTodo","payload":"milk"}"#).unwrap();
        assert_eq!(add, TodoAction::Add("milk".to_string()));

        let toggle: TodoAction =
            serde_json::from_str(r#"{"type":"toggleTodo","payload":3}"#).unwrap();
        assert_eq!(toggle, TodoAction::Toggle(3));

        let set: TodoAction = serde_json::from_str(
            r#"{"type":"setTodos","payload":[{"id":2,"title":"t","completed":true}]}"#,
        )
        .unwrap();
        assert_eq!(set, TodoAction::SetAll(vec![todo(2, "t", true)]));
    }

    #[test]
    fn unrecognised_tag_decodes_to_unknown() {
        let action: TodoAction = serde_json::from_str(r#"{"type":"clearCompleted"}"#).unwrap();
        assert_eq!(action, TodoAction::Unknown);
    }

    #[test]
    fn unrecognised_tag_ignores_any_payload() {
        for raw in [
            r#"{"type":"clearCompleted","payload":5}"#,
            r#"{"type":"clearCompleted","payload":{"ids":[1,2]}}"#,
            r#"{"payload":"x","type":"archive"}"#,
            r#"{"type":"archive","payload":null}"#,
        ] {
            let action: TodoAction = serde_json::from_str(raw).unwrap();
            assert_eq!(action, TodoAction::Unknown, "{raw}");
        }
    }

    #[test]
    fn known_tag_accepts_payload_first() {
        let action: TodoAction =
            serde_json::from_str(r#"{"payload":4,"type":"deleteTodo"}"#).unwrap();
        assert_eq!(action, TodoAction::Delete(4));
    }

    #[test]
    fn known_tag_with_bad_payload_is_an_error() {
        for raw in [
            r#"{"type":"toggleTodo","payload":"three"}"#,
            r#"{"type":"addTodo"}"#,
            r#"{"type":"setTodos","payload":{"id":1}}"#,
            r#"{"payload":1}"#,
        ] {
            assert!(serde_json::from_str::<TodoAction>(raw).is_err(), "{raw}");
        }
    }

    // =========================================================================
    // Property tests
    // =========================================================================

    fn arb_todo() -> impl Strategy<Value = Todo> {
        (-50i64..500, "[a-z]{0,8}", proptest::bool::ANY)
            .prop_map(|(id, title, completed)| Todo { id, title, completed })
    }

    fn arb_todos() -> impl Strategy<Value = Vec<Todo>> {
        proptest::collection::vec(arb_todo(), 0..20)
    }

    proptest! {
        #[test]
        fn add_appends_one_fresh_item(todos in arb_todos(), title in ".*") {
            let next = reduce(&todos, TodoAction::Add(title.clone()));
            prop_assert_eq!(next.len(), todos.len() + 1);
            prop_assert_eq!(&next[..todos.len()], &todos[..]);

            let added = next.last().unwrap();
            prop_assert!(!added.completed);
            prop_assert_eq!(&added.title, &title);
            if todos.is_empty() {
                prop_assert_eq!(added.id, 1);
            }
            prop_assert!(todos.iter().all(|t| added.id > t.id));
        }

        #[test]
        fn toggle_inverts_only_matches(todos in arb_todos(), id in -50i64..500) {
            let next = reduce(&todos, TodoAction::Toggle(id));
            prop_assert_eq!(next.len(), todos.len());
            for (before, after) in todos.iter().zip(&next) {
                prop_assert_eq!(before.id, after.id);
                prop_assert_eq!(&before.title, &after.title);
                if before.id == id {
                    prop_assert_eq!(after.completed, !before.completed);
                } else {
                    prop_assert_eq!(after.completed, before.completed);
                }
            }
        }

        #[test]
        fn toggle_twice_restores(todos in arb_todos(), id in -50i64..500) {
            let once = reduce(&todos, TodoAction::Toggle(id));
            let twice = reduce(&once, TodoAction::Toggle(id));
            prop_assert_eq!(twice, todos);
        }

        #[test]
        fn delete_keeps_order_of_the_rest(todos in arb_todos(), id in -50i64..500) {
            let next = reduce(&todos, TodoAction::Delete(id));
            let expected: Vec<Todo> = todos.iter().filter(|t| t.id != id).cloned().collect();
            prop_assert_eq!(next, expected);
        }

        #[test]
        fn set_all_replaces_everything(todos in arb_todos(), items in arb_todos()) {
            let next = reduce(&todos, TodoAction::SetAll(items.clone()));
            prop_assert_eq!(next, items);
        }
    }
}
