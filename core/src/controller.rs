//! Stateful owner of the todo list and the load lifecycle.
//!
//! # Design
//! `TodoController` is the only thing allowed to change the list, and it
//! does so exclusively through its reducer. Loading is modelled as an
//! explicit flag plus an effect queue: switching the flag on queues exactly
//! one `Effect::FetchTodos`, which the host drains with `take_effects`,
//! executes, and reports back through `complete_load`. The controller never
//! does I/O itself.
//!
//! Each fetch carries a `LoadTicket`. Only the ticket of the fetch currently
//! in flight is accepted; anything else is reported as `LoadOutcome::Stale`
//! and the list is left alone.

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::config::{ControllerConfig, FailurePolicy};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::reducer::{reduce, ReduceFn, TodoAction};
use crate::types::{Todo, TodoState};

/// Handle identifying one fetch started by `load_from_api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u64 {
        self.0
    }
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the remote collection and report back with `ticket`.
    FetchTodos {
        ticket: LoadTicket,
        request: HttpRequest,
    },
}

/// What `complete_load` did with a fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was replaced with `count` items and loading finished.
    Applied { count: usize },
    /// The fetch failed; the failure policy decided what happened to the flag.
    Failed(ApiError),
    /// The ticket does not belong to the fetch in flight. Nothing changed.
    Stale,
}

pub struct TodoController {
    client: TodoClient,
    failure_policy: FailurePolicy,
    reducer: ReduceFn,
    todos: Vec<Todo>,
    is_loading: bool,
    next_ticket: u64,
    in_flight: Option<LoadTicket>,
    last_error: Option<ApiError>,
    effects: Vec<Effect>,
}

impl TodoController {
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_reducer(config, reduce)
    }

    /// Build a controller whose transitions go through `reducer`.
    pub fn with_reducer(config: ControllerConfig, reducer: ReduceFn) -> Self {
        Self {
            client: TodoClient::new(&config.base_url),
            failure_policy: config.failure_policy,
            reducer,
            todos: Vec::new(),
            is_loading: false,
            next_ticket: 0,
            in_flight: None,
            last_error: None,
            effects: Vec::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Ticket of the fetch whose result would currently be accepted.
    pub fn in_flight(&self) -> Option<LoadTicket> {
        self.in_flight
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn state(&self) -> TodoState {
        TodoState {
            todos: self.todos.clone(),
            is_loading: self.is_loading,
            last_error: self.last_error.as_ref().map(ToString::to_string),
        }
    }

    pub fn dispatch(&mut self, action: TodoAction) {
        debug!(action = action.kind(), "dispatching todo action");
        self.todos = (self.reducer)(&self.todos, action);
    }

    pub fn add_todo(&mut self, title: impl Into<String>) {
        self.dispatch(TodoAction::Add(title.into()));
    }

    pub fn delete_todo(&mut self, id: i64) {
        self.dispatch(TodoAction::Delete(id));
    }

    pub fn toggle_todo(&mut self, id: i64) {
        self.dispatch(TodoAction::Toggle(id));
    }

    /// Switch the loading flag on.
    ///
    /// The list is not touched. If the flag was off, one fetch effect is
    /// queued; if it was already on, nothing happens.
    pub fn load_from_api(&mut self) {
        if self.is_loading {
            debug!("load already in progress, not starting another");
            return;
        }

        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.is_loading = true;
        self.in_flight = Some(ticket);
        self.last_error = None;

        let request = self.client.build_list_todos();
        info!(ticket = ticket.as_raw(), url = %request.path, "starting todo load");
        self.effects.push(Effect::FetchTodos { ticket, request });
    }

    /// Drain every effect queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Feed the result of a fetch back into the controller.
    ///
    /// On success the list is replaced wholesale, discarding any edits made
    /// while the fetch was in flight.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<HttpResponse, ApiError>,
    ) -> LoadOutcome {
        if self.in_flight != Some(ticket) {
            warn!(ticket = ticket.as_raw(), "discarding result of stale todo load");
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        match result.and_then(|response| self.client.parse_list_todos(response)) {
            Ok(todos) => {
                let count = todos.len();
                self.dispatch(TodoAction::SetAll(todos));
                self.is_loading = false;
                info!(ticket = ticket.as_raw(), count, "todo load applied");
                LoadOutcome::Applied { count }
            }
            Err(err) => {
                warn!(ticket = ticket.as_raw(), error = %err, policy = ?self.failure_policy, "todo load failed");
                if self.failure_policy == FailurePolicy::Reset {
                    self.is_loading = false;
                }
                self.last_error = Some(err.clone());
                LoadOutcome::Failed(err)
            }
        }
    }
}

impl Default for TodoController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
