//! Async host for a `TodoController`.
//!
//! # Design
//! The store owns the controller and the set of fetch tasks it started.
//! `load_from_api` spawns the fetch and returns immediately; results are only
//! applied when the owner awaits `next_completion` or `settle`, so every
//! state change happens on the owner's task, one at a time. Dropping the
//! store drops the `JoinSet`, which aborts every fetch still running, so a
//! result can never land in a store nobody holds.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{error, warn};

use todo_core::{
    ApiError, ControllerConfig, Effect, HttpResponse, LoadOutcome, LoadTicket, Todo,
    TodoController, TodoState,
};

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::transport::{ReqwestTransport, Transport};

type FetchResult = (LoadTicket, Result<HttpResponse, ApiError>);

pub struct TodoStore<T: Transport> {
    controller: TodoController,
    transport: Arc<T>,
    in_flight: JoinSet<FetchResult>,
}

impl TodoStore<ReqwestTransport> {
    /// Build a store that fetches over HTTP with reqwest.
    pub fn connect(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self::new(config.controller, transport))
    }
}

impl<T: Transport> TodoStore<T> {
    pub fn new(config: ControllerConfig, transport: T) -> Self {
        Self::with_controller(TodoController::new(config), transport)
    }

    pub fn with_controller(controller: TodoController, transport: T) -> Self {
        Self {
            controller,
            transport: Arc::new(transport),
            in_flight: JoinSet::new(),
        }
    }

    pub fn controller(&self) -> &TodoController {
        &self.controller
    }

    pub fn todos(&self) -> &[Todo] {
        self.controller.todos()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn state(&self) -> TodoState {
        self.controller.state()
    }

    pub fn add_todo(&mut self, title: impl Into<String>) {
        self.controller.add_todo(title);
    }

    pub fn delete_todo(&mut self, id: i64) {
        self.controller.delete_todo(id);
    }

    pub fn toggle_todo(&mut self, id: i64) {
        self.controller.toggle_todo(id);
    }

    /// Switch the loading flag on and start the fetch in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load_from_api(&mut self) {
        self.controller.load_from_api();
        self.spawn_effects();
    }

    /// Whether a fetch is still running or waiting to be applied.
    pub fn has_pending_load(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Wait for the next fetch to finish and apply its result.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<LoadOutcome> {
        let joined = self.in_flight.join_next().await?;
        let outcome = match joined {
            Ok((ticket, result)) => self.controller.complete_load(ticket, result),
            Err(join_error) => {
                error!(error = %join_error, "todo fetch task did not complete");
                match self.controller.in_flight() {
                    Some(ticket) => self.controller.complete_load(
                        ticket,
                        Err(ApiError::Transport(join_error.to_string())),
                    ),
                    None => LoadOutcome::Stale,
                }
            }
        };
        Some(outcome)
    }

    /// Apply every fetch still in flight, in completion order.
    pub async fn settle(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_completion().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    fn spawn_effects(&mut self) {
        for effect in self.controller.take_effects() {
            match effect {
                Effect::FetchTodos { ticket, request } => {
                    let transport = Arc::clone(&self.transport);
                    self.in_flight
                        .spawn(async move { (ticket, transport.execute(request).await) });
                }
            }
        }
    }
}

impl<T: Transport> Drop for TodoStore<T> {
    fn drop(&mut self) {
        if !self.in_flight.is_empty() {
            warn!(
                pending = self.in_flight.len(),
                "todo store dropped with loads in flight, discarding them"
            );
        }
    }
}
