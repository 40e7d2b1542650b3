//! Todo list state and the optimistic update functions behind it.
//!
//! The "server" is simulated: every update sleeps for a configured latency
//! window before resolving, and removes can be forced to fail to
//! demonstrate the revert path.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use optimist::{Cell, Optimistic, OptimisticOptions, Updater};
use thiserror::Error;

/// Completion state of a todo, as rendered in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoStatus {
    /// Speculative: shown while the add call is in flight.
    Pending,
    /// Confirmed by the simulated server.
    Done,
}

/// One todo list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    /// Locally assigned id, stable across the pending→done transition.
    pub id: u64,
    /// Display text.
    pub text: String,
    /// Pending while in flight, done once confirmed.
    pub status: TodoStatus,
}

/// Failures produced by the simulated server.
#[derive(Debug, Error)]
pub enum TodoError {
    /// The id does not exist in the current list.
    #[error("no todo with id {0}")]
    NotFound(u64),
    /// Failure injection (`--fail-remove`).
    #[error("server rejected the update")]
    Rejected,
}

/// Behavior knobs for the simulated server round trip.
#[derive(Debug, Clone, Copy)]
pub struct ServerProfile {
    /// Round-trip latency applied to every update.
    pub latency: Duration,
    /// Reject every remove after the latency window.
    pub fail_remove: bool,
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// The wrapped update handles the UI calls into.
pub struct TodoUpdaters {
    /// Add a todo; shows it pending immediately, done once confirmed.
    pub add: Updater<Vec<Todo>, String, TodoError>,
    /// Remove a todo by id; disappears immediately, reverts on failure.
    pub remove: Updater<Vec<Todo>, u64, TodoError>,
}

/// Build the optimistic todo state and its update handles.
pub fn todo_state(
    options: OptimisticOptions,
    server: ServerProfile,
) -> (Optimistic<Vec<Todo>>, TodoUpdaters) {
    let state = Optimistic::with_options(Vec::new(), options);

    let add = state.updater(move |_cell, optimistic: Cell<Vec<Todo>>, text: String| async move {
        let id = next_id();
        optimistic.update(|mut todos| {
            todos.push(Todo {
                id,
                text,
                status: TodoStatus::Pending,
            });
            todos
        });
        tokio::time::sleep(server.latency).await;
        // Resolve against the optimistic list so edits made by overlapping
        // calls stay visible in the committed value.
        let mut todos = optimistic.get();
        if let Some(todo) = todos.iter_mut().find(|t| t.id == id) {
            todo.status = TodoStatus::Done;
        }
        Ok(todos)
    });

    let remove = state.updater(move |_cell, optimistic: Cell<Vec<Todo>>, id: u64| async move {
        if !optimistic.get().iter().any(|t| t.id == id) {
            return Err(TodoError::NotFound(id));
        }
        optimistic.update(move |todos| todos.into_iter().filter(|t| t.id != id).collect());
        tokio::time::sleep(server.latency).await;
        if server.fail_remove {
            return Err(TodoError::Rejected);
        }
        Ok(optimistic
            .get()
            .into_iter()
            .filter(|t| t.id != id)
            .collect())
    });

    (state, TodoUpdaters { add, remove })
}
