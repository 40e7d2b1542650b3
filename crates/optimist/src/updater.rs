//! Optimistic update orchestration.
//!
//! An update function receives the base cell, the optimistic cell, and its
//! call arguments, and resolves to the new authoritative value. Wrapping it
//! produces an [`Updater`] whose `call` runs one reconciliation cycle:
//!
//! 1. snapshot the base value at call time,
//! 2. run the update function (which is expected to write a speculative
//!    value into the optimistic cell as its first action),
//! 3. on success, commit the returned value to the base cell (the mirror
//!    re-syncs the optimistic cell),
//! 4. on failure, optionally restore the snapshot into the optimistic cell
//!    and propagate the original error unchanged.
//!
//! Overlapping calls are not serialized; see the crate docs.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::cell::Cell;
use crate::mirror::mirror;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Options governing optimistic update behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticOptions {
    /// Restore the optimistic cell to its pre-call snapshot when an update
    /// function fails. Defaults to `true`. When `false`, a failed update
    /// leaves its speculative value visible until the next base write.
    pub revert_optimistic_on_reject: bool,
}

impl Default for OptimisticOptions {
    fn default() -> Self {
        Self {
            revert_optimistic_on_reject: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cell pair
// ─────────────────────────────────────────────────────────────────────────────

/// A base cell together with its derived optimistic cell.
#[derive(Debug, Clone)]
pub struct OptimisticPair<T> {
    /// The authoritative value.
    pub cell: Cell<T>,
    /// The speculative, UI-facing value, tracking `cell`.
    pub optimistic: Cell<T>,
}

/// Create a base cell and an optimistic cell tracking it.
pub fn optimistic_pair<T>(initial: T) -> OptimisticPair<T>
where
    T: Clone + Send + Sync + 'static,
{
    let cell = Cell::new(initial);
    let optimistic = mirror(&cell);
    OptimisticPair { cell, optimistic }
}

// ─────────────────────────────────────────────────────────────────────────────
// Update functions
// ─────────────────────────────────────────────────────────────────────────────

/// A boxed update function.
///
/// Takes the base cell, the optimistic cell, and the call arguments, and
/// resolves to the new authoritative value or the caller's own error.
pub type UpdateFn<T, A, E> =
    Arc<dyn Fn(Cell<T>, Cell<T>, A) -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// Box an async closure into an [`UpdateFn`].
pub fn update_fn<T, A, E, F, Fut>(f: F) -> UpdateFn<T, A, E>
where
    F: Fn(Cell<T>, Cell<T>, A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    Arc::new(move |cell, optimistic, args| -> BoxFuture<'static, Result<T, E>> {
        Box::pin(f(cell, optimistic, args))
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ─────────────────────────────────────────────────────────────────────────────

/// A base/optimistic cell pair plus the options applied to every updater
/// wrapped through it.
pub struct Optimistic<T> {
    cell: Cell<T>,
    optimistic: Cell<T>,
    options: OptimisticOptions,
}

impl<T> Optimistic<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an optimistic state with default options.
    pub fn new(initial: T) -> Self {
        Self::with_options(initial, OptimisticOptions::default())
    }

    /// Create an optimistic state with explicit options.
    pub fn with_options(initial: T, options: OptimisticOptions) -> Self {
        let OptimisticPair { cell, optimistic } = optimistic_pair(initial);
        Self {
            cell,
            optimistic,
            options,
        }
    }

    /// The authoritative cell.
    pub fn cell(&self) -> &Cell<T> {
        &self.cell
    }

    /// The speculative, UI-facing cell.
    pub fn optimistic(&self) -> &Cell<T> {
        &self.optimistic
    }

    /// The options applied to wrapped updaters.
    pub fn options(&self) -> OptimisticOptions {
        self.options
    }

    /// Wrap an async update function into an [`Updater`].
    pub fn updater<A, E, F, Fut>(&self, f: F) -> Updater<T, A, E>
    where
        F: Fn(Cell<T>, Cell<T>, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.wrap(update_fn(f))
    }

    /// Wrap an already-boxed update function into an [`Updater`].
    pub fn wrap<A, E>(&self, update: UpdateFn<T, A, E>) -> Updater<T, A, E> {
        Updater {
            cell: self.cell.clone(),
            optimistic: self.optimistic.clone(),
            revert_on_reject: self.options.revert_optimistic_on_reject,
            update,
        }
    }

    /// Wrap an ordered list of update functions, preserving input order.
    pub fn updaters<A, E>(&self, functions: Vec<UpdateFn<T, A, E>>) -> Vec<Updater<T, A, E>> {
        functions.into_iter().map(|f| self.wrap(f)).collect()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Optimistic<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Optimistic")
            .field("cell", &self.cell)
            .field("optimistic", &self.optimistic)
            .field("options", &self.options)
            .finish()
    }
}

/// Create an optimistic state plus one wrapped updater per input function,
/// positionally indexed in input order.
pub fn optimistic_updater<T, A, E>(
    initial: T,
    functions: Vec<UpdateFn<T, A, E>>,
    options: OptimisticOptions,
) -> (Optimistic<T>, Vec<Updater<T, A, E>>)
where
    T: Clone + Send + Sync + 'static,
{
    let state = Optimistic::with_options(initial, options);
    let updaters = state.updaters(functions);
    (state, updaters)
}

// ─────────────────────────────────────────────────────────────────────────────
// Wrapped updater
// ─────────────────────────────────────────────────────────────────────────────

/// A wrapped update function bound to a base/optimistic cell pair.
///
/// Calling it runs one optimistic-then-authoritative update cycle. The call
/// resolves with no payload on success; effects are observed via the cells.
pub struct Updater<T, A, E> {
    cell: Cell<T>,
    optimistic: Cell<T>,
    revert_on_reject: bool,
    update: UpdateFn<T, A, E>,
}

impl<T, A, E> Clone for Updater<T, A, E> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            optimistic: self.optimistic.clone(),
            revert_on_reject: self.revert_on_reject,
            update: self.update.clone(),
        }
    }
}

impl<T, A, E> Updater<T, A, E>
where
    T: Clone + Send + Sync + 'static,
{
    /// Run one update cycle with the given call arguments.
    ///
    /// The pre-call snapshot is captured here, per invocation. On failure
    /// the original error is returned unchanged; whether the optimistic
    /// cell is reverted first depends on
    /// [`OptimisticOptions::revert_optimistic_on_reject`].
    pub async fn call(&self, args: A) -> Result<(), E> {
        let before = self.cell.get();
        tracing::debug!("optimistic update pending");
        match (self.update)(self.cell.clone(), self.optimistic.clone(), args).await {
            Ok(value) => {
                self.cell.set(value);
                tracing::debug!("optimistic update committed");
                Ok(())
            }
            Err(err) => {
                if self.revert_on_reject {
                    self.optimistic.set(before);
                    tracing::debug!("optimistic update failed, optimistic value reverted");
                } else {
                    tracing::debug!("optimistic update failed, optimistic value kept");
                }
                Err(err)
            }
        }
    }
}
