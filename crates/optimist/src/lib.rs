//! # Optimist
//!
//! Optimistic reactive values for async UI updates.
//!
//! An *optimistic* value is a speculative, UI-facing projection of an
//! authoritative *base* value. While an asynchronous update is in flight the
//! UI renders the optimistic cell, which the update function writes to
//! immediately; once the update settles, the resolved result is committed to
//! the base cell (and cascades back into the optimistic cell), or the
//! optimistic cell is reverted to its pre-update snapshot.
//!
//! ## Core Types
//!
//! - [`Cell<T>`]: a reactive value holder backed by
//!   `futures_signals::signal::Mutable`. Clones share state.
//! - [`mirror`]: derive an optimistic cell that tracks a base cell.
//! - [`Optimistic<T>`]: a base/optimistic cell pair plus the options that
//!   govern failure handling.
//! - [`Updater`]: a wrapped update function; calling it runs one
//!   snapshot → run → commit-or-revert cycle.
//!
//! ## Example
//!
//! ```rust,ignore
//! use optimist::Optimistic;
//!
//! let state = Optimistic::new(Vec::<String>::new());
//! let add = state.updater(|_cell, optimistic, item: String| async move {
//!     optimistic.update(|mut items| {
//!         items.push(item.clone());
//!         items
//!     });
//!     let items = remote_add(item).await?; // the authoritative result
//!     Ok::<_, RemoteError>(items)
//! });
//!
//! // The optimistic cell shows the item immediately; the base cell follows
//! // once the call resolves. On failure the optimistic cell is reverted.
//! add.call("buy milk".into()).await?;
//! ```
//!
//! ## Concurrency
//!
//! Overlapping calls against the same cells are not serialized: the last
//! settled call wins on the base cell, and a failing call's revert restores
//! its own call-time snapshot even if another call has written since.
//! Callers needing strict ordering must serialize calls themselves.
//!
//! The base→optimistic mirror runs as a spawned task on the ambient tokio
//! runtime; re-synchronization happens on the runtime's next pass, never
//! synchronously with the base write.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Reactive cell primitive shared by base and optimistic values
pub mod cell;

/// Base→optimistic mirroring
pub mod mirror;

/// Optimistic update orchestration
pub mod updater;

pub use cell::Cell;
pub use mirror::mirror;
pub use updater::{
    optimistic_pair, optimistic_updater, update_fn, Optimistic, OptimisticOptions, OptimisticPair,
    UpdateFn, Updater,
};
