//! Base→optimistic mirroring.
//!
//! The derived optimistic cell is kept in sync by a forwarding task: every
//! value observed on the base cell's signal is written into the derived
//! cell. This task is the only base→derived copy mechanism outside of
//! update-function logic.

use futures_signals::signal::SignalExt;

use crate::cell::Cell;

/// Derive an optimistic cell that tracks `base`.
///
/// The returned cell is initialized to the base cell's current value and is
/// overwritten with every subsequent base value, on the runtime's next
/// evaluation pass. Writes made directly to the derived cell survive only
/// until the next base write.
///
/// Calling this twice on the same base cell yields two independent derived
/// cells, each tracking the base on its own.
///
/// The forwarding task is spawned on the ambient tokio runtime (the caller
/// must be inside one) and terminates when the base cell's last writer
/// handle is dropped.
pub fn mirror<T>(base: &Cell<T>) -> Cell<T>
where
    T: Clone + Send + Sync + 'static,
{
    let derived = Cell::new(base.get());
    let target = derived.clone();
    tokio::spawn(base.signal().for_each(move |value| {
        tracing::trace!("re-syncing optimistic cell from base");
        target.set(value);
        async {}
    }));
    derived
}
