//! Shared helpers for integration tests.

use std::fmt::Debug;
use std::time::Duration;

use optimist::Cell;

/// Poll until the cell holds `expected`, panicking after a deadline.
///
/// The mirror re-syncs on the runtime's next pass rather than synchronously
/// with the base write, so assertions about the optimistic cell are
/// eventual.
pub async fn eventually<T>(cell: &Cell<T>, expected: T)
where
    T: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if cell.get() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await;

    if waited.is_err() {
        panic!(
            "cell never reached {:?}; last value {:?}",
            expected,
            cell.get()
        );
    }
}
