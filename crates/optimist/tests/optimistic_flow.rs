//! End-to-end optimistic update flows: commit, revert, and the documented
//! concurrent-invocation races.

mod support;

use std::time::Duration;

use assert_matches::assert_matches;
use optimist::{mirror, optimistic_pair, Cell, Optimistic, OptimisticOptions};
use support::eventually;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Todo {
    id: u64,
    text: String,
    done: bool,
}

fn todo(id: u64, text: &str, done: bool) -> Todo {
    Todo {
        id,
        text: text.to_string(),
        done,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum StoreError {
    Rejected,
}

#[tokio::test]
async fn external_base_writes_flow_into_optimistic() {
    let pair = optimistic_pair(0);

    pair.cell.set(5);
    eventually(&pair.optimistic, 5).await;

    pair.cell.set(6);
    eventually(&pair.optimistic, 6).await;
}

#[tokio::test]
async fn derived_cells_are_independent() {
    let base = Cell::new(1);
    let d1 = mirror(&base);
    let d2 = mirror(&base);

    base.set(2);
    eventually(&d1, 2).await;
    eventually(&d2, 2).await;

    // Diverging one derived cell leaves the other alone.
    d1.set(99);
    assert_eq!(d2.get(), 2);

    // Both keep tracking subsequent base writes.
    base.set(3);
    eventually(&d1, 3).await;
    eventually(&d2, 3).await;
}

#[tokio::test]
async fn success_commits_and_resyncs() {
    let state = Optimistic::new(0);
    let set = state.updater(|_cell, optimistic: Cell<i32>, v: i32| async move {
        optimistic.set(v + 1000); // speculative placeholder
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok::<_, StoreError>(v)
    });

    set.call(7).await.unwrap();

    assert_eq!(state.cell().get(), 7);
    eventually(state.optimistic(), 7).await;
}

#[tokio::test]
async fn add_shows_pending_then_done() {
    let state = Optimistic::new(Vec::<Todo>::new());
    let add = state.updater(|_cell, optimistic: Cell<Vec<Todo>>, text: String| async move {
        let id = 1;
        optimistic.update(|mut todos| {
            todos.push(Todo {
                id,
                text,
                done: false,
            });
            todos
        });
        tokio::time::sleep(Duration::from_millis(60)).await;
        let mut todos = optimistic.get();
        if let Some(t) = todos.iter_mut().find(|t| t.id == id) {
            t.done = true;
        }
        Ok::<_, StoreError>(todos)
    });

    let handle = tokio::spawn({
        let add = add.clone();
        async move { add.call("buy milk".to_string()).await }
    });

    // The speculative item is visible while the call is still in flight.
    eventually(state.optimistic(), vec![todo(1, "buy milk", false)]).await;

    handle.await.unwrap().unwrap();

    assert_eq!(state.cell().get(), vec![todo(1, "buy milk", true)]);
    eventually(state.optimistic(), vec![todo(1, "buy milk", true)]).await;
}

#[tokio::test]
async fn failed_remove_reverts_optimistic() {
    let initial = vec![todo(1, "a", true)];
    let state = Optimistic::new(initial.clone());
    let remove = state.updater(|_cell, optimistic: Cell<Vec<Todo>>, id: u64| async move {
        optimistic.update(move |todos| todos.into_iter().filter(|t| t.id != id).collect());
        tokio::time::sleep(Duration::from_millis(60)).await;
        Err::<Vec<Todo>, StoreError>(StoreError::Rejected)
    });

    let handle = tokio::spawn({
        let remove = remove.clone();
        async move { remove.call(1).await }
    });

    // The removal is visible immediately, before the call settles.
    eventually(state.optimistic(), Vec::new()).await;

    let result = handle.await.unwrap();
    assert_matches!(result, Err(StoreError::Rejected));

    // Reverted to the pre-call snapshot; the base cell never changed.
    assert_eq!(state.optimistic().get(), initial);
    assert_eq!(state.cell().get(), initial);
}

#[tokio::test]
async fn failed_remove_keeps_speculative_without_revert() {
    let initial = vec![todo(1, "a", true)];
    let state = Optimistic::with_options(
        initial.clone(),
        OptimisticOptions {
            revert_optimistic_on_reject: false,
        },
    );
    let remove = state.updater(|_cell, optimistic: Cell<Vec<Todo>>, id: u64| async move {
        optimistic.update(move |todos| todos.into_iter().filter(|t| t.id != id).collect());
        tokio::time::sleep(Duration::from_millis(20)).await;
        Err::<Vec<Todo>, StoreError>(StoreError::Rejected)
    });

    remove.call(1).await.unwrap_err();

    // Visible inconsistency until the next external base write.
    assert_eq!(state.optimistic().get(), Vec::new());
    assert_eq!(state.cell().get(), initial);

    state.cell().set(Vec::new());
    eventually(state.optimistic(), Vec::new()).await;
}

#[tokio::test]
async fn error_is_propagated_unchanged() {
    let state = Optimistic::new(0);
    let fail = state.updater(|_cell, _optimistic, _: ()| async move {
        Err::<i32, String>("exact message".to_string())
    });

    let err = fail.call(()).await.unwrap_err();
    assert_eq!(err, "exact message");
}

#[tokio::test]
async fn snapshot_is_captured_at_call_time() {
    let state = Optimistic::new(10);
    let set_to = state.updater(|_cell, _optimistic, v: i32| async move { Ok::<_, StoreError>(v) });
    let fail = state.updater(|_cell, optimistic: Cell<i32>, _: ()| async move {
        optimistic.set(-1);
        Err::<i32, StoreError>(StoreError::Rejected)
    });

    set_to.call(20).await.unwrap();
    eventually(state.optimistic(), 20).await;

    // The revert restores this call's snapshot, not the creation-time value.
    fail.call(()).await.unwrap_err();
    assert_eq!(state.optimistic().get(), 20);
}

#[tokio::test]
async fn race_revert_can_clobber_committed_value() {
    let state = Optimistic::new("init".to_string());
    let fast_ok = state.updater(|_cell, optimistic: Cell<String>, _: ()| async move {
        optimistic.set("fast-pending".to_string());
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok::<_, StoreError>("fast-done".to_string())
    });
    let slow_fail = state.updater(|_cell, _optimistic, _: ()| async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        Err::<String, StoreError>(StoreError::Rejected)
    });

    let (fast, slow) = tokio::join!(fast_ok.call(()), slow_fail.call(()));
    fast.unwrap();
    slow.unwrap_err();

    // Both calls snapshotted "init" at call time. The fast call committed,
    // then the slow failure reverted the optimistic cell to its own
    // snapshot, clobbering the committed value: last settled writer wins.
    assert_eq!(state.cell().get(), "fast-done");
    assert_eq!(state.optimistic().get(), "init");
}
