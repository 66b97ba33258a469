//! Bounded-concurrency map with progress reporting.
//!
//! A fixed number of workers pull items from one shared queue until it runs
//! dry. Results come back in submission order; progress is reported in
//! completion order.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{Error, Result};

/// Snapshot handed to the progress callback after every finished task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// Runs `task` over every item with at most `workers` tasks in flight.
///
/// The returned `Vec` has one slot per item, in submission order. A slot is
/// `None` when cancellation kept the item from being dispatched or abandoned it
/// mid-flight. Without cancellation every slot is `Some`.
pub async fn map_bounded<T, R, F, Fut, P>(
    items: Vec<T>,
    workers: usize,
    cancel: &CancellationToken,
    task: F,
    on_progress: P,
) -> Result<Vec<Option<R>>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    P: FnMut(Progress),
{
    map_bounded_with_cooldown(items, workers, cancel, task, |_: &R| Duration::ZERO, on_progress)
        .await
}

/// Like [`map_bounded`], but after each finished task its worker pauses for
/// `cooldown(&result)` before taking the next item.
///
/// The result is handed over before the pause starts, so cancelling during a
/// cooldown only cuts the pause short and never discards a finished result.
pub async fn map_bounded_with_cooldown<T, R, F, Fut, C, P>(
    items: Vec<T>,
    workers: usize,
    cancel: &CancellationToken,
    task: F,
    cooldown: C,
    mut on_progress: P,
) -> Result<Vec<Option<R>>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    C: Fn(&R) -> Duration + Send + Sync + 'static,
    P: FnMut(Progress),
{
    if workers == 0 {
        return Err(Error::NoWorkers);
    }

    let total = items.len();
    let mut results: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();
    if total == 0 {
        return Ok(results);
    }

    let queue = Arc::new(Mutex::new(
        items.into_iter().enumerate().collect::<VecDeque<_>>(),
    ));
    let task = Arc::new(task);
    let cooldown = Arc::new(cooldown);
    let (res_tx, mut res_rx) = mpsc::unbounded_channel::<(usize, R)>();

    let mut worker_set = JoinSet::new();
    for worker_id in 0..workers.min(total) {
        worker_set.spawn({
            let queue = queue.clone();
            let task = task.clone();
            let cooldown = cooldown.clone();
            let res_tx = res_tx.clone();
            let cancel = cancel.clone();
            async move {
                while let Some((idx, item)) = next_item(&queue, &cancel) {
                    trace!(worker_id, idx, "picked up task");
                    let out = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            debug!(worker_id, idx, "abandoned in-flight task");
                            break;
                        }
                        out = (*task)(item) => out,
                    };
                    let pause = (*cooldown)(&out);
                    // The receiver lives until every worker is done.
                    let _ = res_tx.send((idx, out));

                    if !pause.is_zero() {
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => break,
                            _ = sleep(pause) => {}
                        }
                    }
                }
            }
        });
    }
    // Only the workers hold senders now, so `recv` ends once they all exit.
    drop(res_tx);

    let mut completed = 0;
    while let Some((idx, out)) = res_rx.recv().await {
        results[idx] = Some(out);
        completed += 1;
        on_progress(Progress { completed, total });
    }

    while let Some(joined) = worker_set.join_next().await {
        joined?;
    }

    Ok(results)
}

fn next_item<T>(
    queue: &Mutex<VecDeque<(usize, T)>>,
    cancel: &CancellationToken,
) -> Option<(usize, T)> {
    if cancel.is_cancelled() {
        return None;
    }
    // A worker that panicked while holding the lock can't have left the
    // queue half-updated: `pop_front` is the only access.
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}
