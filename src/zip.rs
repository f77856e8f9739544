//! Concurrent zip over two independently driven sequences
//!
//! Each input is pulled by its own tokio task and handed over a bounded
//! channel, so a source that suspends while producing (for example one backed
//! by a channel fed from the other side) cannot deadlock the pair. A shared
//! cancellation signal stops both workers as soon as either side is exhausted
//! or the zip stream is dropped.

use async_stream::stream;
use futures_util::future::FutureExt;
use futures_util::stream::StreamExt;
use log::{debug, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::seq::{Seq, SeqStream};
use crate::seq_configuration::ZipConfig;

/// Pair the i-th element of `first` with the i-th element of `second`
///
/// Stops as soon as either input is exhausted; no partial pair is yielded.
/// Driving the result spawns two tokio tasks, so it must be polled inside a
/// tokio runtime.
///
/// A worker that is still inside its source when the zip ends is signalled
/// and detached rather than awaited; it returns the next time its source
/// yields. A worker panic is resumed on the consumer if it is observed before
/// the zip ends, and only logged if the consumer dropped the stream first.
///
/// # Examples
/// ```
/// use lazyseq::*;
///
/// # async fn example() {
/// let pairs = zip(from_elements(vec![1, 2, 3]), from_elements(vec![6, 7, 8, 9, 10]));
/// assert_eq!(collect(&pairs).await, vec![(1, 6), (2, 7), (3, 8)]);
/// # }
/// ```
pub fn zip<A, B>(first: Seq<A>, second: Seq<B>) -> Seq<(A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
{
    zip_with_config(first, second, ZipConfig::default())
}

/// [`zip`] with an explicit handoff configuration
///
/// # Panics
///
/// Panics if `config` does not validate.
pub fn zip_with_config<A, B>(first: Seq<A>, second: Seq<B>, config: ZipConfig) -> Seq<(A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
{
    if let Err(err) = config.validate() {
        warn!("zip: {}", err);
        panic!("{}", err);
    }
    let capacity = config.handoff_capacity;

    Seq::new(move || {
        let first = first.stream();
        let second = second.stream();
        stream! {
            let (cancel_tx, cancel_rx) = watch::channel(false);
            let cancel = CancelOnDrop(cancel_tx);
            let (first_tx, mut first_rx) = mpsc::channel(capacity);
            let (second_tx, mut second_rx) = mpsc::channel(capacity);
            let mut workers = Workers {
                first: Some(tokio::spawn(pull(first, first_tx, cancel_rx.clone(), Side::First))),
                second: Some(tokio::spawn(pull(second, second_tx, cancel_rx, Side::Second))),
            };

            let mut a = None;
            let mut b = None;
            let exhausted = loop {
                tokio::select! {
                    item = first_rx.recv(), if a.is_none() => match item {
                        Some(item) => a = Some(item),
                        None => break Side::First,
                    },
                    item = second_rx.recv(), if b.is_none() => match item {
                        Some(item) => b = Some(item),
                        None => break Side::Second,
                    },
                }
                match (a.take(), b.take()) {
                    (Some(x), Some(y)) => yield (x, y),
                    (x, y) => {
                        a = x;
                        b = y;
                    }
                }
            };

            cancel.fire();
            drop(first_rx);
            drop(second_rx);
            workers.finish(exhausted).await;
            debug!("zip: finished after {} side was exhausted", exhausted.name());
        }
    })
}

/// Fires the cancellation signal when the zip stream is dropped mid-flight
struct CancelOnDrop(watch::Sender<bool>);

impl CancelOnDrop {
    fn fire(&self) {
        self.0.send_replace(true);
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.fire();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    First,
    Second,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::First => "first",
            Side::Second => "second",
        }
    }

    fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Join handles of the two workers still owned by a zip stream
struct Workers {
    first: Option<JoinHandle<()>>,
    second: Option<JoinHandle<()>>,
}

impl Workers {
    fn take(&mut self, side: Side) -> Option<JoinHandle<()>> {
        match side {
            Side::First => self.first.take(),
            Side::Second => self.second.take(),
        }
    }

    /// Called after cancellation has fired and both receivers are gone.
    async fn finish(&mut self, exhausted: Side) {
        // Its handoff sender is closed, so the task has returned or is unwinding.
        if let Some(worker) = self.take(exhausted) {
            join_worker(worker).await;
        }
        let other = exhausted.other();
        if let Some(worker) = self.take(other) {
            if worker.is_finished() {
                join_worker(worker).await;
            } else {
                debug!("zip: detaching {} worker still inside its source", other.name());
            }
        }
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        for side in [Side::First, Side::Second] {
            let Some(worker) = self.take(side) else {
                continue;
            };
            if let Some(Err(err)) = worker.now_or_never() {
                if err.is_panic() {
                    warn!("zip: {} worker panicked after the consumer stopped", side.name());
                }
            }
        }
    }
}

async fn pull<T>(
    mut source: SeqStream<T>,
    handoff: mpsc::Sender<T>,
    mut cancel: watch::Receiver<bool>,
    side: Side,
) where
    T: Send + 'static,
{
    let side = side.name();
    debug!("zip: {} worker started", side);
    loop {
        let item = tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                debug!("zip: {} worker cancelled while pulling", side);
                return;
            }
            item = source.next() => item,
        };

        let Some(item) = item else {
            debug!("zip: {} source exhausted", side);
            return;
        };

        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                debug!("zip: {} worker cancelled during handoff", side);
                return;
            }
            sent = handoff.send(item) => {
                if sent.is_err() {
                    return;
                }
            }
        }
    }
}

/// Resolves once cancellation is requested or the zip stream is gone
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            return;
        }
    }
}

async fn join_worker(worker: JoinHandle<()>) {
    if let Err(err) = worker.await {
        if err.is_panic() {
            std::panic::resume_unwind(err.into_panic());
        }
    }
}
