//! Seq - restartable lazy sequences built on async streams
//!
//! A [`Seq`] is a recipe for a stream rather than a stream: every call to
//! [`Seq::stream`] starts a fresh pass over the elements. Combinators wrap one
//! or more sequences in a new recipe, so building a pipeline does no work and
//! a pipeline can be driven as many times as its sources allow.

use async_stream::stream;
use futures_core::Stream;
use futures_util::stream::{self, BoxStream, StreamExt};
use log::{trace, warn};
use std::fmt;
use std::ops::Add;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::error::{SeqError, SeqResult};

/// A boxed, heap-allocated stream produced by driving a [`Seq`]
pub type SeqStream<O> = BoxStream<'static, O>;

/// A restartable sequence source
///
/// Cloning a `Seq` is cheap and shares the underlying recipe.
pub struct Seq<O> {
    make: Arc<dyn Fn() -> SeqStream<O> + Send + Sync>,
}

impl<O> Clone for Seq<O> {
    fn clone(&self) -> Self {
        Seq {
            make: Arc::clone(&self.make),
        }
    }
}

impl<O> fmt::Debug for Seq<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq").finish_non_exhaustive()
    }
}

impl<O> Seq<O>
where
    O: Send + 'static,
{
    /// Wrap a stream factory as a sequence
    ///
    /// The factory is invoked once per drive and must return a fresh stream
    /// each time for the sequence to be restartable.
    ///
    /// # Examples
    /// ```
    /// use lazyseq::*;
    /// use futures_util::stream;
    ///
    /// # async fn example() {
    /// let squares = Seq::new(|| stream::iter((1..=3).map(|x| x * x)));
    /// assert_eq!(collect(&squares).await, vec![1, 4, 9]);
    /// assert_eq!(collect(&squares).await, vec![1, 4, 9]);
    /// # }
    /// ```
    pub fn new<F, S>(make: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = O> + Send + 'static,
    {
        Self::from_factory(move || make().boxed())
    }

    fn from_factory<F>(make: F) -> Self
    where
        F: Fn() -> SeqStream<O> + Send + Sync + 'static,
    {
        Seq {
            make: Arc::new(make),
        }
    }

    /// Drive the sequence, returning a new lazy stream over its elements
    ///
    /// Upstream sequences are driven immediately, but no element is produced
    /// until the returned stream is polled. Dropping the stream stops every
    /// upstream pull.
    pub fn stream(&self) -> SeqStream<O> {
        (self.make)()
    }
}

// ================================
// Terminal Drivers
// ================================

/// Drive a sequence to completion and gather its elements
pub async fn collect<O>(seq: &Seq<O>) -> Vec<O>
where
    O: Send + 'static,
{
    seq.stream().collect().await
}

/// Drive a sequence to completion, calling `consumer` once per element
pub async fn for_each<O, F>(seq: &Seq<O>, mut consumer: F)
where
    O: Send + 'static,
    F: FnMut(O),
{
    let mut s = seq.stream();
    while let Some(item) = s.next().await {
        consumer(item);
    }
}

// ================================
// Source Constructors
// ================================

/// A sequence with no elements
pub fn empty<O>() -> Seq<O>
where
    O: Send + 'static,
{
    Seq::new(stream::empty::<O>)
}

/// Yield each item in order
///
/// # Examples
/// ```
/// use lazyseq::*;
///
/// # async fn example() {
/// let s = from_elements(vec!["a", "b", "c"]);
/// assert_eq!(collect(&s).await, vec!["a", "b", "c"]);
/// # }
/// ```
pub fn from_elements<O, I>(items: I) -> Seq<O>
where
    I: IntoIterator<Item = O>,
    O: Clone + Send + Sync + 'static,
{
    let items: Arc<[O]> = items.into_iter().collect();
    Seq::new(move || {
        let items = Arc::clone(&items);
        stream! {
            for item in items.iter() {
                yield item.clone();
            }
        }
    })
}

/// Yield each `(key, value)` pair in the given order
pub fn from_pairs<K, V, I>(pairs: I) -> Seq<(K, V)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    from_elements(pairs)
}

/// Yield every value received on `rx` until all senders are dropped
///
/// The receiver is shared between drives: a second drive resumes draining
/// where the first one stopped, so the sequence is not restartable.
pub fn from_channel<O>(rx: mpsc::Receiver<O>) -> Seq<O>
where
    O: Send + 'static,
{
    let rx = Arc::new(Mutex::new(rx));
    Seq::new(move || {
        let rx = Arc::clone(&rx);
        stream! {
            loop {
                let item = rx.lock().await.recv().await;
                match item {
                    Some(item) => yield item,
                    None => break,
                }
            }
        }
    })
}

/// Yield `start, start + step, start + 2 * step, ...` forever
///
/// The next value is computed only when it is pulled, so stopping right after
/// the last representable value is fine.
///
/// # Panics
///
/// Uses `T`'s own `+`. For bounded integers, pulling past the end of the
/// type's range panics on overflow in debug builds and wraps in release builds.
///
/// # Examples
/// ```
/// use lazyseq::*;
///
/// # async fn example() {
/// assert_eq!(collect(&take(count(10, -5), 5)).await, vec![10, 5, 0, -5, -10]);
/// # }
/// ```
pub fn count<T>(start: T, step: T) -> Seq<T>
where
    T: Copy + Add<Output = T> + Send + Sync + 'static,
{
    Seq::new(move || {
        stream! {
            let mut current = start;
            loop {
                yield current;
                current = current + step;
            }
        }
    })
}

/// Yield `elem` exactly `n` times
pub fn repeat<O>(elem: O, n: usize) -> Seq<O>
where
    O: Clone + Send + Sync + 'static,
{
    Seq::new(move || {
        let elem = elem.clone();
        stream! {
            for _ in 0..n {
                yield elem.clone();
            }
        }
    })
}

// ================================
// Structural Combinators
// ================================

/// Re-drive `seq` from the start forever
///
/// An empty `seq` makes the cycle spin without ever yielding; each empty pass
/// hands control back to the scheduler.
pub fn cycle<O>(seq: Seq<O>) -> Seq<O>
where
    O: Send + 'static,
{
    Seq::new(move || {
        let seq = seq.clone();
        stream! {
            let mut passes = 0usize;
            loop {
                let mut s = seq.stream();
                let mut produced = false;
                while let Some(item) = s.next().await {
                    produced = true;
                    yield item;
                }
                passes += 1;
                trace!("cycle: completed pass {}", passes);
                if !produced {
                    tokio::task::yield_now().await;
                }
            }
        }
    })
}

/// [`cycle`] over a pair sequence
pub fn cycle2<K, V>(seq: Seq<(K, V)>) -> Seq<(K, V)>
where
    K: Send + 'static,
    V: Send + 'static,
{
    cycle(seq)
}

/// Yield all elements of each sequence in argument order
pub fn chain<O, I>(seqs: I) -> Seq<O>
where
    I: IntoIterator<Item = Seq<O>>,
    O: Send + 'static,
{
    let seqs: Vec<Seq<O>> = seqs.into_iter().collect();
    Seq::new(move || {
        let seqs = seqs.clone();
        stream! {
            for seq in seqs {
                let mut s = seq.stream();
                while let Some(item) = s.next().await {
                    yield item;
                }
            }
        }
    })
}

/// [`chain`] over pair sequences
pub fn chain2<K, V, I>(seqs: I) -> Seq<(K, V)>
where
    I: IntoIterator<Item = Seq<(K, V)>>,
    K: Send + 'static,
    V: Send + 'static,
{
    chain(seqs)
}

// ================================
// Windowing Combinators
// ================================

/// Yield the elements at indices `start, start + step, ...` below `stop`
///
/// Returns [`SeqError::InvalidStep`] when `step` is zero. The upstream is
/// never pulled past index `stop - 1`.
pub fn try_slice<O>(seq: Seq<O>, start: usize, stop: usize, step: usize) -> SeqResult<Seq<O>>
where
    O: Send + 'static,
{
    if step == 0 {
        return Err(SeqError::InvalidStep { step });
    }

    Ok(Seq::new(move || {
        let mut s = seq.stream();
        stream! {
            let mut index = 0usize;
            while index < stop {
                match s.next().await {
                    Some(item) => {
                        if index >= start && (index - start) % step == 0 {
                            yield item;
                        }
                        index += 1;
                    }
                    None => break,
                }
            }
        }
    }))
}

/// Yield the elements at indices `start, start + step, ...` below `stop`
///
/// # Panics
///
/// Panics if `step` is zero.
///
/// # Examples
/// ```
/// use lazyseq::*;
///
/// # async fn example() {
/// let s = slice(from_elements(0..7), 1, 6, 2);
/// assert_eq!(collect(&s).await, vec![1, 3, 5]);
/// # }
/// ```
pub fn slice<O>(seq: Seq<O>, start: usize, stop: usize, step: usize) -> Seq<O>
where
    O: Send + 'static,
{
    match try_slice(seq, start, stop, step) {
        Ok(seq) => seq,
        Err(err) => {
            warn!("slice: {}", err);
            panic!("{}", err);
        }
    }
}

/// [`slice`] over a pair sequence
pub fn slice2<K, V>(seq: Seq<(K, V)>, start: usize, stop: usize, step: usize) -> Seq<(K, V)>
where
    K: Send + 'static,
    V: Send + 'static,
{
    slice(seq, start, stop, step)
}

/// Yield at most the first `n` elements
pub fn take<O>(seq: Seq<O>, n: usize) -> Seq<O>
where
    O: Send + 'static,
{
    slice(seq, 0, n, 1)
}

/// [`take`] over a pair sequence
pub fn take2<K, V>(seq: Seq<(K, V)>, n: usize) -> Seq<(K, V)>
where
    K: Send + 'static,
    V: Send + 'static,
{
    take(seq, n)
}

/// Cap a sequence at `n` elements; same semantics as [`take`]
pub fn limit<O>(seq: Seq<O>, n: usize) -> Seq<O>
where
    O: Send + 'static,
{
    take(seq, n)
}

/// [`limit`] over a pair sequence
pub fn limit2<K, V>(seq: Seq<(K, V)>, n: usize) -> Seq<(K, V)>
where
    K: Send + 'static,
    V: Send + 'static,
{
    take(seq, n)
}

/// Yield elements while `predicate` holds, stopping at the first failure
///
/// # Examples
/// ```
/// use lazyseq::*;
///
/// # async fn example() {
/// let s = take_while(from_elements(vec![1, 2, 3, 4, 1]), |&x| x < 4);
/// assert_eq!(collect(&s).await, vec![1, 2, 3]);
/// # }
/// ```
pub fn take_while<O, F>(seq: Seq<O>, predicate: F) -> Seq<O>
where
    O: Send + 'static,
    F: Fn(&O) -> bool + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    Seq::new(move || {
        let mut s = seq.stream();
        let predicate = Arc::clone(&predicate);
        stream! {
            while let Some(item) = s.next().await {
                if !predicate(&item) {
                    break;
                }
                yield item;
            }
        }
    })
}

/// Skip the prefix for which `predicate` holds, then yield everything else
pub fn drop_while<O, F>(seq: Seq<O>, predicate: F) -> Seq<O>
where
    O: Send + 'static,
    F: Fn(&O) -> bool + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    Seq::new(move || {
        let mut s = seq.stream();
        let predicate = Arc::clone(&predicate);
        stream! {
            let mut dropping = true;
            while let Some(item) = s.next().await {
                if dropping && predicate(&item) {
                    continue;
                }
                dropping = false;
                yield item;
            }
        }
    })
}

// ================================
// Elementwise Combinators
// ================================

/// Yield only the elements satisfying `predicate`
pub fn filter<O, F>(seq: Seq<O>, predicate: F) -> Seq<O>
where
    O: Send + 'static,
    F: Fn(&O) -> bool + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);
    Seq::new(move || {
        let predicate = Arc::clone(&predicate);
        seq.stream().filter(move |item| futures_util::future::ready(predicate(item)))
    })
}

/// Yield `mapper(element)` for every element
pub fn map<O, R, F>(seq: Seq<O>, mapper: F) -> Seq<R>
where
    O: Send + 'static,
    R: Send + 'static,
    F: Fn(O) -> R + Send + Sync + 'static,
{
    let mapper = Arc::new(mapper);
    Seq::new(move || {
        let mapper = Arc::clone(&mapper);
        seq.stream().map(move |item| mapper(item))
    })
}

/// Pair every element with its zero-based position
///
/// # Examples
/// ```
/// use lazyseq::*;
///
/// # async fn example() {
/// let s = enumerate(from_elements(vec!["a", "b"]));
/// assert_eq!(collect(&s).await, vec![(0, "a"), (1, "b")]);
/// # }
/// ```
pub fn enumerate<O>(seq: Seq<O>) -> Seq<(usize, O)>
where
    O: Send + 'static,
{
    Seq::new(move || seq.stream().enumerate())
}

/// Project a pair sequence onto its keys
pub fn keys<K, V>(seq: Seq<(K, V)>) -> Seq<K>
where
    K: Send + 'static,
    V: Send + 'static,
{
    Seq::new(move || seq.stream().map(|(k, _)| k))
}

/// Project a pair sequence onto its values
pub fn values<K, V>(seq: Seq<(K, V)>) -> Seq<V>
where
    K: Send + 'static,
    V: Send + 'static,
{
    Seq::new(move || seq.stream().map(|(_, v)| v))
}

// ================================
// Single-Consumption Guard
// ================================

/// Allow `seq` to be driven exactly once
///
/// # Panics
///
/// The returned sequence panics with [`SeqError::AlreadyConsumed`] on every
/// drive after the first, including concurrent ones.
pub fn once<O>(seq: Seq<O>) -> Seq<O>
where
    O: Send + 'static,
{
    let consumed = AtomicBool::new(false);
    Seq::from_factory(move || {
        if consumed.swap(true, Ordering::AcqRel) {
            warn!("once: sequence driven after it was consumed");
            panic!("{}", SeqError::AlreadyConsumed);
        }
        seq.stream()
    })
}
