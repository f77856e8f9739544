//! Fluent method-chaining wrapper over the free-function combinators
//!
//! Every method forwards to the function of the same name; behaviour is
//! identical to calling it directly.

use std::future::Future;

use crate::seq::{self, Seq};
use crate::zip;

/// Extension trait providing chainable combinators on sequences
pub trait SeqExt<O>
where
    O: Send + 'static,
{
    /// The sequence being extended
    fn as_seq(&self) -> &Seq<O>;

    /// Drive to completion and gather the elements
    fn collect(&self) -> impl Future<Output = Vec<O>> + Send + '_ {
        seq::collect(self.as_seq())
    }

    /// Drive to completion, calling `consumer` once per element
    fn for_each<F>(&self, consumer: F) -> impl Future<Output = ()> + Send + '_
    where
        F: FnMut(O) + Send + 'static,
    {
        seq::for_each(self.as_seq(), consumer)
    }

    /// Select the elements at `start, start + step, ...` below `stop`
    fn slice(&self, start: usize, stop: usize, step: usize) -> Seq<O> {
        seq::slice(self.as_seq().clone(), start, stop, step)
    }

    /// Take at most the first `n` elements
    fn take(&self, n: usize) -> Seq<O> {
        seq::take(self.as_seq().clone(), n)
    }

    /// Cap the sequence at `n` elements
    fn limit(&self, n: usize) -> Seq<O> {
        seq::limit(self.as_seq().clone(), n)
    }

    fn take_while<F>(&self, predicate: F) -> Seq<O>
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        seq::take_while(self.as_seq().clone(), predicate)
    }

    fn drop_while<F>(&self, predicate: F) -> Seq<O>
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        seq::drop_while(self.as_seq().clone(), predicate)
    }

    fn filter<F>(&self, predicate: F) -> Seq<O>
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        seq::filter(self.as_seq().clone(), predicate)
    }

    /// Transform every element; the element type may change
    fn map<R, F>(&self, mapper: F) -> Seq<R>
    where
        R: Send + 'static,
        F: Fn(O) -> R + Send + Sync + 'static,
    {
        seq::map(self.as_seq().clone(), mapper)
    }

    fn cycle(&self) -> Seq<O> {
        seq::cycle(self.as_seq().clone())
    }

    /// Follow this sequence with each of `others` in order
    fn chain<I>(&self, others: I) -> Seq<O>
    where
        I: IntoIterator<Item = Seq<O>>,
    {
        seq::chain(std::iter::once(self.as_seq().clone()).chain(others))
    }

    fn zip<U>(&self, other: &Seq<U>) -> Seq<(O, U)>
    where
        U: Send + 'static,
    {
        zip::zip(self.as_seq().clone(), other.clone())
    }

    fn enumerate(&self) -> Seq<(usize, O)> {
        seq::enumerate(self.as_seq().clone())
    }

    /// Guard the sequence against being driven more than once
    fn once(&self) -> Seq<O> {
        seq::once(self.as_seq().clone())
    }
}

impl<O> SeqExt<O> for Seq<O>
where
    O: Send + 'static,
{
    fn as_seq(&self) -> &Seq<O> {
        self
    }
}

/// Extension trait for sequences of `(key, value)` pairs
pub trait PairSeqExt<K, V>
where
    K: Send + 'static,
    V: Send + 'static,
{
    fn keys(&self) -> Seq<K>;
    fn values(&self) -> Seq<V>;
}

impl<K, V> PairSeqExt<K, V> for Seq<(K, V)>
where
    K: Send + 'static,
    V: Send + 'static,
{
    fn keys(&self) -> Seq<K> {
        seq::keys(self.clone())
    }

    fn values(&self) -> Seq<V> {
        seq::values(self.clone())
    }
}
