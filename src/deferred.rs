//! The deferred counterpart of the container
//!
//! [`AsyncOutcome`] wraps a boxed future that settles to an
//! [`Outcome`](crate::outcome::Outcome), re-exposing a subset of the
//! combinator surface lazily: each combinator chains a continuation onto the
//! wrapped future and returns a new `AsyncOutcome`. No scheduler of its own,
//! no cancellation, no replay; settlement semantics are exactly those of the
//! host future machinery.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::Classified;
use crate::outcome::Outcome;

/// A deferred [`Outcome`]: a future that settles exactly once to a
/// success-or-failure value.
///
/// Awaiting an `AsyncOutcome` yields the settled `Outcome`. There is
/// deliberately no `unwrap`/`expect` here: a settled failure is data to be
/// inspected, not an immediate fault.
pub struct AsyncOutcome<T, E> {
    inner: BoxFuture<'static, Outcome<T, E>>,
}

/// Lifts an already-settled outcome into the deferred form.
pub fn defer<T, E>(outcome: Outcome<T, E>) -> AsyncOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    AsyncOutcome::new(Box::pin(async move { outcome }))
}

impl<T, E> AsyncOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn new(inner: BoxFuture<'static, Outcome<T, E>>) -> Self {
        Self { inner }
    }

    /// Builds from a future with a typed error channel, lifting `Err` into
    /// the failure side.
    pub fn from_try_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::new(Box::pin(async move { Outcome::from(future.await) }))
    }

    // ==================== Combinators ====================

    /// Chains a fallible continuation over the success channel once the
    /// wrapped future settles. The continuation may return either an
    /// immediate [`Outcome`] or another `AsyncOutcome`; both are normalized
    /// into the next link of the chain. A settled failure short-circuits
    /// without invoking `f`.
    pub fn and_then<U, F, R>(self, f: F) -> AsyncOutcome<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoAsyncOutcome<U, E>,
    {
        AsyncOutcome::new(Box::pin(async move {
            match self.inner.await {
                Outcome::Success(value) => f(value).into_async_outcome().await,
                Outcome::Failure(error) => Outcome::Failure(error),
            }
        }))
    }

    /// Transforms the eventual success payload, leaving a failure untouched.
    pub fn map_ok<U, F>(self, f: F) -> AsyncOutcome<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        AsyncOutcome::new(Box::pin(async move { self.inner.await.map_ok(f) }))
    }

    /// Transforms the eventual failure payload, leaving a success untouched.
    pub fn map_err<F, O>(self, f: O) -> AsyncOutcome<T, F>
    where
        F: Send + 'static,
        O: FnOnce(E) -> F + Send + 'static,
    {
        AsyncOutcome::new(Box::pin(async move { self.inner.await.map_err(f) }))
    }

    /// Registers a side-effecting tap over the eventual success value.
    pub fn inspect_ok<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::new(Box::pin(async move { self.inner.await.inspect_ok(f) }))
    }

    /// Registers a side-effecting tap over the eventual error.
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        Self::new(Box::pin(async move { self.inner.await.inspect_err(f) }))
    }

    /// Settles and folds both channels into a single value. The error arm
    /// comes first.
    pub async fn map_or_else<U, D, F>(self, on_err: D, on_ok: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        self.inner.await.map_or_else(on_err, on_ok)
    }

    /// Settles and returns the success value, or computes one from the
    /// error.
    pub async fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        self.inner.await.unwrap_or_else(f)
    }
}

impl<T> AsyncOutcome<T, Classified>
where
    T: Send + 'static,
{
    /// Wraps an already-running computation, capturing a panic inside the
    /// future into the failure channel. The captured payload is classified
    /// on a best-effort basis and never re-raised.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::new(Box::pin(async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(value) => Outcome::Success(value),
                Err(payload) => Outcome::Failure(Classified::from_panic(payload)),
            }
        }))
    }

    /// Invokes an async function and wraps the resulting computation. A
    /// panic in the call itself is captured the same way as one inside the
    /// returned future.
    pub fn catching<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        // f() runs inside the wrapped future, so catch_unwind covers it too.
        Self::from_future(async move { f().await })
    }
}

impl<T, E> Future for AsyncOutcome<T, E> {
    type Output = Outcome<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().inner.as_mut().poll(cx)
    }
}

impl<T, E> fmt::Debug for AsyncOutcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncOutcome").finish_non_exhaustive()
    }
}

/// Normalization seam for [`AsyncOutcome::and_then`]: both an immediate
/// [`Outcome`] and another [`AsyncOutcome`] can serve as the next link.
pub trait IntoAsyncOutcome<T, E> {
    /// Converts into the deferred form.
    fn into_async_outcome(self) -> AsyncOutcome<T, E>;
}

impl<T, E> IntoAsyncOutcome<T, E> for Outcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn into_async_outcome(self) -> AsyncOutcome<T, E> {
        defer(self)
    }
}

impl<T, E> IntoAsyncOutcome<T, E> for AsyncOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn into_async_outcome(self) -> AsyncOutcome<T, E> {
        self
    }
}
