//! The success/failure container and its combinator surface
//!
//! [`Outcome`] is an explicit two-variant container: exactly one variant is
//! active, the value is immutable once constructed, and every combinator
//! returns a new value. The `unwrap`/`expect` family is the single deliberate
//! escape from the value-returning discipline, reserved for programmer error.

use std::convert::Infallible;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::Classified;

/// A value that is either a success or a failure.
///
/// The error parameter defaults to "no failure possible", so a signature can
/// advertise infallibility as `Outcome<T>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T, E = Infallible> {
    /// The operation produced a value.
    Success(T),
    /// The operation failed with an error.
    Failure(E),
}

/// Builds a success.
pub fn success<T, E>(value: T) -> Outcome<T, E> {
    Outcome::Success(value)
}

/// Builds a failure.
pub fn failure<T, E>(error: E) -> Outcome<T, E> {
    Outcome::Failure(error)
}

impl<T, E> Outcome<T, E> {
    // ==================== Guards ====================

    /// Returns true if this is a success. Always disagrees with
    /// [`is_err`](Self::is_err).
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns true if this is a failure.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Returns the success value, or `None` on the failure side.
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the error, or `None` on the success side.
    pub fn err(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Borrows both channels.
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    // ==================== Chaining ====================

    /// Returns `other` on success, propagating a failure unchanged.
    pub fn and<U>(self, other: Outcome<U, E>) -> Outcome<U, E> {
        match self {
            Outcome::Success(_) => other,
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Chains a fallible continuation over the success channel. A failure
    /// short-circuits without invoking `f`.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Returns `other` on failure, propagating a success unchanged.
    pub fn or<F>(self, other: Outcome<T, F>) -> Outcome<T, F> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(_) => other,
        }
    }

    /// Chains a recovery over the failure channel. A success short-circuits
    /// without invoking `f`.
    pub fn or_else<F, O>(self, f: O) -> Outcome<T, F>
    where
        O: FnOnce(E) -> Outcome<T, F>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => f(error),
        }
    }

    // ==================== Transformation ====================

    /// Transforms the success payload, leaving a failure untouched.
    pub fn map_ok<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the failure payload, leaving a success untouched.
    pub fn map_err<F, O>(self, f: O) -> Outcome<T, F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Applies `f` to the success value, or returns `default` on failure.
    pub fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(_) => default,
        }
    }

    /// Folds both channels into a single value. The error arm comes first.
    pub fn map_or_else<U, D, F>(self, on_err: D, on_ok: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => on_ok(value),
            Outcome::Failure(error) => on_err(error),
        }
    }

    /// Runs a side-effecting tap over the success value, returning the
    /// container unchanged.
    pub fn inspect_ok<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Outcome::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Runs a side-effecting tap over the error, returning the container
    /// unchanged.
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Outcome::Failure(error) = &self {
            f(error);
        }
        self
    }

    // ==================== Consumption ====================

    /// Returns the success value, or `default` on failure.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    /// Returns the success value, or computes one from the error.
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => f(error),
        }
    }

    /// Converts into the standard library result type.
    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T, E: std::fmt::Debug> Outcome<T, E> {
    /// Returns the success value.
    ///
    /// # Panics
    /// Panics on a failure, carrying the error's debug rendering. Reserved
    /// for programmer error, not domain failure.
    pub fn unwrap(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => {
                panic!("called `Outcome::unwrap()` on a `Failure` value: {error:?}")
            }
        }
    }

    /// Like [`unwrap`](Self::unwrap), with a caller-supplied message.
    ///
    /// # Panics
    /// Panics on a failure with `msg` and the error's debug rendering.
    pub fn expect(self, msg: &str) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => panic!("{msg}: {error:?}"),
        }
    }
}

impl<T: std::fmt::Debug, E> Outcome<T, E> {
    /// Returns the error.
    ///
    /// # Panics
    /// Panics on a success, carrying the value's debug rendering.
    pub fn unwrap_err(self) -> E {
        match self {
            Outcome::Success(value) => {
                panic!("called `Outcome::unwrap_err()` on a `Success` value: {value:?}")
            }
            Outcome::Failure(error) => error,
        }
    }

    /// Like [`unwrap_err`](Self::unwrap_err), with a caller-supplied message.
    ///
    /// # Panics
    /// Panics on a success with `msg` and the value's debug rendering.
    pub fn expect_err(self, msg: &str) -> E {
        match self {
            Outcome::Success(value) => panic!("{msg}: {value:?}"),
            Outcome::Failure(error) => error,
        }
    }
}

impl<T> Outcome<T, Classified> {
    /// Runs `f` immediately, capturing any panic into the failure channel.
    ///
    /// The captured payload is classified on a best-effort basis; a payload
    /// that matches nothing still lands in the failure channel under the
    /// unknown kind, so this constructor never re-raises.
    pub fn catching<F>(f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Outcome::Success(value),
            Err(payload) => Outcome::Failure(Classified::from_panic(payload)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ok(value: i32) -> Outcome<i32, String> {
        success(value)
    }

    fn err(error: &str) -> Outcome<i32, String> {
        failure(error.to_string())
    }

    // ==================== Guard Tests ====================

    #[test]
    fn test_guards_disagree_on_success() {
        let outcome: Outcome<i32> = success(1);
        assert!(outcome.is_ok());
        assert!(!outcome.is_err());
    }

    #[test]
    fn test_guards_disagree_on_failure() {
        let outcome = err("broken");
        assert!(outcome.is_err());
        assert!(!outcome.is_ok());
    }

    #[test]
    fn test_inactive_side_is_absent() {
        assert_eq!(ok(1).ok(), Some(1));
        assert_eq!(ok(1).err(), None);
        assert_eq!(err("broken").ok(), None);
        assert_eq!(err("broken").err(), Some("broken".to_string()));
    }

    #[test]
    fn test_as_ref_preserves_variant() {
        let outcome = ok(7);
        assert_eq!(outcome.as_ref().ok(), Some(&7));
        assert!(outcome.is_ok());
    }

    // ==================== Chaining Tests ====================

    #[test]
    fn test_and_replaces_success() {
        assert_eq!(ok(1).and(ok(2)), ok(2));
        assert_eq!(err("first").and(ok(2)), err("first"));
    }

    #[test]
    fn test_and_then_chains_success() {
        let chained = ok(2).and_then(|n| ok(n * 10));
        assert_eq!(chained, ok(20));
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut invoked = false;
        let chained = err("broken").and_then(|n| {
            invoked = true;
            ok(n)
        });
        assert_eq!(chained, err("broken"));
        assert!(!invoked);
    }

    #[test]
    fn test_or_replaces_failure() {
        assert_eq!(err("broken").or(ok(9)), ok(9));
        assert_eq!(ok(1).or(err("ignored")), ok(1));
    }

    #[test]
    fn test_or_else_recovers() {
        let recovered = err("broken").or_else(|e| ok(e.len() as i32));
        assert_eq!(recovered, ok(6));
    }

    #[test]
    fn test_or_else_short_circuits() {
        let mut invoked = false;
        let outcome = ok(1).or_else(|e: String| {
            invoked = true;
            err(&e)
        });
        assert_eq!(outcome, ok(1));
        assert!(!invoked);
    }

    #[test]
    fn test_or_can_change_error_type() {
        let narrow: Outcome<i32, String> = err("broken");
        let widened: Outcome<i32, u8> = narrow.or(failure(4));
        assert_eq!(widened, failure(4));
    }

    // ==================== Transformation Tests ====================

    #[test]
    fn test_map_ok_transforms_success_only() {
        assert_eq!(ok(2).map_ok(|n| n + 1), ok(3));
        assert_eq!(err("broken").map_ok(|n| n + 1), err("broken"));
    }

    #[test]
    fn test_map_ok_composes_with_unwrap() {
        let f = |n: i32| n * 3;
        assert_eq!(ok(7).map_ok(f).unwrap(), f(7));
    }

    #[test]
    fn test_map_err_transforms_failure_only() {
        assert_eq!(err("broken").map_err(|e| e.len()), failure(6));
        assert_eq!(ok(1).map_err(|e: String| e.len()), success(1));
    }

    #[test]
    fn test_map_or() {
        assert_eq!(ok(2).map_or(0, |n| n * 2), 4);
        assert_eq!(err("broken").map_or(0, |n| n * 2), 0);
    }

    #[test]
    fn test_map_or_else_folds_both_sides() {
        assert_eq!(ok(2).map_or_else(|e| e.len() as i32, |n| n * 2), 4);
        assert_eq!(err("broken").map_or_else(|e| e.len() as i32, |n| n * 2), 6);
    }

    #[test]
    fn test_inspect_ok_taps_without_altering() {
        let mut seen = None;
        let outcome = ok(5).inspect_ok(|n| seen = Some(*n));
        assert_eq!(outcome, ok(5));
        assert_eq!(seen, Some(5));

        let mut seen = None;
        err("broken").inspect_ok(|n| seen = Some(*n));
        assert_eq!(seen, None);
    }

    #[test]
    fn test_inspect_err_taps_without_altering() {
        let mut seen = None;
        let outcome = err("broken").inspect_err(|e| seen = Some(e.clone()));
        assert_eq!(outcome, err("broken"));
        assert_eq!(seen, Some("broken".to_string()));
    }

    // ==================== Consumption Tests ====================

    #[test]
    fn test_unwrap_success() {
        assert_eq!(ok(3).unwrap(), 3);
    }

    #[test]
    #[should_panic(expected = "called `Outcome::unwrap()` on a `Failure` value")]
    fn test_unwrap_failure_panics() {
        err("broken").unwrap();
    }

    #[test]
    fn test_unwrap_err_failure() {
        assert_eq!(err("broken").unwrap_err(), "broken");
    }

    #[test]
    #[should_panic(expected = "called `Outcome::unwrap_err()` on a `Success` value")]
    fn test_unwrap_err_success_panics() {
        ok(3).unwrap_err();
    }

    #[test]
    #[should_panic(expected = "config must parse: \"broken\"")]
    fn test_expect_carries_message_and_cause() {
        err("broken").expect("config must parse");
    }

    #[test]
    #[should_panic(expected = "wanted the error: 3")]
    fn test_expect_err_carries_message_and_cause() {
        ok(3).expect_err("wanted the error");
    }

    #[test]
    fn test_unwrap_or_and_unwrap_or_else() {
        assert_eq!(ok(3).unwrap_or(0), 3);
        assert_eq!(err("broken").unwrap_or(0), 0);
        assert_eq!(err("broken").unwrap_or_else(|e| e.len() as i32), 6);
    }

    // ==================== Interop Tests ====================

    #[test]
    fn test_from_result_roundtrip() {
        let outcome: Outcome<i32, String> = Ok(4).into();
        assert_eq!(outcome, ok(4));
        assert_eq!(outcome.into_result(), Ok(4));

        let outcome: Outcome<i32, String> = Err("broken".to_string()).into();
        assert_eq!(outcome.into_result(), Err("broken".to_string()));
    }

    // ==================== Catching Tests ====================

    #[test]
    fn test_catching_success() {
        let outcome = Outcome::catching(|| 21 * 2);
        assert_eq!(outcome.ok(), Some(42));
    }

    #[test]
    fn test_catching_panic_lands_in_failure_channel() {
        let outcome: Outcome<i32, _> = Outcome::catching(|| panic!("exploded"));
        let classified = outcome.unwrap_err();
        assert_eq!(classified.kind(), ErrorKind::Generic);
        assert!(format!("{classified}").contains("exploded"));
    }

    #[test]
    fn test_catching_opaque_panic_is_unknown_not_rethrown() {
        let outcome: Outcome<i32, _> =
            Outcome::catching(|| std::panic::panic_any(vec![1_u8, 2, 3]));
        assert_eq!(outcome.unwrap_err().kind(), ErrorKind::Unknown);
    }
}
