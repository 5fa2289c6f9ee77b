//! The classified error record
//!
//! A [`Classified`] pairs an [`ErrorKind`] with the original error value,
//! preserved intact. It is created once, at the moment a failure is caught,
//! and never mutated afterwards.

use std::any::Any;
use std::error::Error;

use thiserror::Error as ThisError;

use super::classifier::classify;
use super::kind::ErrorKind;

/// Boxed error type used for the preserved original error.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The text of a string panic payload, lifted into the error channel.
#[derive(Debug, ThisError)]
#[error("panic: {0}")]
pub struct PanicMessage(pub String);

/// Stand-in for a panic payload whose type carries no usable information.
#[derive(Debug, ThisError)]
#[error("panic with an opaque payload")]
pub struct OpaquePanic;

/// An error kind paired with the original error it was derived from.
#[derive(Debug)]
pub struct Classified {
    kind: ErrorKind,
    error: BoxError,
}

impl Classified {
    /// Classifies `error` through the probe chain and wraps it.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        let error = error.into();
        let narrowed: &(dyn Error + 'static) = error.as_ref();
        let kind = classify(narrowed);
        Self { kind, error }
    }

    /// Wraps `error` under a caller-chosen kind, bypassing the probe chain.
    pub fn with_kind<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            kind,
            error: error.into(),
        }
    }

    /// Converts a captured panic payload into a classified error.
    ///
    /// String payloads become [`PanicMessage`] under the generic kind; a
    /// payload that is already a `Classified` passes through unchanged; any
    /// other payload is wrapped as [`OpaquePanic`] under the unknown kind.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Classified>() {
            Ok(classified) => return *classified,
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(message) => {
                return Self::with_kind(ErrorKind::Generic, PanicMessage(*message))
            }
            Err(payload) => payload,
        };
        match payload.downcast::<&'static str>() {
            Ok(message) => Self::with_kind(ErrorKind::Generic, PanicMessage((*message).to_string())),
            Err(_) => Self::with_kind(ErrorKind::Unknown, OpaquePanic),
        }
    }

    /// Returns the assigned kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Borrows the preserved original error.
    pub fn error(&self) -> &(dyn Error + 'static) {
        self.error.as_ref()
    }

    /// Consumes the record and returns the preserved original error.
    pub fn into_error(self) -> BoxError {
        self.error
    }

    /// Returns true if the original error is of type `E`.
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.error().is::<E>()
    }

    /// Attempts to borrow the original error as a concrete type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.error().downcast_ref::<E>()
    }
}

impl std::fmt::Display for Classified {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.error)
    }
}

impl Error for Classified {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let original: &(dyn Error + 'static) = self.error.as_ref();
        Some(original)
    }
}
