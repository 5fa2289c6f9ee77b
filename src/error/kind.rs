//! Error kind taxonomy for classified failures
//!
//! This module defines the closed set of kinds a caught failure can be
//! classified into. The string tag of each kind is a stable part of the
//! public contract and is what serializers and `Display` emit.

use serde::Serialize;

/// The kind of a classified failure.
///
/// Kinds are assigned by the classifier's probe chain (see
/// [`classify`](crate::error::classify)) or chosen explicitly via
/// [`Classified::with_kind`](crate::error::Classified::with_kind). The
/// `Unknown` kind is reserved for values that are not recognizable as errors
/// at all; the probe chain never produces it for a value implementing
/// [`std::error::Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A value had the wrong shape for the requested operation
    /// (data-model mismatches, malformed URL input).
    #[serde(rename = "TypeError")]
    Type,
    /// Input that could not be parsed (malformed JSON, malformed numbers).
    #[serde(rename = "SyntaxError")]
    Syntax,
    /// A dynamic evaluation failure. No built-in probe produces this kind;
    /// it exists for callers classifying their own evaluation errors.
    #[serde(rename = "EvalError")]
    Eval,
    /// A value fell outside the representable range of its target type.
    #[serde(rename = "RangeError")]
    Range,
    /// A lookup of a name that is not defined (unset environment variables).
    #[serde(rename = "ReferenceError")]
    Reference,
    /// Malformed text decoding (invalid UTF-8 in would-be text).
    #[serde(rename = "URIError")]
    Uri,
    /// A platform-level failure: I/O errors and HTTP transport errors that
    /// match no more specific sub-kind.
    #[serde(rename = "IoError")]
    Io,
    /// Any other recognizable error, including string panic payloads.
    #[serde(rename = "Error")]
    Generic,
    /// An HTTP request abandoned before completion (request deadline
    /// elapsed). Narrowed from the platform kind by transport flags.
    #[serde(rename = "AbortError")]
    Abort,
    /// An HTTP request the host refused to carry out (connection could not
    /// be established). Narrowed from the platform kind by transport flags.
    #[serde(rename = "NotAllowedError")]
    NotAllowed,
    /// A value that is not a recognizable error. Only panic payloads that
    /// are neither errors nor strings classify as this.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ErrorKind {
    /// Returns the stable string tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Type => "TypeError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Eval => "EvalError",
            ErrorKind::Range => "RangeError",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Uri => "URIError",
            ErrorKind::Io => "IoError",
            ErrorKind::Generic => "Error",
            ErrorKind::Abort => "AbortError",
            ErrorKind::NotAllowed => "NotAllowedError",
            ErrorKind::Unknown => "Unknown",
        }
    }

    /// Returns true if this kind marks an unrecognizable value.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ErrorKind::Unknown)
    }

    /// Returns true for platform-level kinds, including the narrowed
    /// transport sub-kinds.
    pub fn is_platform(&self) -> bool {
        matches!(
            self,
            ErrorKind::Io | ErrorKind::Abort | ErrorKind::NotAllowed
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
