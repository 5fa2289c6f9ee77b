//! Ordered probe chain for error classification
//!
//! A caught failure is matched against a fixed list of probes, most specific
//! first, each mapping one concrete error type to a kind. The generic kind is
//! the catch-all and must stay last so it never masks a specific match. The
//! same discipline applies to `source()` chains: a wrapper error that matches
//! nothing specific has its cause chain probed before settling on generic.

use std::any::Any;
use std::error::Error;
use std::num::IntErrorKind;
use std::panic;

use tracing::warn;

use super::classified::Classified;
use super::kind::ErrorKind;

type Probe = fn(&(dyn Error + 'static)) -> Option<ErrorKind>;

/// Probe table, most-specific-first. Platform errors come after every typed
/// probe; the generic fallback lives in [`classify`] itself.
const PROBES: &[Probe] = &[
    probe_classified,
    probe_json,
    probe_url,
    probe_http,
    probe_utf8,
    probe_int_conversion,
    probe_int_parse,
    probe_float_parse,
    probe_env,
    probe_io,
];

// Re-classifying an already classified error keeps its kind.
fn probe_classified(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    err.downcast_ref::<Classified>().map(Classified::kind)
}

fn probe_json(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    use serde_json::error::Category;
    err.downcast_ref::<serde_json::Error>()
        .map(|err| match err.classify() {
            Category::Syntax | Category::Eof => ErrorKind::Syntax,
            Category::Data => ErrorKind::Type,
            Category::Io => ErrorKind::Io,
        })
}

fn probe_url(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    err.downcast_ref::<url::ParseError>().map(|_| ErrorKind::Type)
}

fn probe_http(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    err.downcast_ref::<reqwest::Error>().map(narrow_http)
}

fn probe_utf8(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    if err.is::<std::str::Utf8Error>() || err.is::<std::string::FromUtf8Error>() {
        return Some(ErrorKind::Uri);
    }
    None
}

fn probe_int_conversion(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    if err.is::<std::num::TryFromIntError>() || err.is::<std::char::CharTryFromError>() {
        return Some(ErrorKind::Range);
    }
    None
}

// Overflowing digit strings are a range problem; anything else about the
// input is syntactic.
fn probe_int_parse(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    err.downcast_ref::<std::num::ParseIntError>()
        .map(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ErrorKind::Range,
            _ => ErrorKind::Syntax,
        })
}

fn probe_float_parse(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    err.downcast_ref::<std::num::ParseFloatError>()
        .map(|_| ErrorKind::Syntax)
}

fn probe_env(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    err.downcast_ref::<std::env::VarError>()
        .map(|_| ErrorKind::Reference)
}

fn probe_io(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    err.downcast_ref::<std::io::Error>().map(|_| ErrorKind::Io)
}

/// Narrows an HTTP transport error into its sub-kind by inspecting the
/// transport flags, most specific first. An error matching no flag keeps the
/// plain platform kind; nothing here is treated as unreachable.
pub(crate) fn narrow_http(err: &reqwest::Error) -> ErrorKind {
    if err.is_timeout() {
        ErrorKind::Abort
    } else if err.is_connect() {
        ErrorKind::NotAllowed
    } else {
        ErrorKind::Io
    }
}

fn probe_all(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    PROBES.iter().find_map(|probe| probe(err))
}

/// Classifies an error into a kind. Never fails: an error matching no probe,
/// directly or anywhere along its `source()` chain, is the generic kind.
pub fn classify(err: &(dyn Error + 'static)) -> ErrorKind {
    if let Some(kind) = probe_all(err) {
        return kind;
    }
    let mut cause = err.source();
    while let Some(current) = cause {
        if let Some(kind) = probe_all(current) {
            return kind;
        }
        cause = current.source();
    }
    ErrorKind::Generic
}

/// Classifies a captured panic payload. Never fails: string payloads are the
/// generic kind, an embedded [`Classified`] keeps its kind, and anything else
/// is explicitly unknown.
pub fn classify_panic(payload: &(dyn Any + Send)) -> ErrorKind {
    if let Some(classified) = payload.downcast_ref::<Classified>() {
        return classified.kind();
    }
    if payload.is::<String>() || payload.is::<&'static str>() {
        return ErrorKind::Generic;
    }
    ErrorKind::Unknown
}

/// Classifies a captured panic payload, resuming the unwind with the original
/// payload if it is not recognizable. This is the one place an uncontrolled
/// failure may re-enter the caller: an unrecognizable payload cannot be
/// represented in the failure channel without fabricating a classification.
pub fn classify_or_resume(payload: Box<dyn Any + Send>) -> Classified {
    if classify_panic(payload.as_ref()).is_unknown() {
        warn!("panic payload matched no known error shape, resuming unwind");
        panic::resume_unwind(payload);
    }
    Classified::from_panic(payload)
}
