//! Safe wrappers over URL construction
//!
//! Construction failures classify as the type kind: the input did not have
//! the shape of a URL.

use tracing::debug;
use url::Url;

use crate::error::Classified;
use crate::outcome::Outcome;

fn lift(result: Result<Url, url::ParseError>, operation: &'static str) -> Outcome<Url, Classified> {
    match result {
        Ok(url) => Outcome::Success(url),
        Err(err) => {
            let classified = Classified::new(err);
            debug!(
                operation,
                kind = classified.kind().as_str(),
                "url construction failed"
            );
            Outcome::Failure(classified)
        }
    }
}

/// Constructs a URL from an absolute input string.
pub fn parse(input: &str) -> Outcome<Url, Classified> {
    lift(Url::parse(input), "parse")
}

/// Constructs a URL by joining a (possibly relative) input onto a base.
pub fn join(base: &Url, input: &str) -> Outcome<Url, Classified> {
    lift(base.join(input), "join")
}
