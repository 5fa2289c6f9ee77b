//! Safe wrappers over JSON parsing and serialization
//!
//! Each function calls the underlying `serde_json` operation and converts
//! its error channel into a classified failure. Malformed input classifies
//! as the syntax kind; a value that cannot be represented classifies as the
//! type kind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Classified;
use crate::outcome::Outcome;

fn lift<T>(result: serde_json::Result<T>, operation: &'static str) -> Outcome<T, Classified> {
    match result {
        Ok(value) => Outcome::Success(value),
        Err(err) => {
            let classified = Classified::new(err);
            debug!(
                operation,
                kind = classified.kind().as_str(),
                "json operation failed"
            );
            Outcome::Failure(classified)
        }
    }
}

/// Parses a JSON document into a dynamically-typed value.
pub fn parse(text: &str) -> Outcome<Value, Classified> {
    lift(serde_json::from_str(text), "parse")
}

/// Parses a JSON document into a concrete type.
pub fn parse_as<T: DeserializeOwned>(text: &str) -> Outcome<T, Classified> {
    lift(serde_json::from_str(text), "parse_as")
}

/// Serializes a value into a compact JSON document.
pub fn stringify<T>(value: &T) -> Outcome<String, Classified>
where
    T: Serialize + ?Sized,
{
    lift(serde_json::to_string(value), "stringify")
}

/// Serializes a value into a pretty-printed JSON document.
pub fn stringify_pretty<T>(value: &T) -> Outcome<String, Classified>
where
    T: Serialize + ?Sized,
{
    lift(serde_json::to_string_pretty(value), "stringify_pretty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;

    #[test]
    fn test_parse_valid_document() {
        let outcome = parse(r#"{"key":"value"}"#);
        assert!(outcome.is_ok());
        let value = outcome.unwrap();
        assert_eq!(value["key"], "value");
    }

    #[test]
    fn test_parse_malformed_document_is_syntax() {
        let outcome = parse("not json");
        assert!(outcome.is_err());
        let classified = outcome.unwrap_err();
        assert_eq!(classified.kind(), ErrorKind::Syntax);
        assert_eq!(classified.kind().as_str(), "SyntaxError");
        assert!(classified.is::<serde_json::Error>());
    }

    #[test]
    fn test_parse_as_shape_mismatch_is_type() {
        #[derive(Debug, Deserialize)]
        struct Point {
            #[allow(dead_code)]
            x: i64,
        }

        let outcome = parse_as::<Point>(r#"{"x":"not a number"}"#);
        assert_eq!(outcome.unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn test_parse_as_concrete_type() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Point {
            x: i64,
            y: i64,
        }

        let outcome = parse_as::<Point>(r#"{"x":1,"y":2}"#);
        assert_eq!(outcome.unwrap(), Point { x: 1, y: 2 });
    }

    #[test]
    fn test_stringify_value() {
        let outcome = stringify(&serde_json::json!({"key":"value"}));
        assert_eq!(outcome.unwrap(), r#"{"key":"value"}"#);
    }

    #[test]
    fn test_stringify_unrepresentable_is_type() {
        struct Unrepresentable;

        impl Serialize for Unrepresentable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("no JSON shape for this value"))
            }
        }

        let outcome = stringify(&Unrepresentable);
        assert!(outcome.is_err());
        assert_eq!(outcome.unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn test_stringify_pretty_roundtrips() {
        let pretty = stringify_pretty(&serde_json::json!({"key":"value"})).unwrap();
        assert!(pretty.contains('\n'));
        assert!(parse(&pretty).is_ok());
    }
}
