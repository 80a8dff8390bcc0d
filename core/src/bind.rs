//! Token binding.
//!
//! The binder walks a raw token stream against a composed [`SchemaSet`] and
//! produces a typed [`ArgumentRecord`] plus the tokens it did not consume.
//! Binding is total and order-independent: flags may appear anywhere in the
//! stream, and when a flag is repeated the first occurrence wins and later
//! duplicates are ignored without error. This permissive policy is what lets
//! environment-supplied tokens spliced ahead of the real argv act as
//! persistent defaults.
//!
//! Non-flag tokens are never consumed; they come back in order for the
//! caller — the command-tree resolver — to interpret as sub-command path
//! segments or positional leftovers.

use thiserror::Error;

use crate::mixin::SchemaSet;
use crate::record::ArgumentRecord;
use crate::schema::{ArgValue, ValueType};

/// User-input errors surfaced while binding tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A flag-shaped token matched no declared schema.
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    /// A value-taking flag appeared as the final token.
    #[error("flag --{flag} expects a value")]
    MissingValue {
        /// Long name of the flag missing its value.
        flag: String,
    },
    /// A value token did not parse into the declared type.
    #[error("invalid value `{token}` for --{flag}: expected {expected}")]
    InvalidValue {
        /// Long name of the flag being bound.
        flag: String,
        /// The raw token that failed to parse.
        token: String,
        /// The type the schema declares.
        expected: ValueType,
    },
}

#[derive(Clone, Copy, PartialEq)]
enum UnknownFlags {
    Reject,
    PassThrough,
}

/// Whether a token addresses a flag rather than a command name or value.
///
/// A lone `-` is a plain token; anything else with a leading dash is
/// flag-shaped.
pub fn is_flag_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Binds tokens against a schema set.
///
/// Returns the typed record and the non-flag tokens left uninterpreted, in
/// their original order. Unknown flag tokens fail with
/// [`BindError::UnknownFlag`].
///
/// # Examples
///
/// ```
/// use forgekit_core::{BindError, FlagSet, ValueType, bind, compose};
///
/// let set = compose([
///     &FlagSet::new("build")
///         .flag(Some('v'), "verbose", "Verbose")
///         .option(Some('j'), "jobs", "Parallel jobs", ValueType::Int),
/// ]).unwrap();
///
/// let tokens: Vec<String> =
///     ["debug", "-j", "4", "--verbose"].iter().map(|s| s.to_string()).collect();
/// let (record, remaining) = bind(&set, &tokens).unwrap();
/// assert!(record.flag("verbose"));
/// assert_eq!(record.int_value("jobs"), Some(4));
/// assert_eq!(remaining, vec!["debug".to_string()]);
///
/// let bogus = vec!["--does-not-exist".to_string()];
/// assert_eq!(
///     bind(&set, &bogus).unwrap_err(),
///     BindError::UnknownFlag("--does-not-exist".to_string()),
/// );
/// ```
pub fn bind(set: &SchemaSet, tokens: &[String]) -> Result<(ArgumentRecord, Vec<String>), BindError> {
    walk(set, tokens, UnknownFlags::Reject)
}

/// Binds tokens, passing unrecognized flags through to the remainder.
///
/// Bootstrap binds the root composition before downstream setup has finished
/// registering commands, so flags belonging to deeper commands cannot be
/// resolved yet and must not fail. Errors on *declared* flags — a missing or
/// unparseable value — still surface.
pub fn bind_partial(
    set: &SchemaSet,
    tokens: &[String],
) -> Result<(ArgumentRecord, Vec<String>), BindError> {
    walk(set, tokens, UnknownFlags::PassThrough)
}

fn walk(
    set: &SchemaSet,
    tokens: &[String],
    unknown: UnknownFlags,
) -> Result<(ArgumentRecord, Vec<String>), BindError> {
    let mut record = ArgumentRecord::default();
    let mut remaining = Vec::new();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if !is_flag_token(token) {
            remaining.push(token.clone());
            continue;
        }

        let Some(schema) = set.find(token) else {
            match unknown {
                UnknownFlags::Reject => return Err(BindError::UnknownFlag(token.clone())),
                UnknownFlags::PassThrough => {
                    remaining.push(token.clone());
                    continue;
                }
            }
        };

        if !schema.takes_value() {
            record.assign(&schema.long, ArgValue::Bool(true));
            continue;
        }

        let raw = iter.next().ok_or_else(|| BindError::MissingValue {
            flag: schema.long.clone(),
        })?;

        // A repeated flag still consumes its value token, but the duplicate
        // is dropped unparsed.
        if record.is_set(&schema.long) {
            continue;
        }

        let value =
            ArgValue::parse(raw, schema.value_type).ok_or_else(|| BindError::InvalidValue {
                flag: schema.long.clone(),
                token: raw.clone(),
                expected: schema.value_type,
            })?;
        record.assign(&schema.long, value);
    }

    for schema in set.iter() {
        if let Some(default) = &schema.default {
            if !record.is_set(&schema.long) {
                record.assign_default(&schema.long, default.clone());
            }
        }
    }

    Ok((record, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixin::{FlagSet, compose};

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn test_set() -> SchemaSet {
        compose([
            &FlagSet::new("logging").flag(Some('v'), "verbose", "Verbose"),
            &FlagSet::new("build")
                .option(Some('j'), "jobs", "Parallel jobs", ValueType::Int)
                .option(None, "target", "Build target", ValueType::Str),
        ])
        .unwrap()
    }

    #[test]
    fn test_bind_is_order_independent() {
        let set = test_set();
        let (a, _) = bind(&set, &tokens(&["--verbose", "-j", "2"])).unwrap();
        let (b, _) = bind(&set, &tokens(&["-j", "2", "--verbose"])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bind_is_idempotent() {
        let set = test_set();
        let stream = tokens(&["--verbose", "--target", "release", "src"]);
        let first = bind(&set, &stream).unwrap();
        let second = bind(&set, &stream).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_bool_flag_is_not_an_error() {
        let set = test_set();
        let (record, _) = bind(&set, &tokens(&["--verbose", "--verbose"])).unwrap();
        assert!(record.flag("verbose"));
    }

    #[test]
    fn test_first_occurrence_wins_for_values() {
        let set = test_set();
        let (record, _) = bind(&set, &tokens(&["-j", "2", "-j", "8"])).unwrap();
        assert_eq!(record.int_value("jobs"), Some(2));
    }

    #[test]
    fn test_ignored_duplicate_still_consumes_its_value() {
        let set = test_set();
        // "8" must not leak into the remainder as a positional token, and
        // an unparseable duplicate is dropped silently.
        let (record, remaining) =
            bind(&set, &tokens(&["-j", "2", "-j", "not-a-number"])).unwrap();
        assert_eq!(record.int_value("jobs"), Some(2));
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_unknown_flag_names_the_token() {
        let set = test_set();
        let err = bind(&set, &tokens(&["--does-not-exist"])).unwrap_err();
        assert_eq!(err, BindError::UnknownFlag("--does-not-exist".to_string()));
    }

    #[test]
    fn test_missing_value_at_end_of_stream() {
        let set = test_set();
        let err = bind(&set, &tokens(&["--target"])).unwrap_err();
        assert_eq!(
            err,
            BindError::MissingValue {
                flag: "target".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_value_carries_token_and_type() {
        let set = test_set();
        let err = bind(&set, &tokens(&["--jobs", "many"])).unwrap_err();
        assert_eq!(
            err,
            BindError::InvalidValue {
                flag: "jobs".to_string(),
                token: "many".to_string(),
                expected: ValueType::Int,
            }
        );
    }

    #[test]
    fn test_non_flag_tokens_preserved_in_order() {
        let set = test_set();
        let (_, remaining) = bind(&set, &tokens(&["build", "--verbose", "debug"])).unwrap();
        assert_eq!(remaining, tokens(&["build", "debug"]));
    }

    #[test]
    fn test_lone_dash_is_a_plain_token() {
        let set = test_set();
        let (_, remaining) = bind(&set, &tokens(&["-"])).unwrap();
        assert_eq!(remaining, tokens(&["-"]));
    }

    #[test]
    fn test_defaults_fill_unset_fields_only() {
        let schema = crate::schema::ArgSchema::option(
            Some('j'),
            "jobs",
            "Parallel jobs",
            ValueType::Int,
        )
        .with_default(ArgValue::Int(1));
        let set = compose([&FlagSet::new("build").declare(schema)]).unwrap();

        let (defaulted, _) = bind(&set, &[]).unwrap();
        assert!(!defaulted.is_set("jobs"));
        assert_eq!(defaulted.int_value("jobs"), Some(1));

        let (explicit, _) = bind(&set, &tokens(&["-j", "4"])).unwrap();
        assert!(explicit.is_set("jobs"));
        assert_eq!(explicit.int_value("jobs"), Some(4));
    }

    #[test]
    fn test_partial_bind_passes_unknown_flags_through() {
        let set = test_set();
        let stream = tokens(&["--frobnicate", "build", "--verbose"]);
        let (record, remaining) = bind_partial(&set, &stream).unwrap();
        assert!(record.flag("verbose"));
        assert_eq!(remaining, tokens(&["--frobnicate", "build"]));
    }

    #[test]
    fn test_partial_bind_still_rejects_bad_known_value() {
        let set = test_set();
        let err = bind_partial(&set, &tokens(&["--jobs", "many"])).unwrap_err();
        assert!(matches!(err, BindError::InvalidValue { .. }));
    }
}
